use async_trait::async_trait;
use shorty_core::{Repository, ShortCode, Shortener, ShortenerError};
use shorty_generator::Generator;
use std::sync::Arc;
use tracing::{debug, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator`. It holds no lock of
/// its own; uniqueness is enforced by the repository when the code is saved.
///
/// Note: no collision retry is performed. If the generated code is already
/// taken the save error is returned as [`ShortenerError::Persist`].
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
        }
    }

    /// Returns the repository this service writes to.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.trim().is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn create_short_url(&self, original_url: &str) -> Result<ShortCode, ShortenerError> {
        Self::validate_url(original_url)?;

        let code: ShortCode = self.generator.generate().into();

        if let Err(source) = self.repository.save(&code, original_url).await {
            warn!(code = %code, error = %source, "failed to persist short url");
            return Err(ShortenerError::Persist {
                code: code.to_string(),
                source,
            });
        }

        debug!(code = %code, url = %original_url, "created short url");
        Ok(code)
    }

    async fn get_original_url(&self, code: &ShortCode) -> Result<String, ShortenerError> {
        Ok(self.repository.get(code).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shorty_core::StorageError;
    use shorty_generator::RandomGenerator;
    use shorty_storage::InMemoryRepository;

    /// Always hands out the same code, to force collisions.
    struct FixedGenerator(&'static str);

    impl Generator for FixedGenerator {
        type Output = ShortCode;

        fn generate(&self) -> ShortCode {
            ShortCode::new_unchecked(self.0)
        }
    }

    fn test_service() -> ShortenerService<InMemoryRepository, RandomGenerator> {
        ShortenerService::new(InMemoryRepository::new(), RandomGenerator::new())
    }

    #[tokio::test]
    async fn create_returns_eight_character_code() {
        let service = test_service();

        let code = service
            .create_short_url("https://example.com/a")
            .await
            .unwrap();

        assert_eq!(code.as_str().len(), 8);
    }

    #[tokio::test]
    async fn created_code_resolves_to_original_url() {
        let service = test_service();

        let code = service
            .create_short_url("https://example.com/a")
            .await
            .unwrap();
        let url = service.get_original_url(&code).await.unwrap();

        assert_eq!(url, "https://example.com/a");
    }

    #[tokio::test]
    async fn empty_url_is_rejected() {
        let service = test_service();

        let err = service.create_short_url("").await.unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidUrl(_)));

        let err = service.create_short_url("   ").await.unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidUrl(_)));
        assert!(service.repository().is_empty());
    }

    #[tokio::test]
    async fn collision_surfaces_as_persist_failure() {
        let service =
            ShortenerService::new(InMemoryRepository::new(), FixedGenerator("abc12345"));

        let first = service
            .create_short_url("https://example.com/a")
            .await
            .unwrap();
        assert_eq!(first.as_str(), "abc12345");

        let err = service
            .create_short_url("https://example.com/b")
            .await
            .unwrap_err();

        match err {
            ShortenerError::Persist { code, source } => {
                assert_eq!(code, "abc12345");
                assert!(matches!(source, StorageError::AlreadyExists(_)));
            }
            other => panic!("expected persist error, got {other:?}"),
        }
        assert_eq!(
            service
                .get_original_url(&ShortCode::new_unchecked("abc12345"))
                .await
                .unwrap(),
            "https://example.com/a"
        );
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let service = test_service();

        let err = service
            .get_original_url(&ShortCode::new_unchecked("doesnotexist"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_are_all_retrievable() {
        let service = test_service();
        let mut handles = vec![];

        for i in 0..64 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let url = format!("https://example.com/{i}");
                let code = service.create_short_url(&url).await.unwrap();
                (code, url)
            }));
        }

        for handle in handles {
            let (code, url) = handle.await.unwrap();
            assert_eq!(service.get_original_url(&code).await.unwrap(), url);
        }
    }
}
