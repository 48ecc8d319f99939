use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens `original_url` and returns the generated short code.
    async fn create_short_url(&self, original_url: &str) -> Result<ShortCode>;

    /// Retrieves the original URL associated with the given short code.
    async fn get_original_url(&self, code: &ShortCode) -> Result<String>;
}
