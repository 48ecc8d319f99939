use crate::{FileRepository, InMemoryRepository, PostgresRepository};
use async_trait::async_trait;
use shorty_core::error::Result;
use shorty_core::{Ping, Repository, ShortCode};
use std::sync::Arc;

/// The closed set of storage backends.
///
/// Chosen once at startup and handed to the service; it is never switched
/// while the process runs.
#[derive(Debug)]
pub enum StorageBackend {
    Memory(InMemoryRepository),
    File(FileRepository),
    Postgres(Arc<PostgresRepository>),
}

impl StorageBackend {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StorageBackend::Memory(_) => "memory",
            StorageBackend::File(_) => "file",
            StorageBackend::Postgres(_) => "postgres",
        }
    }

    /// Health check for the relational store, if that is the active backend.
    pub fn pinger(&self) -> Option<Arc<dyn Ping>> {
        match self {
            StorageBackend::Postgres(repo) => Some(Arc::clone(repo) as Arc<dyn Ping>),
            _ => None,
        }
    }
}

impl From<InMemoryRepository> for StorageBackend {
    fn from(repo: InMemoryRepository) -> Self {
        Self::Memory(repo)
    }
}

impl From<FileRepository> for StorageBackend {
    fn from(repo: FileRepository) -> Self {
        Self::File(repo)
    }
}

impl From<PostgresRepository> for StorageBackend {
    fn from(repo: PostgresRepository) -> Self {
        Self::Postgres(Arc::new(repo))
    }
}

#[async_trait]
impl Repository for StorageBackend {
    async fn save(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        match self {
            StorageBackend::Memory(repo) => repo.save(code, original_url).await,
            StorageBackend::File(repo) => repo.save(code, original_url).await,
            StorageBackend::Postgres(repo) => repo.save(code, original_url).await,
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<String> {
        match self {
            StorageBackend::Memory(repo) => repo.get(code).await,
            StorageBackend::File(repo) => repo.get(code).await,
            StorageBackend::Postgres(repo) => repo.get(code).await,
        }
    }
}
