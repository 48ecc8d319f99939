use anyhow::Context;
use shorty_storage::{
    FileRepository, InMemoryRepository, PostgresConfig, PostgresRepository, StorageBackend,
};
use tracing::info;

use crate::cli::StorageChoice;

/// Builds the storage backend selected by configuration.
///
/// Any failure here is fatal: a corrupt log or an unreachable database
/// must stop the process before it starts serving.
pub async fn init_storage(choice: StorageChoice) -> anyhow::Result<StorageBackend> {
    let backend = match choice {
        StorageChoice::Postgres(dsn) => {
            let config = PostgresConfig::builder().dsn(dsn).build();
            let repository = PostgresRepository::connect(&config)
                .await
                .context("failed to connect to postgres")?;
            repository
                .ensure_schema()
                .await
                .context("failed to prepare the urls table")?;
            StorageBackend::from(repository)
        }
        StorageChoice::File(path) => {
            let repository = FileRepository::open(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            StorageBackend::from(repository)
        }
        StorageChoice::Memory => StorageBackend::from(InMemoryRepository::new()),
    };

    info!(storage_backend = backend.kind(), "storage initialized");
    Ok(backend)
}
