//! Storage backends for the shorty URL shortener.
//!
//! Every backend implements [`shorty_core::Repository`] with the same
//! semantics: a short code is stored at most once, a duplicate save yields
//! `AlreadyExists` and a miss yields `NotFound`.

pub mod backend;
pub mod file;
pub mod memory;
pub mod postgres;

pub use backend::StorageBackend;
pub use file::{FileRecord, FileRepository};
pub use memory::InMemoryRepository;
pub use postgres::{PostgresConfig, PostgresRepository};
pub use shorty_core::{Ping, Repository, StorageError};
