//! Core types and traits for the shorty URL shortener.
//!
//! This crate provides the shared vocabulary used by the generator, the
//! storage backends, the shortener service and the HTTP gateway.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{ShortenerError, StorageError};
pub use repository::{Ping, Repository};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
