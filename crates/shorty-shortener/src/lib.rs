//! URL shortener service implementation.
//!
//! This crate wires a [`Generator`](shorty_generator::Generator) and a
//! [`Repository`](shorty_core::Repository) into the
//! [`Shortener`](shorty_core::Shortener) contract. Core types are re-exported
//! from `shorty_core`.

pub mod service;

pub use service::ShortenerService;
pub use shorty_core::{ShortCode, Shortener, ShortenerError};
