//! HTTP gateway for the shorty URL shortener.
//!
//! Translates HTTP requests into calls on [`shorty_core::Shortener`] and
//! carries the process-edge concerns: configuration, logging and backend
//! selection.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod startup;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
