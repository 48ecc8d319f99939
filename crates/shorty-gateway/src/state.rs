use std::sync::Arc;

use shorty_core::{Ping, Shortener};

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    pinger: Option<Arc<dyn Ping>>,
    base_url: String,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, public_base_url: impl Into<String>) -> Self {
        Self {
            shortener,
            pinger: None,
            base_url: public_base_url.into(),
        }
    }

    /// Attaches the database health check served on `/ping`.
    pub fn with_pinger(mut self, pinger: Option<Arc<dyn Ping>>) -> Self {
        self.pinger = pinger;
        self
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn pinger(&self) -> Option<&dyn Ping> {
        self.pinger.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
