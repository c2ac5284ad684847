// src/state.rs
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::client_provider::{ClientProvider, EnvClientProvider};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub provider: Arc<dyn ClientProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ClientProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &ServerConfig) -> reqwest::Result<Self> {
        let provider = EnvClientProvider::new(config.openai_base_url.clone())?;
        Ok(Self::new(Arc::new(provider)))
    }
}
