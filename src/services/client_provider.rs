// src/services/client_provider.rs
use std::sync::Arc;

use super::openai::{ChatCompletion, OpenAiClient, build_http_client};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Hands out an upstream client per request, or `None` when no credential is available.
pub trait ClientProvider: Send + Sync {
    fn get_client(&self) -> Option<Box<dyn ChatCompletion>>;
}

/// Only an unset or empty value counts as absent; whitespace is passed through.
pub fn resolve_credential<F>(lookup: F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.is_empty())
}

pub fn process_env() -> EnvLookup {
    Arc::new(|name: &str| std::env::var(name).ok())
}

/// Reads the credential on every call so a key injected after startup is picked up.
#[derive(Clone)]
pub struct EnvClientProvider {
    lookup: EnvLookup,
    base_url: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for EnvClientProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvClientProvider")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl EnvClientProvider {
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        Ok(Self {
            lookup: process_env(),
            base_url: base_url.into(),
            http: build_http_client()?,
        })
    }

    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.lookup = Arc::new(lookup);
        self
    }

    pub fn credential(&self) -> Option<String> {
        resolve_credential(|name| (self.lookup)(name), API_KEY_VAR)
    }
}

impl ClientProvider for EnvClientProvider {
    fn get_client(&self) -> Option<Box<dyn ChatCompletion>> {
        let key = self.credential()?;
        Some(Box::new(OpenAiClient::new(self.http.clone(), key, &self.base_url)))
    }
}
