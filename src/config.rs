// src/config.rs
use std::net::SocketAddr;

use thiserror::Error;

use crate::services::openai::DEFAULT_BASE_URL;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),

    #[error("invalid bind address {0:?}")]
    InvalidAddress(String),
}

/// Startup settings. The API credential is not among them; it is resolved per request.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub openai_base_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let addr = format!("{host}:{port}");
        let bind_addr = addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))?;

        let openai_base_url = lookup("OPENAI_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { bind_addr, openai_base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(cfg.openai_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = ServerConfig::from_lookup(|name| match name {
            "HOST" => Some("127.0.0.1".into()),
            "PORT" => Some("9090".into()),
            "OPENAI_BASE_URL" => Some("http://localhost:1234/v1".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9090");
        assert_eq!(cfg.openai_base_url, "http://localhost:1234/v1");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = ServerConfig::from_lookup(|name| (name == "PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }
}
