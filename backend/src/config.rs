//! Application configuration.
//!
//! Service metadata and the CORS policy are static. Only the bind address can be
//! changed at runtime, through `HOST` and `PORT`.

use std::env;
use std::net::SocketAddr;

/// Application version, reported by `/`, `/health` and the API document.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_TITLE: &str = "Items API";
pub const APP_DESCRIPTION: &str = "A simple items service with CRUD endpoints and interactive documentation";

/// Prefix of all item routes.
pub const API_PREFIX: &str = "/api";

/// Swagger UI location.
pub const DOCS_PATH: &str = "/docs";
/// Generated OpenAPI document location.
pub const OPENAPI_PATH: &str = "/openapi.json";
/// Static landing page location.
pub const LANDING_PAGE_PATH: &str = "/index.html";
pub const HEALTH_PATH: &str = "/health";

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Cross-origin policy. A `"*"` entry permits everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsSettings {
    pub allow_origins: Vec<String>,
    pub allow_credentials: bool,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allow_origins: vec!["*".to_string()],
            allow_credentials: true,
            allow_methods: vec!["*".to_string()],
            allow_headers: vec!["*".to_string()],
        }
    }
}

impl CorsSettings {
    pub fn any_origin(&self) -> bool {
        is_wildcard(&self.allow_origins)
    }

    pub fn any_method(&self) -> bool {
        is_wildcard(&self.allow_methods)
    }

    pub fn any_header(&self) -> bool {
        is_wildcard(&self.allow_headers)
    }
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),
    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),
}

/// Server bind settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Load server settings from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` (optional, default: 0.0.0.0)
    /// - `PORT` (optional, default: 8000)
    ///
    /// # Errors
    /// Returns an error if `PORT` is set but not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }

    /// Socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().unwrap().port(), 8000);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[("HOST", "127.0.0.1"), ("PORT", "9090")]))
            .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref p) if p == "eighty"));
    }

    #[test]
    fn test_invalid_host() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            port: 1,
        };
        assert!(matches!(config.socket_addr(), Err(ConfigError::InvalidAddress(_))));
    }

    #[test]
    fn test_default_cors_is_permissive_with_credentials() {
        let cors = CorsSettings::default();
        assert!(cors.any_origin() && cors.any_method() && cors.any_header());
        assert!(cors.allow_credentials);
    }

    #[test]
    fn test_version_matches_crate() {
        assert_eq!(VERSION, "1.0.0");
    }
}
