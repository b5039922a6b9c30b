//! Centralized configuration management for vidcat

use std::path::PathBuf;
use anyhow::{Result, Context};

use crate::api::Endpoints;
use crate::controller::ResponseOrdering;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Auth and catalog service addresses
    pub endpoints: EndpointConfig,
    /// Path to the SQLite file holding the persisted session
    pub session_db_path: PathBuf,
    /// File the TUI writes its log to
    pub log_file: PathBuf,
    /// How overlapping listing responses are reconciled
    pub response_ordering: ResponseOrdering,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// Remote service addresses
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub auth_url: String,
    pub catalog_url: String,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// User agent string
    pub user_agent: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            auth_url: Endpoints::AUTH_URL.to_string(),
            catalog_url: Endpoints::CATALOG_URL.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "vidcat/0.1.0".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let endpoints = EndpointConfig {
            auth_url: std::env::var("VIDCAT_AUTH_URL")
                .unwrap_or_else(|_| Endpoints::AUTH_URL.to_string()),
            catalog_url: std::env::var("VIDCAT_CATALOG_URL")
                .unwrap_or_else(|_| Endpoints::CATALOG_URL.to_string()),
        };

        let session_db_path = std::env::var("VIDCAT_SESSION_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_db_path());

        let log_file = std::env::var("VIDCAT_LOG_FILE")
            .unwrap_or_else(|_| "vidcat.log".to_string())
            .into();

        let response_ordering = parse_env_var("VIDCAT_RESPONSE_ORDERING")?.unwrap_or_default();

        let http = HttpConfig {
            user_agent: std::env::var("VIDCAT_USER_AGENT")
                .unwrap_or_else(|_| "vidcat/0.1.0".to_string()),
        };

        Ok(Config {
            endpoints,
            session_db_path,
            log_file,
            response_ordering,
            http,
        })
    }

    /// Get session database path as string
    pub fn session_db_path_str(&self) -> &str {
        self.session_db_path.to_str().unwrap_or("./vidcat-session.db")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("auth", &self.endpoints.auth_url),
            ("catalog", &self.endpoints.catalog_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("Invalid {} endpoint URL: {}", name, url));
            }
        }

        Ok(())
    }

    /// Create the directory the session database lives in.
    pub fn ensure_session_dir(&self) -> Result<()> {
        if let Some(parent) = self.session_db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Cannot create session directory: {}", parent.display())
                })?;
            }
        }

        Ok(())
    }
}

fn default_session_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("vidcat").join("session.db"))
        .unwrap_or_else(|| PathBuf::from("./vidcat-session.db"))
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
