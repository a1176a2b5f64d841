//! Server configuration.
//!
//! Loading order: `.env` file (when requested), then an optional config file
//! (toml/yaml/json by extension), then environment variables on top. Nested
//! keys use `__` as the separator in the environment.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    NotFound(PathBuf),
    /// Failed to parse or deserialize configuration.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "config file not found: {}", path.display()),
            Self::Parse(msg) => write!(f, "failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Builder over dotenv, config file, and environment sources.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    load_default_dotenv: bool,
    config_file: Option<PathBuf>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load environment variables from a `.env` file in the current
    /// directory before reading anything else. Missing files are ignored.
    pub fn with_dotenv(mut self) -> Self {
        self.load_default_dotenv = true;
        self
    }

    /// Load a toml/yaml/json config file. Environment variables still
    /// override its values.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn build<C: DeserializeOwned>(self) -> Result<C, ConfigError> {
        if self.load_default_dotenv {
            let _ = dotenvy::dotenv();
        }

        let mut builder = config::Config::builder();

        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            builder = builder.add_source(config::File::from(path.as_path()));
        }

        builder
            .add_source(config::Environment::default().separator("__").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// gRPC server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// TCP keepalive interval in seconds.
    pub tcp_keepalive_secs: Option<u64>,
    pub tcp_nodelay: bool,
    /// Outbound buffer capacity for the bidirectional greeting stream.
    pub stream_buffer_size: usize,
}

impl Default for GrpcServerConfig {
    fn default() -> Self {
        Self {
            host: "[::1]".to_string(),
            port: 50051,
            request_timeout_secs: 30,
            tcp_keepalive_secs: Some(60),
            tcp_nodelay: true,
            stream_buffer_size: 16,
        }
    }
}

impl GrpcServerConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.addr().parse()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn tcp_keepalive(&self) -> Option<Duration> {
        self.tcp_keepalive_secs.map(Duration::from_secs)
    }
}
