//! Target service configuration from environment variables
//!
//! - `CRASHLOOP_PORT`: TCP port to listen on (default: 5000)

use thiserror::Error;

/// Default port for the target service
pub const DEFAULT_PORT: u16 = 5000;

const PORT_ENV: &str = "CRASHLOOP_PORT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CRASHLOOP_PORT must be a port number between 1 and 65535, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_port_var(std::env::var(PORT_ENV).ok().as_deref())
    }

    fn from_port_var(value: Option<&str>) -> Result<Self, ConfigError> {
        let port = match value.map(str::trim) {
            None | Some("") => DEFAULT_PORT,
            Some(raw) => match raw.parse::<u16>() {
                Ok(0) | Err(_) => return Err(ConfigError::InvalidPort(raw.to_string())),
                Ok(port) => port,
            },
        };
        Ok(Self { port })
    }
}
