//! Target address validation
//!
//! The driver takes a bare host or IP (optionally `host:port`) and always
//! talks plain HTTP to it.

use super::error::DriverError;
use reqwest::Url;
use std::fmt;
use std::str::FromStr;

/// A validated target, e.g. `10.0.0.12` or `lb.internal:8080`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    base_url: Url,
}

impl Target {
    pub fn parse(address: &str) -> Result<Self, DriverError> {
        let address = address.trim();
        let invalid = |reason: &str| DriverError::InvalidTarget {
            address: address.to_string(),
            reason: reason.to_string(),
        };

        if address.is_empty() {
            return Err(invalid("address is empty"));
        }
        if address.contains("://") {
            return Err(invalid("expected a host or IP without a scheme"));
        }

        let base_url =
            Url::parse(&format!("http://{}", address)).map_err(|e| invalid(&e.to_string()))?;

        if base_url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host"));
        }
        if base_url.path() != "/"
            || base_url.query().is_some()
            || base_url.fragment().is_some()
            || !base_url.username().is_empty()
            || base_url.password().is_some()
        {
            return Err(invalid("expected only a host and optional port"));
        }

        Ok(Self { base_url })
    }

    /// Base URL without trailing slash, e.g. `http://10.0.0.12`
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Full URL for an absolute path on the target
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl FromStr for Target {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_url())
    }
}
