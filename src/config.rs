//! Client configuration.
//!
//! Shaped so host applications can embed it in their own TOML config
//! (every field has a default except the read token, which is validated
//! non-empty at client construction). The core never reads environment
//! variables.

use serde::Deserialize;

use crate::error::OptionsError;

/// Base URL of the V1 API.
pub const BASE_URL: &str = "https://api.purpleair.com/v1";

/// Header carrying the credential token.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Configuration for a [`crate::Client`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential for the read operations.
    pub read_token: String,
    /// Credential for write operations. Carried for callers that manage
    /// both tokens in one place; no write operation is exposed.
    pub write_token: Option<String>,
    /// API base URL, without a trailing slash.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_token: String::new(),
            write_token: None,
            base_url: BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Configuration with the given read token and default base URL.
    pub fn new(read_token: impl Into<String>) -> Self {
        Self {
            read_token: read_token.into(),
            ..Self::default()
        }
    }

    /// Attach a write token.
    #[must_use]
    pub fn with_write_token(mut self, write_token: impl Into<String>) -> Self {
        self.write_token = Some(write_token.into());
        self
    }

    /// Override the API base URL (no trailing slash).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::EmptyReadToken`] when the read token is
    /// empty.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.read_token.is_empty() {
            return Err(OptionsError::EmptyReadToken);
        }
        Ok(())
    }
}
