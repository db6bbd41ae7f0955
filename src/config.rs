// SPDX-License-Identifier: PMPL-1.0-or-later

//! Client configuration.

use std::time::Duration;

use crate::error::{OmnibaseError, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the endpoint URL.
pub const ENV_API_URL: &str = "OMNIBASE_API_URL";
/// Environment variable holding the access key.
pub const ENV_ACCESS_KEY: &str = "OMNIBASE_ACCESS_KEY";
/// Environment variable overriding the timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "OMNIBASE_TIMEOUT_SECS";

/// Connection parameters for [`crate::client::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint URL every action payload is POSTed to.
    pub api_url: String,
    /// Access key sent in the `X-OMNIBASE-ACCESS-KEY` header.
    pub access_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a configuration with the default timeout.
    pub fn new(api_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            access_key: access_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`OmnibaseError::Validation`] when a required variable is
    /// unset or `OMNIBASE_TIMEOUT_SECS` is not an integer.
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var(ENV_API_URL)
            .map_err(|_| OmnibaseError::Validation(format!("{ENV_API_URL} is not set")))?;
        let access_key = std::env::var(ENV_ACCESS_KEY)
            .map_err(|_| OmnibaseError::Validation(format!("{ENV_ACCESS_KEY} is not set")))?;

        let mut config = Self::new(api_url, access_key);
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| {
                OmnibaseError::Validation(format!("{ENV_TIMEOUT_SECS} must be an integer"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
