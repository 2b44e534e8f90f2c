use std::{env, time::Duration};

use url::Url;

use crate::{Error, Result};

/// Connection settings for the reports API, injected into the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Option<Duration>,
}

impl ApiConfig {
    /// Base URL used when nothing else is configured.
    pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
    /// Environment variable holding the base URL.
    pub const ENV_BASE_URL: &str = "FIXMYBLOCK_API_URL";
    /// Environment variable holding the request timeout in whole seconds.
    pub const ENV_TIMEOUT_SECS: &str = "FIXMYBLOCK_TIMEOUT_SECS";

    /// Build a configuration for the API rooted at `base_url`, e.g.
    /// `http://localhost:5000/api`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("base URL `{base_url}`: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL `{base_url}` cannot have path segments"
            )));
        }

        Ok(Self {
            base_url,
            timeout: None,
        })
    }

    /// Read the configuration from `FIXMYBLOCK_API_URL` and
    /// `FIXMYBLOCK_TIMEOUT_SECS`, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var(Self::ENV_BASE_URL).unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let config = Self::new(&base_url)?;

        match env::var(Self::ENV_TIMEOUT_SECS) {
            Ok(secs) => {
                let secs: u64 = secs.trim().parse().map_err(|_| {
                    Error::Config(format!("{} must be whole seconds", Self::ENV_TIMEOUT_SECS))
                })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            Err(_) => Ok(config),
        }
    }

    /// Abort requests that take longer than `timeout`. Without this only the
    /// transport's own defaults apply.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The URL of `segments` below the base URL. Segments are percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(Self::DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: None,
        }
    }
}
