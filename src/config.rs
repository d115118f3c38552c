use std::fmt;

use crate::{Result, SiteflowError};

/// Production API host used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://pro-api.oneflowcloud.com";

/// Credentials and endpoint for one client instance.
///
/// Set once when the client is built and read by every signing operation.
#[derive(Clone, PartialEq, Eq)]
pub struct SiteflowConfig {
    pub(crate) token: String,
    pub(crate) secret: String,
    pub(crate) base_url: String,
}

impl fmt::Debug for SiteflowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteflowConfig")
            .field("token", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SiteflowConfig {
    /// Creates a config pointing at [`DEFAULT_BASE_URL`].
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Overrides the API base URL. A trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim().trim_end_matches('/').to_owned();
        self
    }

    /// Creates a config from environment variables.
    ///
    /// Reads:
    /// - `SITEFLOW_TOKEN` — API token
    /// - `SITEFLOW_SECRET` — HMAC signing secret
    /// - `SITEFLOW_BASE_URL` — optional; defaults to [`DEFAULT_BASE_URL`]
    ///
    /// Returns an error if the token or secret is missing or empty.
    pub fn from_env() -> Result<Self> {
        let token = required_env("SITEFLOW_TOKEN")?;
        let secret = required_env("SITEFLOW_SECRET")?;
        let config = Self::new(token, secret);
        match std::env::var("SITEFLOW_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => Ok(config.with_base_url(url)),
            _ => Ok(config),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a resource path.
    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn required_env(name: &str) -> Result<String> {
    let value = std::env::var(name)
        .map_err(|_| SiteflowError::Config(format!("missing {name} environment variable")))?;
    if value.trim().is_empty() {
        return Err(SiteflowError::Config(format!("{name} is set but empty")));
    }
    Ok(value)
}
