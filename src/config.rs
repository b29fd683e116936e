use std::fmt;

use crate::{NovuError, Result};

/// Base URL of the hosted Novu API.
pub const DEFAULT_BASE_URL: &str = "https://api.novu.co";

/// Endpoint configuration: which Novu instance to call and with which key.
///
/// Built once and handed to every [`Api`](crate::Api) that needs it.
#[derive(Clone, PartialEq, Eq)]
pub struct NovuConfig {
    base_url: String,
    api_key: String,
}

impl fmt::Debug for NovuConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NovuConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl NovuConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads:
    /// - `NOVU_API_KEY` — secret API key (required)
    /// - `NOVU_BASE_URL` — API base URL, defaults to [`DEFAULT_BASE_URL`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use novu_http::NovuConfig;
    ///
    /// let config = NovuConfig::from_env().expect("missing NOVU_API_KEY");
    /// ```
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("NOVU_API_KEY").map_err(|_| {
            NovuError::Config("missing NOVU_API_KEY environment variable".to_owned())
        })?;
        if api_key.trim().is_empty() {
            return Err(NovuError::Config(
                "NOVU_API_KEY is set but empty".to_owned(),
            ));
        }

        let base_url = match std::env::var("NOVU_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_BASE_URL.to_owned(),
        };
        Ok(Self::new(base_url, api_key.trim()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Value of the `Authorization` header sent with every request.
    pub fn authorization(&self) -> String {
        format!("ApiKey {}", self.api_key)
    }

    /// Joins the base URL with a resource path.
    ///
    /// Example: `"/v1/subscribers"` → `"https://api.novu.co/v1/subscribers"`
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() {
            return base.to_owned();
        }
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
