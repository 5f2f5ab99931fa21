//! Configuration module
//!
//! Connection settings for the deal service API. Values come from the
//! environment (optionally via a `.env` file) and can be overridden by the CLI.

use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://127.0.0.1:1288/rpc/v0";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Deal service connection settings
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub api_url: String,
    /// Bearer token sent with every RPC call, if set
    pub api_token: Option<String>,
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Load from DEALPORT_API_URL (or BOOST_API_URL), DEALPORT_API_TOKEN (or
    /// BOOST_API_TOKEN) and DEALPORT_API_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let api_url = env::var("DEALPORT_API_URL")
            .or_else(|_| env::var("BOOST_API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let api_token = env::var("DEALPORT_API_TOKEN")
            .or_else(|_| env::var("BOOST_API_TOKEN"))
            .ok()
            .filter(|t| !t.is_empty());

        let timeout_secs = match env::var("DEALPORT_API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                anyhow::anyhow!("DEALPORT_API_TIMEOUT_SECS must be a number of seconds: {}", e)
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            api_url,
            api_token,
            request_timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, api_url: Option<String>, api_token: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(token) = api_token {
            self.api_token = Some(token);
        }
        self
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            anyhow::bail!("API URL must be an http(s) URL, got '{}'", self.api_url);
        }
        if self.request_timeout.is_zero() {
            anyhow::bail!("API request timeout must be greater than zero");
        }
        Ok(())
    }
}
