use crate::{Config, WeatherSnapshot, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// The one failure kind a fetch cycle can end in.
///
/// The variants carry diagnostic detail; callers treat every failure the
/// same way (log it, keep the previous snapshot).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode weather provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for a query string (country or region name).
    ///
    /// Unknown or malformed queries are the provider's business; they come
    /// back as a plain [`FetchError`] like any other failure.
    async fn current(&self, query: &str) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the production provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key()?;
    Ok(Box::new(WeatherApiProvider::new(api_key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_works_when_key_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
