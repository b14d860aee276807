use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::model::WeatherSnapshot;

use super::{FetchError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

/// HTTP client for the WeatherAPI.com current-conditions endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Point the provider at a different host. Tests use this to talk to a
    /// local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_current(&self, query: &str) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/v1/current.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", query)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WaResponse = serde_json::from_str(&body)?;

        let ts = parsed.current.last_updated_epoch.or(parsed.location.localtime_epoch);
        let observation_time = ts.and_then(unix_to_utc).unwrap_or_else(Utc::now);

        Ok(WeatherSnapshot {
            location_name: parsed.location.name,
            temp_c: parsed.current.temp_c,
            feelslike_c: parsed.current.feelslike_c,
            condition: parsed.current.condition.text,
            condition_icon: parsed.current.condition.icon,
            humidity_pct: parsed.current.humidity,
            wind_kph: parsed.current.wind_kph,
            observation_time,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    localtime_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    wind_kph: f64,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, query: &str) -> Result<WeatherSnapshot, FetchError> {
        self.fetch_current(query).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lahore_fixture() -> serde_json::Value {
        serde_json::json!({
            "location": {"name": "Lahore", "localtime_epoch": 1_700_000_000},
            "current": {
                "temp_c": 30.0,
                "feelslike_c": 33.0,
                "condition": {
                    "text": "Sunny",
                    "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png"
                },
                "humidity": 40,
                "wind_kph": 10.0,
                "last_updated_epoch": 1_700_000_000
            }
        })
    }

    #[tokio::test]
    async fn maps_current_conditions_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .and(query_param("key", "KEY"))
            .and(query_param("q", "Pakistan"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lahore_fixture()))
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::new("KEY".to_string()).with_base_url(server.uri());
        let snap = provider.current("Pakistan").await.expect("fetch should succeed");

        assert_eq!(snap.location_name, "Lahore");
        assert_eq!(snap.temp_c, 30.0);
        assert_eq!(snap.feelslike_c, 33.0);
        assert_eq!(snap.condition, "Sunny");
        assert_eq!(snap.humidity_pct, 40);
        assert_eq!(snap.wind_kph, 10.0);
        assert_eq!(snap.icon_code(), Some(113));
        assert_eq!(snap.observation_time, unix_to_utc(1_700_000_000).unwrap());
    }

    #[tokio::test]
    async fn non_2xx_status_is_a_fetch_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":{"code":1006}}"#),
            )
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::new("KEY".to_string()).with_base_url(server.uri());
        let err = provider.current("Nowhereistan").await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 400));
    }

    #[tokio::test]
    async fn undecodable_body_is_a_fetch_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::new("KEY".to_string()).with_base_url(server.uri());
        let err = provider.current("Pakistan").await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }
}
