//! Weather HTTP client.
//!
//! Queries WeatherAPI.com for current conditions and short forecasts.
//! City queries are suffixed with ",Ghana" so ambiguous names resolve to
//! the Ghanaian city.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use super::error::WeatherError;
use super::types::{CurrentConditions, CurrentResponse, Forecast, ForecastResponse};

/// Default base URL for WeatherAPI.com.
const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// The free tier serves at most three forecast days.
const MAX_FORECAST_DAYS: u8 = 3;

/// Configuration for the weather client.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// API key, passed as a query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WeatherConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// WeatherAPI.com client.
///
/// Uses a semaphore to limit concurrent requests so multi-city fan-outs
/// stay inside the free-tier rate limit.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl WeatherClient {
    /// Create a new weather client with the given configuration.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Current conditions for a city.
    pub async fn current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let url = format!("{}/current.json", self.base_url);
        let query = format!("{city},Ghana");

        let body = self
            .request(&url, &[("q", query.as_str()), ("aqi", "no")])
            .await?;

        let response: CurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(response.into())
    }

    /// Forecast for a city. `days` is clamped to the free-tier range 1–3.
    pub async fn forecast(&self, city: &str, days: u8) -> Result<Forecast, WeatherError> {
        let url = format!("{}/forecast.json", self.base_url);
        let query = format!("{city},Ghana");
        let days = days.clamp(1, MAX_FORECAST_DAYS).to_string();

        let body = self
            .request(
                &url,
                &[("q", query.as_str()), ("days", days.as_str()), ("aqi", "no")],
            )
            .await?;

        let response: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(response.into())
    }

    /// Current conditions for several cities at once.
    ///
    /// Fans out concurrently (bounded by the semaphore) and returns a
    /// per-city result, so one failing city never sinks the batch.
    pub async fn current_many(
        &self,
        cities: &[String],
    ) -> Vec<(String, Result<CurrentConditions, WeatherError>)> {
        join_all(cities.iter().map(|city| async move {
            let result = self.current(city).await;
            (city.clone(), result)
        }))
        .await
    }

    async fn request(&self, url: &str, params: &[(&str, &str)]) -> Result<String, WeatherError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| WeatherError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(WeatherError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}
