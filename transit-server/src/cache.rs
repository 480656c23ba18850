//! Caching layer for weather lookups.
//!
//! Every schedules-page render wants conditions for the whole city
//! registry, and the free weather tier is rate limited. Conditions move
//! slowly, so a short TTL cache absorbs nearly all of the traffic.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::weather::{CurrentConditions, Forecast, WeatherClient, WeatherError};

/// Configuration for the weather cache.
#[derive(Debug, Clone)]
pub struct WeatherCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for WeatherCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 64,
        }
    }
}

/// Weather client with caching.
///
/// Wraps a `WeatherClient` and caches current conditions per city and
/// forecasts per (city, days). Keys are lowercased so "Accra" and "accra"
/// share an entry.
pub struct CachedWeatherClient {
    client: WeatherClient,
    current: MokaCache<String, Arc<CurrentConditions>>,
    forecasts: MokaCache<(String, u8), Arc<Forecast>>,
}

impl CachedWeatherClient {
    /// Create a new cached client.
    pub fn new(client: WeatherClient, config: &WeatherCacheConfig) -> Self {
        let current = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let forecasts = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            current,
            forecasts,
        }
    }

    /// Current conditions for a city, using the cache if fresh.
    pub async fn current(&self, city: &str) -> Result<Arc<CurrentConditions>, WeatherError> {
        let key = city.to_lowercase();

        if let Some(cached) = self.current.get(&key).await {
            return Ok(cached);
        }

        let conditions = Arc::new(self.client.current(city).await?);
        self.current.insert(key, conditions.clone()).await;

        Ok(conditions)
    }

    /// Forecast for a city, using the cache if fresh.
    pub async fn forecast(&self, city: &str, days: u8) -> Result<Arc<Forecast>, WeatherError> {
        let key = (city.to_lowercase(), days);

        if let Some(cached) = self.forecasts.get(&key).await {
            return Ok(cached);
        }

        let forecast = Arc::new(self.client.forecast(city, days).await?);
        self.forecasts.insert(key, forecast.clone()).await;

        Ok(forecast)
    }

    /// Current conditions for several cities. Failed lookups are logged
    /// and reported as `None`; weather is display-only.
    pub async fn current_many(&self, cities: &[String]) -> Vec<(String, Option<Arc<CurrentConditions>>)> {
        let mut results = Vec::with_capacity(cities.len());
        let mut misses = Vec::new();

        for city in cities {
            match self.current.get(&city.to_lowercase()).await {
                Some(cached) => results.push((city.clone(), Some(cached))),
                None => misses.push(city.clone()),
            }
        }

        for (city, result) in self.client.current_many(&misses).await {
            match result {
                Ok(conditions) => {
                    let conditions = Arc::new(conditions);
                    self.current
                        .insert(city.to_lowercase(), conditions.clone())
                        .await;
                    results.push((city, Some(conditions)));
                }
                Err(e) => {
                    tracing::warn!(city = %city, error = %e, "weather lookup failed");
                    results.push((city, None));
                }
            }
        }

        results
    }

    /// Number of cached current-conditions entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.current.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.current.invalidate_all();
        self.forecasts.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::WeatherConfig;

    #[test]
    fn default_config() {
        let config = WeatherCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_capacity, 64);
    }

    #[test]
    fn cache_starts_empty() {
        let client = WeatherClient::new(WeatherConfig::new("test-key")).unwrap();
        let cached = CachedWeatherClient::new(client, &WeatherCacheConfig::default());
        assert_eq!(cached.entry_count(), 0);
    }
}
