//! OSRM routing client.

use serde::Deserialize;

use crate::domain::{Coordinates, city};

use super::{RoutePlan, RouteSource, straight_line_plan};

/// Default base URL for the public OSRM demo server (no key needed).
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Errors from route planning.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// The city is not in the registry; routing needs coordinates.
    #[error("unknown city: {0}")]
    UnknownCity(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Router returned an error status
    #[error("routing API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The router found no route between the points
    #[error("no route found")]
    NoRoute,
}

// OSRM response shapes (only the fields we read)

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Metres
    distance: f64,
    /// Seconds
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON LineString: [lng, lat] pairs
    coordinates: Vec<[f64; 2]>,
}

/// Configuration for the route planner.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL for the OSRM server
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Set a custom base URL (for testing or a self-hosted router).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

/// Plans driving routes between registry cities.
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    http: reqwest::Client,
    base_url: String,
}

impl RoutePlanner {
    /// Create a new route planner.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Plan a route between two cities.
    ///
    /// Unknown cities are a caller error. Once both cities resolve this
    /// never fails: a road-router failure degrades to the straight-line
    /// plan.
    pub async fn plan(&self, origin: &str, destination: &str) -> Result<RoutePlan, RoutingError> {
        let from = city::find(origin)
            .ok_or_else(|| RoutingError::UnknownCity(origin.to_string()))?
            .coordinates;
        let to = city::find(destination)
            .ok_or_else(|| RoutingError::UnknownCity(destination.to_string()))?
            .coordinates;

        match self.road_route(origin, destination, from, to).await {
            Ok(plan) => Ok(plan),
            Err(e) => {
                tracing::warn!(
                    origin,
                    destination,
                    error = %e,
                    "road routing failed, falling back to straight line"
                );
                Ok(straight_line_plan(origin, destination, from, to))
            }
        }
    }

    async fn road_route(
        &self,
        origin: &str,
        destination: &str,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<RoutePlan, RoutingError> {
        // OSRM takes lng,lat pairs
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url, from.lng, from.lat, to.lng, to.lat
        );

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: OsrmResponse = serde_json::from_str(&body).map_err(|e| RoutingError::Json {
            message: e.to_string(),
        })?;

        if parsed.code != "Ok" {
            return Err(RoutingError::NoRoute);
        }

        let route = parsed.routes.into_iter().next().ok_or(RoutingError::NoRoute)?;

        Ok(RoutePlan {
            origin: origin.to_string(),
            destination: destination.to_string(),
            origin_coords: from,
            destination_coords: to,
            distance_km: route.distance / 1000.0,
            duration_mins: route.duration / 60.0,
            geometry: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lng, lat]| Coordinates { lat, lng })
                .collect(),
            source: RouteSource::Road,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OsrmConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn config_with_base_url() {
        let config = OsrmConfig::default().with_base_url("http://localhost:5000");
        assert_eq!(config.base_url, "http://localhost:5000");
    }

    #[test]
    fn planner_creation() {
        assert!(RoutePlanner::new(OsrmConfig::default()).is_ok());
    }

    #[test]
    fn osrm_response_parses() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 251234.5,
                "duration": 14520.0,
                "geometry": {
                    "coordinates": [[-0.187, 5.6037], [-1.0, 6.0], [-1.6244, 6.6885]],
                    "type": "LineString"
                },
                "legs": []
            }],
            "waypoints": []
        }"#;

        let parsed: OsrmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.code, "Ok");
        assert_eq!(parsed.routes.len(), 1);
        assert_eq!(parsed.routes[0].geometry.coordinates.len(), 3);
    }

    #[test]
    fn osrm_error_code_means_no_route() {
        let json = r#"{ "code": "NoRoute", "routes": [] }"#;
        let parsed: OsrmResponse = serde_json::from_str(json).unwrap();
        assert_ne!(parsed.code, "Ok");
    }

    #[tokio::test]
    async fn unknown_city_is_a_caller_error() {
        let planner = RoutePlanner::new(OsrmConfig::default()).unwrap();
        let err = planner.plan("Atlantis", "Accra").await.unwrap_err();
        assert!(matches!(err, RoutingError::UnknownCity(_)));
    }
}
