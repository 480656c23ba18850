//! Road routes between cities.
//!
//! Resolves city names through the registry and plans a driving route via
//! the public OSRM API. When the router is unreachable the plan degrades
//! to a straight line with great-circle distance, so the map always has
//! something to draw.

mod client;

pub use client::{OsrmConfig, RoutePlanner, RoutingError};

use serde::{Deserialize, Serialize};

use crate::domain::Coordinates;

/// Mean radius of the Earth in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average road speed for fallback duration estimates.
const FALLBACK_SPEED_KMH: f64 = 50.0;

/// Where a route plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    /// Computed by the road router.
    Road,
    /// Straight-line fallback.
    StraightLine,
}

/// A planned route between two cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub origin: String,
    pub destination: String,
    pub origin_coords: Coordinates,
    pub destination_coords: Coordinates,
    pub distance_km: f64,
    pub duration_mins: f64,
    /// Polyline to draw, in travel order.
    pub geometry: Vec<Coordinates>,
    pub source: RouteSource,
}

/// Great-circle distance between two points in kilometres
/// (haversine formula).
///
/// # Examples
///
/// ```
/// use transit_server::domain::Coordinates;
/// use transit_server::routing::haversine_km;
///
/// let accra = Coordinates { lat: 5.6037, lng: -0.1870 };
/// let kumasi = Coordinates { lat: 6.6885, lng: -1.6244 };
///
/// let distance = haversine_km(&accra, &kumasi);
/// assert!(distance > 190.0 && distance < 210.0);
/// ```
pub fn haversine_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Straight-line fallback plan, with duration estimated at a fixed
/// average road speed.
pub(crate) fn straight_line_plan(
    origin: &str,
    destination: &str,
    from: Coordinates,
    to: Coordinates,
) -> RoutePlan {
    let distance_km = haversine_km(&from, &to);
    RoutePlan {
        origin: origin.to_string(),
        destination: destination.to_string(),
        origin_coords: from,
        destination_coords: to,
        distance_km,
        duration_mins: distance_km / FALLBACK_SPEED_KMH * 60.0,
        geometry: vec![from, to],
        source: RouteSource::StraightLine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accra() -> Coordinates {
        Coordinates {
            lat: 5.6037,
            lng: -0.1870,
        }
    }

    fn kumasi() -> Coordinates {
        Coordinates {
            lat: 6.6885,
            lng: -1.6244,
        }
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let d = haversine_km(&accra(), &accra());
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn haversine_is_symmetric() {
        let ab = haversine_km(&accra(), &kumasi());
        let ba = haversine_km(&kumasi(), &accra());
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn accra_kumasi_distance_is_plausible() {
        // Straight-line distance is just under 200 km
        let d = haversine_km(&accra(), &kumasi());
        assert!(d > 190.0 && d < 210.0, "got {d}");
    }

    #[test]
    fn straight_line_plan_connects_endpoints() {
        let plan = straight_line_plan("Accra", "Kumasi", accra(), kumasi());

        assert_eq!(plan.source, RouteSource::StraightLine);
        assert_eq!(plan.geometry.len(), 2);
        assert_eq!(plan.geometry[0], accra());
        assert_eq!(plan.geometry[1], kumasi());
        assert!(plan.duration_mins > 0.0);
    }

    #[test]
    fn plan_serializes_camel_case() {
        let plan = straight_line_plan("Accra", "Kumasi", accra(), kumasi());
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["source"], "straight_line");
        assert!(json["distanceKm"].is_number());
        assert!(json["originCoords"]["lat"].is_number());
    }
}
