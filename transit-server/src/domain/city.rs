//! City registry for the Ghana intercity network.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair (WGS 84 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Geographic centre of Ghana, used as the map fallback for unknown cities.
pub const GHANA_CENTER: Coordinates = Coordinates {
    lat: 7.9465,
    lng: -1.0232,
};

/// A city served by the intercity network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityInfo {
    pub name: &'static str,
    /// Full display address, used when geocoding or labelling the map.
    pub address: &'static str,
    pub coordinates: Coordinates,
}

/// The cities currently served.
pub fn cities() -> &'static [CityInfo] {
    const CITIES: &[CityInfo] = &[
        CityInfo {
            name: "Accra",
            address: "Accra, Ghana",
            coordinates: Coordinates {
                lat: 5.6037,
                lng: -0.1870,
            },
        },
        CityInfo {
            name: "Kumasi",
            address: "Kumasi, Ghana",
            coordinates: Coordinates {
                lat: 6.6885,
                lng: -1.6244,
            },
        },
        CityInfo {
            name: "Sunyani",
            address: "Sunyani, Ghana",
            coordinates: Coordinates {
                lat: 7.3349,
                lng: -2.3123,
            },
        },
        CityInfo {
            name: "Tamale",
            address: "Tamale, Ghana",
            coordinates: Coordinates {
                lat: 9.4008,
                lng: -0.8393,
            },
        },
    ];
    CITIES
}

/// Look up a city by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static CityInfo> {
    cities().iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Coordinates for a city, falling back to the centre of Ghana.
pub fn coordinates(name: &str) -> Coordinates {
    find(name).map(|c| c.coordinates).unwrap_or(GHANA_CENTER)
}

/// City names in registry order, for form dropdowns.
pub fn city_names() -> Vec<String> {
    cities().iter().map(|c| c.name.to_string()).collect()
}
