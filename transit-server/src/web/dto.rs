//! Request and response types for the JSON API.

use serde::{Deserialize, Serialize};

use crate::domain::{BusSchedule, PassengerApplication};

/// Query parameters for schedule listing.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Query parameters for current weather.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: String,
}

/// Query parameters for a forecast.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub city: String,
    pub days: Option<u8>,
}

/// Query parameters for route planning.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
}

/// Dashboard filter parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PassengerQuery {
    /// Free-text search over name, phone and route
    pub search: Option<String>,
    /// Exact status match
    pub status: Option<String>,
    /// Exact route label match, e.g. "Accra → Kumasi"
    pub route: Option<String>,
}

impl PassengerQuery {
    /// Whether `record` passes every active filter. Empty parameters are
    /// inactive, matching the dashboard's "All" options.
    pub fn matches(&self, record: &PassengerApplication) -> bool {
        let route = record.route_label();

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = record.name.to_lowercase().contains(&needle)
                || record.phone.contains(search)
                || route.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty())
            && record.status.as_str() != status
        {
            return false;
        }

        if let Some(wanted) = self.route.as_deref().filter(|s| !s.is_empty())
            && route != wanted
        {
            return false;
        }

        true
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response to a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub application: PassengerApplication,
}

/// Schedule listing response.
#[derive(Debug, Serialize)]
pub struct ScheduleListResponse {
    pub schedules: Vec<BusSchedule>,
}

/// Application listing response.
#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub total: usize,
    pub applications: Vec<PassengerApplication>,
}

/// Response to a clear-all request.
#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub cleared: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationStatus, TimeSlot};

    fn record(name: &str, phone: &str, origin: &str, destination: &str) -> PassengerApplication {
        PassengerApplication {
            id: "1".into(),
            name: name.into(),
            phone: phone.into(),
            email: String::new(),
            origin: origin.into(),
            destination: destination.into(),
            date: "2024-06-01".into(),
            time: TimeSlot::Any,
            alerts: false,
            notes: String::new(),
            submitted_at: "2024-06-01T08:30:00Z".parse().unwrap(),
            status: ApplicationStatus::Pending,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = PassengerQuery::default();
        assert!(query.matches(&record("Ama", "+233200000001", "Accra", "Kumasi")));
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let query = PassengerQuery {
            search: Some("ama".into()),
            ..Default::default()
        };
        assert!(query.matches(&record("Ama Mensah", "+233200000001", "Accra", "Kumasi")));
        assert!(!query.matches(&record("Kofi", "+233200000001", "Accra", "Kumasi")));
    }

    #[test]
    fn search_matches_phone_and_route() {
        let by_phone = PassengerQuery {
            search: Some("0000001".into()),
            ..Default::default()
        };
        assert!(by_phone.matches(&record("Ama", "+233200000001", "Accra", "Kumasi")));

        let by_route = PassengerQuery {
            search: Some("kumasi".into()),
            ..Default::default()
        };
        assert!(by_route.matches(&record("Ama", "+233200000001", "Accra", "Kumasi")));
        assert!(!by_route.matches(&record("Ama", "+233200000001", "Accra", "Tamale")));
    }

    #[test]
    fn status_filter_is_exact() {
        let query = PassengerQuery {
            status: Some("Confirmed".into()),
            ..Default::default()
        };
        assert!(!query.matches(&record("Ama", "+233200000001", "Accra", "Kumasi")));
    }

    #[test]
    fn route_filter_is_exact() {
        let query = PassengerQuery {
            route: Some("Accra → Kumasi".into()),
            ..Default::default()
        };
        assert!(query.matches(&record("Ama", "+233200000001", "Accra", "Kumasi")));
        assert!(!query.matches(&record("Ama", "+233200000001", "Kumasi", "Accra")));
    }

    #[test]
    fn empty_strings_are_inactive_filters() {
        let query = PassengerQuery {
            search: Some(String::new()),
            status: Some(String::new()),
            route: Some(String::new()),
        };
        assert!(query.matches(&record("Ama", "+233200000001", "Accra", "Kumasi")));
    }
}
