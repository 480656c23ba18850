//! Bus schedule records.

use serde::{Deserialize, Serialize};

/// One scheduled intercity bus service.
///
/// Schedule data is read-only: the board supplies it, pages render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusSchedule {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub operator: String,
    /// Departure time as "HH:MM" local time.
    pub departure_time: String,
    /// Arrival time as "HH:MM" local time.
    pub arrival_time: String,
    pub fare: u32,
    pub currency: String,
    /// Intermediate stops in calling order.
    #[serde(default)]
    pub stops: Vec<String>,
    /// Display duration, e.g. "4h 30m".
    pub duration: String,
    pub status: String,
    pub bus_type: String,
    pub seats_available: u32,
}

impl BusSchedule {
    /// Display label for the route, e.g. "Accra → Kumasi".
    pub fn route_label(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_camel_case() {
        let json = r#"{
            "id": "acc-kum-001",
            "origin": "Accra",
            "destination": "Kumasi",
            "operator": "VIP Jeoun",
            "departureTime": "06:00",
            "arrivalTime": "10:30",
            "fare": 85,
            "currency": "GHS",
            "stops": ["Nsawam", "Nkawkaw"],
            "duration": "4h 30m",
            "status": "active",
            "busType": "AC Coach",
            "seatsAvailable": 15
        }"#;

        let schedule: BusSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.departure_time, "06:00");
        assert_eq!(schedule.bus_type, "AC Coach");
        assert_eq!(schedule.seats_available, 15);
        assert_eq!(schedule.stops, vec!["Nsawam", "Nkawkaw"]);
        assert_eq!(schedule.route_label(), "Accra → Kumasi");
    }
}
