//! Bus schedule board.
//!
//! Supplies the ordered list of intercity services shown on the schedules
//! page. The data is the operator's published timetable, bundled with the
//! server; a future version would fetch it from a backend. Read-only:
//! pages query it, nothing writes it.

use crate::domain::BusSchedule;

/// An ordered, read-only collection of bus schedules.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBoard {
    schedules: Vec<BusSchedule>,
}

impl ScheduleBoard {
    /// Create a board from an ordered schedule list.
    pub fn new(schedules: Vec<BusSchedule>) -> Self {
        Self { schedules }
    }

    /// All schedules in board order.
    pub fn all(&self) -> &[BusSchedule] {
        &self.schedules
    }

    /// Schedules matching the optional origin/destination filters, in
    /// board order. An empty filter matches everything.
    pub fn filter(&self, origin: Option<&str>, destination: Option<&str>) -> Vec<BusSchedule> {
        self.schedules
            .iter()
            .filter(|s| origin.is_none_or(|o| s.origin == o))
            .filter(|s| destination.is_none_or(|d| s.destination == d))
            .cloned()
            .collect()
    }

    /// Distinct origin cities, sorted, for filter dropdowns.
    pub fn origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = self.schedules.iter().map(|s| s.origin.clone()).collect();
        origins.sort();
        origins.dedup();
        origins
    }

    /// Distinct destination cities, sorted, for filter dropdowns.
    pub fn destinations(&self) -> Vec<String> {
        let mut destinations: Vec<String> = self
            .schedules
            .iter()
            .map(|s| s.destination.clone())
            .collect();
        destinations.sort();
        destinations.dedup();
        destinations
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// The bundled Ghana intercity network.
    pub fn ghana_network() -> Self {
        fn schedule(
            id: &str,
            origin: &str,
            destination: &str,
            operator: &str,
            departure: &str,
            arrival: &str,
            fare: u32,
            stops: &[&str],
            duration: &str,
            bus_type: &str,
            seats: u32,
        ) -> BusSchedule {
            BusSchedule {
                id: id.into(),
                origin: origin.into(),
                destination: destination.into(),
                operator: operator.into(),
                departure_time: departure.into(),
                arrival_time: arrival.into(),
                fare,
                currency: "GHS".into(),
                stops: stops.iter().map(|s| s.to_string()).collect(),
                duration: duration.into(),
                status: "active".into(),
                bus_type: bus_type.into(),
                seats_available: seats,
            }
        }

        Self::new(vec![
            schedule(
                "acc-kum-001",
                "Accra",
                "Kumasi",
                "VIP Jeoun",
                "06:00",
                "10:30",
                85,
                &["Nsawam", "Nkawkaw"],
                "4h 30m",
                "AC Coach",
                15,
            ),
            schedule(
                "acc-kum-002",
                "Accra",
                "Kumasi",
                "STC",
                "08:00",
                "12:45",
                90,
                &["Nsawam", "Nkawkaw", "Mampong"],
                "4h 45m",
                "Luxury",
                8,
            ),
            schedule(
                "kum-acc-001",
                "Kumasi",
                "Accra",
                "VIP Jeoun",
                "05:30",
                "10:00",
                85,
                &["Nkawkaw", "Nsawam"],
                "4h 30m",
                "AC Coach",
                22,
            ),
            schedule(
                "acc-tam-001",
                "Accra",
                "Tamale",
                "STC",
                "06:00",
                "14:00",
                120,
                &["Kumasi", "Sunyani", "Techiman"],
                "8h",
                "Luxury",
                12,
            ),
            schedule(
                "acc-sun-001",
                "Accra",
                "Sunyani",
                "Metro Mass",
                "07:00",
                "12:00",
                55,
                &["Nsawam", "Nkawkaw", "Kumasi"],
                "5h",
                "Standard",
                30,
            ),
            schedule(
                "sun-kum-001",
                "Sunyani",
                "Kumasi",
                "Metro Mass",
                "06:30",
                "09:30",
                35,
                &["Techiman"],
                "3h",
                "Standard",
                25,
            ),
            schedule(
                "tam-kum-001",
                "Tamale",
                "Kumasi",
                "STC",
                "05:00",
                "12:30",
                95,
                &["Techiman", "Sunyani"],
                "7h 30m",
                "Luxury",
                5,
            ),
            schedule(
                "kum-tam-001",
                "Kumasi",
                "Tamale",
                "VIP Jeoun",
                "07:00",
                "14:30",
                100,
                &["Sunyani", "Techiman"],
                "7h 30m",
                "AC Coach",
                18,
            ),
        ])
    }
}
