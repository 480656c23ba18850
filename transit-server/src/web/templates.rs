//! Askama templates for the web frontend.
//!
//! Templates stay dumb: view models pre-format every value in Rust so the
//! HTML only loops, branches on booleans and prints strings. Autoescaping
//! covers the user-entered fields shown on the dashboard.

use askama::Template;
use chrono::Local;

use crate::country::{CountryProfile, NeighbourSummary};
use crate::domain::{BusSchedule, PassengerApplication, TimeSlot};
use crate::ledger::LedgerStats;
use crate::weather::CurrentConditions;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub cities: Vec<String>,
}

/// Schedules page with weather cards.
#[derive(Template)]
#[template(path = "schedules.html")]
pub struct SchedulesTemplate {
    pub weather_cards: Vec<WeatherCardView>,
    pub schedules: Vec<ScheduleCardView>,
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub selected_origin: String,
    pub selected_destination: String,
}

/// Trip application form page.
#[derive(Template)]
#[template(path = "apply.html")]
pub struct ApplyTemplate {
    pub cities: Vec<String>,
}

/// Passenger dashboard page.
#[derive(Template)]
#[template(path = "passengers.html")]
pub struct PassengersTemplate {
    pub stats: StatsView,
    pub route_stats: Vec<RouteStatView>,
    pub rows: Vec<PassengerRowView>,
    pub route_options: Vec<String>,
    pub search: String,
    pub selected_status: String,
    pub selected_route: String,
}

/// About Ghana page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub loaded: bool,
    pub name: String,
    pub official_name: String,
    pub capital: String,
    pub population: String,
    pub region: String,
    pub subregion: String,
    pub currencies: String,
    pub languages: String,
    pub flag_svg: String,
    pub calling_code: String,
    pub area: String,
    pub timezones: String,
    pub neighbours: Vec<NeighbourView>,
}

impl AboutTemplate {
    /// Build the page from a fetched profile.
    pub fn from_profile(profile: &CountryProfile, neighbours: &[NeighbourSummary]) -> Self {
        Self {
            loaded: true,
            name: profile.name.clone(),
            official_name: profile.official_name.clone(),
            capital: profile.capital.clone(),
            population: profile.format_population(),
            region: profile.region.clone(),
            subregion: profile.subregion.clone(),
            currencies: profile.format_currencies(),
            languages: profile.format_languages(),
            flag_svg: profile.flag_svg.clone(),
            calling_code: profile.calling_code.clone(),
            area: format!("{:.0} km²", profile.area_km2),
            timezones: profile.timezones.join(", "),
            neighbours: neighbours.iter().map(NeighbourView::from_summary).collect(),
        }
    }

    /// Fallback page when the country API is unreachable.
    pub fn unavailable() -> Self {
        Self {
            loaded: false,
            name: "Ghana".to_string(),
            official_name: String::new(),
            capital: "Accra".to_string(),
            population: String::new(),
            region: String::new(),
            subregion: String::new(),
            currencies: String::new(),
            languages: String::new(),
            flag_svg: String::new(),
            calling_code: String::new(),
            area: String::new(),
            timezones: String::new(),
            neighbours: Vec::new(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Weather card view model.
#[derive(Debug, Clone)]
pub struct WeatherCardView {
    pub city: String,
    pub temp_c: String,
    pub feelslike_c: String,
    pub condition: String,
    /// Full icon URL ("https:" + the API's protocol-relative path)
    pub icon_url: String,
}

impl WeatherCardView {
    /// Create from current conditions.
    pub fn from_conditions(conditions: &CurrentConditions) -> Self {
        Self {
            city: conditions.location.clone(),
            temp_c: format!("{:.0}", conditions.temp_c),
            feelslike_c: format!("{:.0}", conditions.feelslike_c),
            condition: conditions.condition.clone(),
            icon_url: icon_url(&conditions.icon),
        }
    }
}

/// Schedule card view model.
#[derive(Debug, Clone)]
pub struct ScheduleCardView {
    pub route: String,
    pub fare: String,
    pub operator: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub has_stops: bool,
    pub stops: String,
    pub bus_type: String,
    pub seats: String,
    pub has_weather: bool,
    pub weather_temp: String,
    pub weather_icon_url: String,
    pub weather_condition: String,
    pub destination: String,
}

impl ScheduleCardView {
    /// Create from a schedule, with the destination's weather when known.
    pub fn from_schedule(schedule: &BusSchedule, weather: Option<&CurrentConditions>) -> Self {
        Self {
            route: schedule.route_label(),
            fare: format!("{} {}", schedule.fare, schedule.currency),
            operator: schedule.operator.clone(),
            departure: schedule.departure_time.clone(),
            arrival: schedule.arrival_time.clone(),
            duration: schedule.duration.clone(),
            has_stops: !schedule.stops.is_empty(),
            stops: schedule.stops.join(", "),
            bus_type: schedule.bus_type.clone(),
            seats: schedule.seats_available.to_string(),
            has_weather: weather.is_some(),
            weather_temp: weather.map(|w| format!("{:.0}", w.temp_c)).unwrap_or_default(),
            weather_icon_url: weather.map(|w| icon_url(&w.icon)).unwrap_or_default(),
            weather_condition: weather.map(|w| w.condition.clone()).unwrap_or_default(),
            destination: schedule.destination.clone(),
        }
    }
}

/// Dashboard summary numbers.
#[derive(Debug, Clone)]
pub struct StatsView {
    pub total: usize,
    pub distinct_routes: usize,
    pub alerts_subscribed: usize,
    pub today_applications: usize,
}

/// Per-route passenger count card.
#[derive(Debug, Clone)]
pub struct RouteStatView {
    pub route: String,
    pub count_label: String,
}

impl StatsView {
    /// Create from ledger statistics.
    pub fn from_stats(stats: &LedgerStats) -> Self {
        Self {
            total: stats.total,
            distinct_routes: stats.routes.len(),
            alerts_subscribed: stats.alerts_subscribed,
            today_applications: stats.today_applications,
        }
    }
}

impl RouteStatView {
    /// Route cards in the statistics' order (descending by count).
    pub fn from_stats(stats: &LedgerStats) -> Vec<Self> {
        stats
            .routes
            .iter()
            .map(|r| Self {
                route: r.route.clone(),
                count_label: if r.count == 1 {
                    "1 passenger".to_string()
                } else {
                    format!("{} passengers", r.count)
                },
            })
            .collect()
    }
}

/// Dashboard table row.
#[derive(Debug, Clone)]
pub struct PassengerRowView {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub route: String,
    pub date: String,
    pub time_label: String,
    pub wants_alerts: bool,
    pub status: String,
    /// CSS modifier, e.g. "pending"
    pub status_class: String,
    pub submitted: String,
}

impl PassengerRowView {
    /// Create from a stored application.
    pub fn from_application(record: &PassengerApplication) -> Self {
        let time_label = match record.time {
            TimeSlot::Any => "Any".to_string(),
            slot => slot.label().to_string(),
        };

        Self {
            name: record.name.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
            route: record.route_label(),
            date: record.date.clone(),
            time_label,
            wants_alerts: record.alerts,
            status: record.status.as_str().to_string(),
            status_class: record.status.as_str().to_lowercase(),
            submitted: record
                .submitted_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        }
    }
}

/// Neighbouring country view model.
#[derive(Debug, Clone)]
pub struct NeighbourView {
    pub name: String,
    pub capital: String,
    pub population: String,
}

impl NeighbourView {
    fn from_summary(summary: &NeighbourSummary) -> Self {
        Self {
            name: summary.name.clone(),
            capital: summary.capital.clone(),
            population: group_thousands(summary.population),
        }
    }
}

fn icon_url(protocol_relative: &str) -> String {
    if protocol_relative.starts_with("//") {
        format!("https:{protocol_relative}")
    } else {
        protocol_relative.to_string()
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApplicationStatus;

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            location: "Kumasi".into(),
            temp_c: 28.6,
            temp_f: 83.5,
            condition: "Partly cloudy".into(),
            icon: "//cdn.weatherapi.com/weather/64x64/day/116.png".into(),
            humidity: 75,
            wind_kph: 12.0,
            feelslike_c: 32.4,
            feelslike_f: 90.3,
            last_updated: "2024-06-01 09:00".into(),
        }
    }

    #[test]
    fn weather_card_formats_and_completes_icon_url() {
        let view = WeatherCardView::from_conditions(&conditions());
        assert_eq!(view.city, "Kumasi");
        assert_eq!(view.temp_c, "29");
        assert_eq!(view.feelslike_c, "32");
        assert!(view.icon_url.starts_with("https://cdn.weatherapi.com"));
    }

    #[test]
    fn schedule_card_without_weather() {
        let schedule = BusSchedule {
            id: "sun-kum-001".into(),
            origin: "Sunyani".into(),
            destination: "Kumasi".into(),
            operator: "Metro Mass".into(),
            departure_time: "06:30".into(),
            arrival_time: "09:30".into(),
            fare: 35,
            currency: "GHS".into(),
            stops: vec!["Techiman".into()],
            duration: "3h".into(),
            status: "active".into(),
            bus_type: "Standard".into(),
            seats_available: 25,
        };

        let view = ScheduleCardView::from_schedule(&schedule, None);
        assert_eq!(view.route, "Sunyani → Kumasi");
        assert_eq!(view.fare, "35 GHS");
        assert!(view.has_stops);
        assert_eq!(view.stops, "Techiman");
        assert!(!view.has_weather);

        let with_weather = ScheduleCardView::from_schedule(&schedule, Some(&conditions()));
        assert!(with_weather.has_weather);
        assert_eq!(with_weather.weather_temp, "29");
    }

    #[test]
    fn passenger_row_formats_status_and_time() {
        let record = PassengerApplication {
            id: "1".into(),
            name: "Ama".into(),
            phone: "+233200000001".into(),
            email: "ama@example.com".into(),
            origin: "Accra".into(),
            destination: "Kumasi".into(),
            date: "2024-06-01".into(),
            time: TimeSlot::Morning,
            alerts: true,
            notes: String::new(),
            submitted_at: "2024-06-01T08:30:00Z".parse().unwrap(),
            status: ApplicationStatus::Confirmed,
            extra: serde_json::Map::new(),
        };

        let row = PassengerRowView::from_application(&record);
        assert_eq!(row.route, "Accra → Kumasi");
        assert_eq!(row.time_label, "Morning (6:00 AM - 12:00 PM)");
        assert_eq!(row.status, "Confirmed");
        assert_eq!(row.status_class, "confirmed");
        assert!(row.wants_alerts);
    }

    #[test]
    fn any_time_row_shows_any() {
        let record = PassengerApplication {
            id: "1".into(),
            name: "Ama".into(),
            phone: String::new(),
            email: String::new(),
            origin: "Accra".into(),
            destination: "Kumasi".into(),
            date: "2024-06-01".into(),
            time: TimeSlot::Any,
            alerts: false,
            notes: String::new(),
            submitted_at: "2024-06-01T08:30:00Z".parse().unwrap(),
            status: ApplicationStatus::Pending,
            extra: serde_json::Map::new(),
        };

        assert_eq!(PassengerRowView::from_application(&record).time_label, "Any");
    }

    #[test]
    fn route_stat_pluralizes() {
        let stats = LedgerStats {
            total: 3,
            routes: vec![
                crate::ledger::RouteCount {
                    route: "Accra → Kumasi".into(),
                    count: 2,
                },
                crate::ledger::RouteCount {
                    route: "Kumasi → Tamale".into(),
                    count: 1,
                },
            ],
            alerts_subscribed: 0,
            today_applications: 0,
        };

        let views = RouteStatView::from_stats(&stats);
        assert_eq!(views[0].count_label, "2 passengers");
        assert_eq!(views[1].count_label, "1 passenger");
    }

    #[test]
    fn about_fallback_is_marked_unloaded() {
        let about = AboutTemplate::unavailable();
        assert!(!about.loaded);
        assert_eq!(about.name, "Ghana");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(31072945), "31,072,945");
    }
}
