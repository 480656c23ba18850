//! Application state for the web layer.

use std::sync::Arc;

use crate::alerts::SmsAlerts;
use crate::cache::CachedWeatherClient;
use crate::country::CountryClient;
use crate::ledger::BookingLedger;
use crate::routing::RoutePlanner;
use crate::schedules::ScheduleBoard;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Capacity-checked booking ledger
    pub ledger: Arc<BookingLedger>,

    /// Cached weather client
    pub weather: Arc<CachedWeatherClient>,

    /// Country info client (about page)
    pub country: Arc<CountryClient>,

    /// Road route planner
    pub route_planner: Arc<RoutePlanner>,

    /// Bus schedule board
    pub schedules: Arc<ScheduleBoard>,

    /// SMS alert sender
    pub alerts: Arc<SmsAlerts>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        ledger: BookingLedger,
        weather: CachedWeatherClient,
        country: CountryClient,
        route_planner: RoutePlanner,
        schedules: ScheduleBoard,
        alerts: SmsAlerts,
    ) -> Self {
        Self {
            ledger: Arc::new(ledger),
            weather: Arc::new(weather),
            country: Arc::new(country),
            route_planner: Arc::new(route_planner),
            schedules: Arc::new(schedules),
            alerts: Arc::new(alerts),
        }
    }
}
