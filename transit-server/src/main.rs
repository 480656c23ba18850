use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use transit_server::alerts::SmsAlerts;
use transit_server::cache::{CachedWeatherClient, WeatherCacheConfig};
use transit_server::country::{CountryClient, CountryClientConfig};
use transit_server::ledger::{BookingLedger, FileStore};
use transit_server::routing::{OsrmConfig, RoutePlanner};
use transit_server::schedules::ScheduleBoard;
use transit_server::weather::{WeatherClient, WeatherConfig};
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Get the weather API key from the environment
    let weather_api_key = std::env::var("WEATHER_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: WEATHER_API_KEY not set. Weather lookups will fail.");
        String::new()
    });

    // Booking ledger over a file-backed store
    let data_dir = std::env::var("TRANSIT_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let ledger = BookingLedger::new(FileStore::new(&data_dir));

    // Weather client with caching
    let weather_client = WeatherClient::new(WeatherConfig::new(&weather_api_key))
        .expect("Failed to create weather client");
    let weather = CachedWeatherClient::new(weather_client, &WeatherCacheConfig::default());

    // Country info client (no key needed)
    let country = CountryClient::new(CountryClientConfig::default())
        .expect("Failed to create country client");

    // Road route planner
    let route_planner =
        RoutePlanner::new(OsrmConfig::default()).expect("Failed to create route planner");

    // Bundled schedule board
    let schedules = ScheduleBoard::ghana_network();
    println!("Loaded {} bus schedules", schedules.len());

    // Build app state
    let state = AppState::new(
        ledger,
        weather,
        country,
        route_planner,
        schedules,
        SmsAlerts::new(),
    );

    // Create router
    let app = create_router(state, "static");

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("TransitSafe Ghana listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the web interface.");
    println!();
    println!("API Endpoints:");
    println!("  GET    /health                   - Health check");
    println!("  GET    /api/schedules            - List bus schedules");
    println!("  GET    /api/weather              - Current weather for a city");
    println!("  GET    /api/route                - Road route between two cities");
    println!("  POST   /api/applications         - Submit a trip application");
    println!("  GET    /api/applications         - List applications");
    println!("  GET    /api/applications/stats   - Dashboard statistics");
    println!("  GET    /api/applications/export  - Download applications as JSON");
    println!("  DELETE /api/applications         - Clear all applications");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
