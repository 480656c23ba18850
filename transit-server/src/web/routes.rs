//! HTTP route handlers.

use std::collections::HashMap;
use std::sync::Arc;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use tower_http::services::ServeDir;

use crate::domain::{TripForm, city};
use crate::ledger::{BookingLedger, LedgerError};
use crate::routing::RoutingError;
use crate::weather::CurrentConditions;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/schedules", get(schedules_page))
        .route("/apply", get(apply_page))
        .route("/passengers", get(passengers_page))
        .route("/about", get(about_page))
        .route("/api/schedules", get(api_schedules))
        .route("/api/weather", get(api_weather))
        .route("/api/weather/forecast", get(api_forecast))
        .route("/api/route", get(api_route))
        .route(
            "/api/applications",
            get(api_applications).post(api_submit).delete(api_clear),
        )
        .route("/api/applications/stats", get(api_stats))
        .route("/api/applications/export", get(api_export))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Home page.
async fn index_page() -> IndexTemplate {
    IndexTemplate {
        cities: city::city_names(),
    }
}

/// Trip application form page.
async fn apply_page() -> ApplyTemplate {
    ApplyTemplate {
        cities: city::city_names(),
    }
}

/// Schedules page: weather cards for every registry city plus the
/// (optionally filtered) schedule cards with destination weather inline.
async fn schedules_page(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Response, AppError> {
    let origin = query.origin.as_deref().filter(|s| !s.is_empty());
    let destination = query.destination.as_deref().filter(|s| !s.is_empty());

    let schedules = state.schedules.filter(origin, destination);

    // Weather is display-only; cities that fail simply have no card
    let cities = city::city_names();
    let weather_by_city: HashMap<String, Arc<CurrentConditions>> = state
        .weather
        .current_many(&cities)
        .await
        .into_iter()
        .filter_map(|(c, w)| w.map(|w| (c, w)))
        .collect();

    let weather_cards: Vec<WeatherCardView> = cities
        .iter()
        .filter_map(|c| weather_by_city.get(c))
        .map(|w| WeatherCardView::from_conditions(w))
        .collect();

    let schedule_cards: Vec<ScheduleCardView> = schedules
        .iter()
        .map(|s| {
            ScheduleCardView::from_schedule(s, weather_by_city.get(&s.destination).map(|w| w.as_ref()))
        })
        .collect();

    let template = SchedulesTemplate {
        weather_cards,
        schedules: schedule_cards,
        origins: state.schedules.origins(),
        destinations: state.schedules.destinations(),
        selected_origin: origin.unwrap_or_default().to_string(),
        selected_destination: destination.unwrap_or_default().to_string(),
    };

    render(template)
}

/// Passenger dashboard page.
async fn passengers_page(
    State(state): State<AppState>,
    Query(query): Query<PassengerQuery>,
) -> Result<Response, AppError> {
    let stats = state.ledger.aggregate();

    let rows: Vec<PassengerRowView> = state
        .ledger
        .query(|r| query.matches(r))
        .iter()
        .map(PassengerRowView::from_application)
        .collect();

    // Filter options come from the unfiltered collection, sorted
    let mut route_options: Vec<String> = stats.routes.iter().map(|r| r.route.clone()).collect();
    route_options.sort();

    let template = PassengersTemplate {
        stats: StatsView::from_stats(&stats),
        route_stats: RouteStatView::from_stats(&stats),
        rows,
        route_options,
        search: query.search.unwrap_or_default(),
        selected_status: query.status.unwrap_or_default(),
        selected_route: query.route.unwrap_or_default(),
    };

    render(template)
}

/// About Ghana page. Renders a fallback when the country API is down.
async fn about_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let template = match state.country.ghana().await {
        Ok(profile) => {
            let neighbours = match state.country.neighbours(&profile.borders).await {
                Ok(neighbours) => neighbours,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to fetch neighbouring countries");
                    Vec::new()
                }
            };
            AboutTemplate::from_profile(&profile, &neighbours)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch country profile");
            AboutTemplate::unavailable()
        }
    };

    render(template)
}

/// List schedules, optionally filtered by origin/destination.
async fn api_schedules(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Json<ScheduleListResponse> {
    let origin = query.origin.as_deref().filter(|s| !s.is_empty());
    let destination = query.destination.as_deref().filter(|s| !s.is_empty());

    Json(ScheduleListResponse {
        schedules: state.schedules.filter(origin, destination),
    })
}

/// Current weather for a city.
async fn api_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<CurrentConditions>, AppError> {
    let conditions = state
        .weather
        .current(&query.city)
        .await
        .map_err(|e| AppError::Internal {
            message: e.to_string(),
        })?;

    Ok(Json((*conditions).clone()))
}

/// Forecast for a city (1-3 days).
async fn api_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Response, AppError> {
    let forecast = state
        .weather
        .forecast(&query.city, query.days.unwrap_or(3))
        .await
        .map_err(|e| AppError::Internal {
            message: e.to_string(),
        })?;

    Ok(Json((*forecast).clone()).into_response())
}

/// Road route between two cities.
async fn api_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Response, AppError> {
    let plan = state
        .route_planner
        .plan(&query.origin, &query.destination)
        .await
        .map_err(|e| match e {
            RoutingError::UnknownCity(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        })?;

    Ok(Json(plan).into_response())
}

/// Submit a trip application.
async fn api_submit(
    State(state): State<AppState>,
    Json(form): Json<TripForm>,
) -> Result<Response, AppError> {
    form.validate().map_err(|e| AppError::Unprocessable {
        message: e.to_string(),
    })?;

    let record = state.ledger.submit(form)?;

    // Fire-and-forget: an alert failure must not affect the submission
    if record.alerts && !record.phone.is_empty() {
        let alerts = state.alerts.clone();
        let phone = record.phone.clone();
        let route = format!("{} to {}", record.origin, record.destination);
        tokio::spawn(async move {
            let message = format!(
                "Thank you for applying! Your trip from {route} is being processed."
            );
            alerts.send(&phone, &route, &message).await;
        });
    }

    let response = SubmitResponse {
        message: format!(
            "Thank you, {}! Your application has been saved.",
            record.name
        ),
        application: record,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// List applications with dashboard filters.
async fn api_applications(
    State(state): State<AppState>,
    Query(query): Query<PassengerQuery>,
) -> Json<ApplicationListResponse> {
    let applications = state.ledger.query(|r| query.matches(r));

    Json(ApplicationListResponse {
        total: applications.len(),
        applications,
    })
}

/// Dashboard statistics.
async fn api_stats(State(state): State<AppState>) -> Json<crate::ledger::LedgerStats> {
    Json(state.ledger.aggregate())
}

/// Download the collection as pretty-printed JSON.
async fn api_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state.ledger.export_pretty()?;
    let filename = BookingLedger::export_filename(Local::now().date_naive());
    let disposition = format!("attachment; filename=\"{filename}\"");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Delete all stored applications (both storage keys).
/// The confirmation prompt is the caller's responsibility.
async fn api_clear(State(state): State<AppState>) -> Result<Json<ClearedResponse>, AppError> {
    state.ledger.clear_all()?;
    Ok(Json(ClearedResponse { cleared: true }))
}

fn render<T: Template>(template: T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;
    Ok(Html(html).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unprocessable { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::SlotFull(full) => AppError::Conflict {
                message: format!(
                    "This time slot is full. {full}. Please choose another time or another date."
                ),
            },
            other => AppError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Unprocessable { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message.clone())
            }
            AppError::Conflict { message } => (StatusCode::CONFLICT, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
