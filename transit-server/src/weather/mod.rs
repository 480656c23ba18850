//! Weather lookups for destination cities.
//!
//! Thin client over WeatherAPI.com. Weather is display-only: pages render
//! without it when a lookup fails, so callers treat errors as "no data"
//! rather than page failures.

mod client;
mod error;
mod types;

pub use client::{WeatherClient, WeatherConfig};
pub use error::WeatherError;
pub use types::{CurrentConditions, DayForecast, Forecast};
