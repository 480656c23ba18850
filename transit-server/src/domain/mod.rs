//! Domain types for the trip planner.
//!
//! Core types shared across the ledger, schedule board and web layer.
//! Closed variants (`TimeSlot`, `ApplicationStatus`) normalize unknown
//! legacy wire values on load instead of failing.

pub mod city;

mod application;
mod schedule;
mod status;
mod time_slot;

pub use application::{FormError, PassengerApplication, TripForm};
pub use city::{CityInfo, Coordinates, GHANA_CENTER};
pub use schedule::BusSchedule;
pub use status::ApplicationStatus;
pub use time_slot::TimeSlot;
