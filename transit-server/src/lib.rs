//! TransitSafe Ghana intercity bus trip planner.
//!
//! A web application for planning intercity bus trips across Ghana:
//! browse schedules, check destination weather, preview the road route,
//! and submit a capacity-checked trip application.

pub mod alerts;
pub mod cache;
pub mod country;
pub mod domain;
pub mod ledger;
pub mod routing;
pub mod schedules;
pub mod weather;
pub mod web;
