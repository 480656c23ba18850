//! Web layer for the trip planner.
//!
//! Server-rendered pages plus a JSON API mirroring every page operation.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
