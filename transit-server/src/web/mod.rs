//! Web server layer.

pub mod dto;
mod routes;
mod state;

pub use routes::{AppError, create_router};
pub use state::{AppState, AppTripStore};
