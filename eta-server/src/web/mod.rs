//! Web layer for the arrival board.
//!
//! Serves the station form, the board fragment and its JSON equivalent.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
