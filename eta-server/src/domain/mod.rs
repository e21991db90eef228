//! Domain types for the arrival board.
//!
//! This module contains the validated identifiers and time values that the
//! rest of the crate passes around. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod direction;
mod line;
mod station;
mod time;

pub use direction::Direction;
pub use line::{InvalidLineCode, LineCode};
pub use station::{InvalidStationCode, StationCode};
pub use time::{MtrTimestamp, TimeError, parse_leading_int};
