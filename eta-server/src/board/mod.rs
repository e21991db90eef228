//! Arrival board pipeline.
//!
//! A lookup resolves the query to a station, fetches every serving line
//! concurrently, normalizes whatever came back into train arrivals, and
//! groups those into display rows.

mod aggregate;
mod fanout;
mod generation;
mod lookup;
mod normalize;

pub use aggregate::{
    ArrivalBoard, DisplayRow, EtaCell, MAX_ETAS, NO_TIME, PLACEHOLDER, Remark, aggregate, eta_cell,
};
pub use fanout::{LineFailure, LineOutcome, fetch_all, partition};
pub use generation::{LookupTicket, LookupTracker};
pub use lookup::{
    LookupOutcome, LookupReport, LookupService, StatusLevel, StatusMessage, classify,
};
pub use normalize::{TimeType, TrainArrival, direction_lists, normalize};
