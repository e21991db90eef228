//! MTR station directory and name lookup.
//!
//! Provides the static code ↔ name ↔ line mapping for every station served
//! by the Next Train API, and the resolver that turns free text into a
//! station code.

mod directory;
mod error;
mod resolve;

pub use directory::{LineBinding, Station, StationDirectory};
pub use error::ResolveError;
pub use resolve::resolve;
