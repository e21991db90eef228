//! Station lookup error types.

/// Errors that can occur when resolving user input to a station.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Nothing was typed
    #[error("Please enter a station name or code.")]
    EmptyQuery,

    /// Input matched neither a station name nor a station code
    #[error("Station \"{query}\" not found or no lines associated.")]
    NotFound { query: String },
}
