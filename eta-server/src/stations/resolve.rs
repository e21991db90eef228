//! Free-text station resolution.

use crate::domain::StationCode;

use super::directory::StationDirectory;
use super::error::ResolveError;

/// Resolve user input to a station code.
///
/// Tries a case-insensitive exact match on display names first, then the
/// trimmed, upper-cased input as a station code. There is no partial or
/// fuzzy matching.
///
/// # Examples
///
/// ```
/// use eta_server::stations::{StationDirectory, resolve};
///
/// let directory = StationDirectory::builtin();
/// assert_eq!(resolve(directory, "central").unwrap().as_str(), "CEN");
/// assert_eq!(resolve(directory, " cen ").unwrap().as_str(), "CEN");
/// assert!(resolve(directory, "Centr").is_err());
/// ```
pub fn resolve(directory: &StationDirectory, query: &str) -> Result<StationCode, ResolveError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::EmptyQuery);
    }

    if let Some(code) = directory.code_for_name(trimmed) {
        return Ok(code);
    }

    StationCode::parse_normalized(trimmed)
        .ok()
        .filter(|code| directory.contains(code))
        .ok_or_else(|| ResolveError::NotFound {
            query: trimmed.to_string(),
        })
}
