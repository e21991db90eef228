//! Timestamp handling for the MTR Next Train API.
//!
//! The API reports every time as a local Hong Kong `"YYYY-MM-DD HH:MM:SS"`
//! string (`sys_time`, `curr_time`, and each train's `time`). All of them
//! are converted through [`MtrTimestamp::parse`] so that the separator
//! normalization happens in exactly one place.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};

/// Error returned when parsing an invalid upstream timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Formats accepted after separator normalization.
const FORMATS: [&str; 3] = ["%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M", "%Y/%m/%dT%H:%M:%S"];

/// A local date-time reported by the upstream API.
///
/// # Examples
///
/// ```
/// use eta_server::domain::MtrTimestamp;
///
/// let t = MtrTimestamp::parse("2026-10-16 14:03:05").unwrap();
/// assert_eq!(t.to_string(), "14:03");
/// assert_eq!(t.as_of_display(), "16 Oct 2026, 14:03:05");
///
/// assert!(MtrTimestamp::parse("-").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MtrTimestamp(NaiveDateTime);

impl MtrTimestamp {
    /// Parse an upstream timestamp.
    ///
    /// Date separators are normalized from `-` to `/` before parsing, which
    /// also accepts payloads that already use `/`.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TimeError::new("empty timestamp"));
        }

        let normalized = trimmed.replace('-', "/");
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
            .map(Self)
            .ok_or_else(|| TimeError::new("expected YYYY-MM-DD HH:MM:SS"))
    }

    /// Parse an optional field, treating absence and garbage alike.
    pub fn parse_opt(s: Option<&str>) -> Option<Self> {
        s.and_then(|s| Self::parse(s).ok())
    }

    /// Wrap an already-parsed date-time.
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Returns the underlying date-time.
    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Long form used for the "data as of" line, e.g. `16 Oct 2026, 14:03:05`.
    pub fn as_of_display(&self) -> String {
        self.0.format("%-d %b %Y, %H:%M:%S").to_string()
    }
}

impl fmt::Debug for MtrTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MtrTimestamp({})", self.0)
    }
}

/// 24-hour `HH:MM`.
impl fmt::Display for MtrTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

/// Parse a leading integer the way the upstream's numeric string fields are
/// read: optional sign, then digits, ignoring anything after them.
///
/// Returns `None` when no digits lead the (trimmed) string.
///
/// ```
/// use eta_server::domain::parse_leading_int;
///
/// assert_eq!(parse_leading_int("12"), Some(12));
/// assert_eq!(parse_leading_int(" -1"), Some(-1));
/// assert_eq!(parse_leading_int("3 min"), Some(3));
/// assert_eq!(parse_leading_int("-"), None);
/// assert_eq!(parse_leading_int(""), None);
/// ```
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, rest) = match s.as_bytes().first()? {
        b'-' => (-1, &s[1..]),
        b'+' => (1, &s[1..]),
        _ => (1, s),
    };

    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(rest.len(), |(i, _)| i);
    if digits_end == 0 {
        return None;
    }

    rest[..digits_end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn parses_dash_separated() {
        let t = MtrTimestamp::parse("2026-10-16 09:05:30").unwrap();
        assert_eq!(t.datetime(), dt(9, 5, 30));
    }

    #[test]
    fn parses_slash_separated() {
        let t = MtrTimestamp::parse("2026/10/16 09:05:30").unwrap();
        assert_eq!(t.datetime(), dt(9, 5, 30));
    }

    #[test]
    fn parses_without_seconds() {
        let t = MtrTimestamp::parse("2026-10-16 23:59").unwrap();
        assert_eq!(t.datetime(), dt(23, 59, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(MtrTimestamp::parse("").is_err());
        assert!(MtrTimestamp::parse("   ").is_err());
        assert!(MtrTimestamp::parse("-").is_err());
        assert!(MtrTimestamp::parse("14:30").is_err());
        assert!(MtrTimestamp::parse("2026-13-40 10:00:00").is_err());
    }

    #[test]
    fn parse_opt_swallows_errors() {
        assert!(MtrTimestamp::parse_opt(None).is_none());
        assert!(MtrTimestamp::parse_opt(Some("nope")).is_none());
        assert!(MtrTimestamp::parse_opt(Some("2026-10-16 10:00:00")).is_some());
    }

    #[test]
    fn display_is_hh_mm() {
        assert_eq!(MtrTimestamp::new(dt(7, 4, 59)).to_string(), "07:04");
        assert_eq!(MtrTimestamp::new(dt(0, 0, 0)).to_string(), "00:00");
    }

    #[test]
    fn ordering_follows_datetime() {
        let earlier = MtrTimestamp::parse("2026-10-16 10:00:00").unwrap();
        let later = MtrTimestamp::parse("2026-10-16 10:00:01").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn as_of_display() {
        let t = MtrTimestamp::new(dt(8, 1, 2));
        assert_eq!(t.as_of_display(), "16 Oct 2026, 08:01:02");
    }

    #[test]
    fn leading_int_edge_cases() {
        assert_eq!(parse_leading_int("0"), Some(0));
        assert_eq!(parse_leading_int("007"), Some(7));
        assert_eq!(parse_leading_int("+4"), Some(4));
        assert_eq!(parse_leading_int("4.9"), Some(4));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("abc"), None);
    }
}
