//! Station code types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid 3-letter MTR station code, e.g. `CEN` for Central.
///
/// Station codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use eta_server::domain::StationCode;
///
/// let cen = StationCode::parse("CEN").unwrap();
/// assert_eq!(cen.as_str(), "CEN");
///
/// // Lowercase is rejected by `parse` but accepted by `parse_normalized`
/// assert!(StationCode::parse("cen").is_err());
/// assert_eq!(StationCode::parse_normalized(" cen ").unwrap(), cen);
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("CE").is_err());
/// assert!(StationCode::parse("CENT").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode([u8; 3]);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidStationCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidStationCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(StationCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse after trimming whitespace and upper-casing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("CEN").is_ok());
        assert!(StationCode::parse("ADM").is_ok());
        assert!(StationCode::parse("HKU").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(StationCode::parse("cen").is_err());
        assert!(StationCode::parse("Cen").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("CE").is_err());
        assert!(StationCode::parse("CENT").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(StationCode::parse("C1N").is_err());
        assert!(StationCode::parse("C-N").is_err());
        assert!(StationCode::parse("C N").is_err());
    }

    #[test]
    fn normalized_parse_trims_and_uppercases() {
        let code = StationCode::parse_normalized("  adm\n").unwrap();
        assert_eq!(code.as_str(), "ADM");
        assert!(StationCode::parse_normalized("admiralty").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = StationCode::parse("TST").unwrap();
        assert_eq!(code.to_string(), "TST");
        assert_eq!(format!("{:?}", code), "StationCode(TST)");
    }

    #[test]
    fn serializes_as_string() {
        let code = StationCode::parse("YAT").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), r#""YAT""#);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn roundtrip(s in "[A-Z]{3}") {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        #[test]
        fn lowercase_normalizes(s in "[a-z]{3}") {
            prop_assert!(StationCode::parse(&s).is_err());
            let code = StationCode::parse_normalized(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.to_ascii_uppercase());
        }

        #[test]
        fn wrong_length_rejected(s in "[A-Z]{0,2}|[A-Z]{4,10}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }
    }
}
