//! MTR line identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Error returned when parsing an unknown line code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown line code: {0}")]
pub struct InvalidLineCode(String);

/// One of the MTR heavy-rail lines covered by the Next Train API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineCode {
    Ael,
    Tcl,
    Tml,
    Tkl,
    Eal,
    Sil,
    Twl,
    Isl,
    Ktl,
    Drl,
}

impl LineCode {
    /// Every line, in the order the operator lists them.
    pub const ALL: [LineCode; 10] = [
        LineCode::Ael,
        LineCode::Tcl,
        LineCode::Tml,
        LineCode::Tkl,
        LineCode::Eal,
        LineCode::Sil,
        LineCode::Twl,
        LineCode::Isl,
        LineCode::Ktl,
        LineCode::Drl,
    ];

    /// The code used in API requests and payload keys, e.g. `"TWL"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCode::Ael => "AEL",
            LineCode::Tcl => "TCL",
            LineCode::Tml => "TML",
            LineCode::Tkl => "TKL",
            LineCode::Eal => "EAL",
            LineCode::Sil => "SIL",
            LineCode::Twl => "TWL",
            LineCode::Isl => "ISL",
            LineCode::Ktl => "KTL",
            LineCode::Drl => "DRL",
        }
    }

    /// Human-readable line name.
    pub fn display_name(&self) -> &'static str {
        match self {
            LineCode::Ael => "Airport Express",
            LineCode::Tcl => "Tung Chung Line",
            LineCode::Tml => "Tuen Ma Line",
            LineCode::Tkl => "Tseung Kwan O Line",
            LineCode::Eal => "East Rail Line",
            LineCode::Sil => "South Island Line",
            LineCode::Twl => "Tsuen Wan Line",
            LineCode::Isl => "Island Line",
            LineCode::Ktl => "Kwun Tong Line",
            LineCode::Drl => "Disneyland Resort Line",
        }
    }

    /// Whether this line reports racecourse routing and arrival/departure
    /// time types on its trains.
    pub fn has_route_metadata(&self) -> bool {
        matches!(self, LineCode::Eal)
    }
}

impl FromStr for LineCode {
    type Err = InvalidLineCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        LineCode::ALL
            .into_iter()
            .find(|line| line.as_str() == upper)
            .ok_or(InvalidLineCode(s.to_string()))
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LineCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
