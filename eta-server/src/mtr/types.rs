//! Next Train API response DTOs.
//!
//! These types map directly to the `getSchedule.php` JSON body. The API is
//! loose about types: numeric fields arrive as strings or numbers, and the
//! status flag has been seen as both `1` and `"1"`. Everything is read
//! leniently here so the rest of the crate sees one shape.

use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Value;

/// Outcome reported by the payload's own `status` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    /// Any value other than `0` / `"0"`.
    Succeeded,
    /// Status equal to numeric `0` or string `"0"`.
    Rejected,
    /// No status flag in the payload.
    #[default]
    Missing,
}

impl ApiStatus {
    /// Normalize a raw status value by explicit equality against zero.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => ApiStatus::Missing,
            Value::Number(n) if n.as_f64() == Some(0.0) => ApiStatus::Rejected,
            Value::String(s) if s.trim() == "0" => ApiStatus::Rejected,
            _ => ApiStatus::Succeeded,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, ApiStatus::Succeeded)
    }
}

/// Response body of one `getSchedule.php?line=..&sta=..` request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleResponse {
    /// Status flag, `1` on success.
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: ApiStatus,

    /// Human-readable status message (e.g. "successful").
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,

    /// Server time the data was generated.
    #[serde(default, deserialize_with = "lenient_string")]
    pub sys_time: Option<String>,

    /// Current time at the server, used to decide arrived/departed.
    #[serde(default, deserialize_with = "lenient_string")]
    pub curr_time: Option<String>,

    /// Line-wide delay flag (`"Y"` / `"N"`).
    #[serde(default, deserialize_with = "lenient_string")]
    pub isdelay: Option<String>,

    /// Schedule payload. Its layout varies by line, so it stays untyped
    /// until normalization.
    #[serde(default)]
    pub data: Option<Value>,
}

/// One train entry from an `UP` / `DOWN` list.
///
/// All fields are optional; the API omits them freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrainDto {
    /// Position in the direction list ("1" is the next train).
    #[serde(default, deserialize_with = "lenient_string")]
    pub seq: Option<String>,

    /// Destination station code.
    #[serde(default, deserialize_with = "lenient_string")]
    pub dest: Option<String>,

    /// Platform number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub plat: Option<String>,

    /// Scheduled/estimated arrival time, `"YYYY-MM-DD HH:MM:SS"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,

    /// Minutes until arrival.
    #[serde(default, deserialize_with = "lenient_string")]
    pub ttnt: Option<String>,

    /// `"Y"` when the estimate is live, `"N"` when it is not.
    #[serde(default, deserialize_with = "lenient_string")]
    pub valid: Option<String>,

    /// Data source marker.
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,

    /// Per-train delay flag.
    #[serde(default, deserialize_with = "lenient_string")]
    pub isdelay: Option<String>,

    /// Routing tag; `"RAC"` means via Racecourse (East Rail only).
    #[serde(default, deserialize_with = "lenient_string")]
    pub route: Option<String>,

    /// `"A"` arrival or `"D"` departure time (East Rail only).
    #[serde(default, deserialize_with = "lenient_string")]
    pub timetype: Option<String>,
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<ApiStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(ApiStatus::from_value(&value))
}

/// Accept a string or a number; treat empty strings, null and anything
/// else as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
