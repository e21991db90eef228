//! Conversion from raw schedule payloads to train arrivals.
//!
//! The `data` object of a schedule response has been observed in three
//! layouts, depending on the line:
//!
//! ```text
//! {"KTL-YAT": {"UP": [..], "DOWN": [..]}}   composite key wrapping directions
//! {"KTL-YAT": [..]}                          composite key wrapping one list
//! {"UP": [..], "DOWN": [..]}                 directions at the top level
//! ```
//!
//! [`direction_lists`] tries them in that order; everything downstream sees
//! a flat list of [`TrainArrival`]s.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Direction, LineCode, MtrTimestamp, parse_leading_int};
use crate::mtr::{ScheduleResponse, TrainDto};
use crate::stations::LineBinding;

const YES: &str = "Y";
const NO: &str = "N";

/// Whether a time is an arrival or a departure (East Rail only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeType {
    Arrival,
    Departure,
}

impl TimeType {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "A" => Some(TimeType::Arrival),
            "D" => Some(TimeType::Departure),
            _ => None,
        }
    }
}

/// One train from one line's response, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainArrival {
    pub line: LineCode,
    /// The list the train was found in.
    pub direction: Direction,
    /// Destination station code, as reported.
    pub destination: String,
    pub platform: Option<String>,
    /// Parsed `seq`; `None` when missing or not a number.
    pub sequence: Option<i64>,
    /// Raw `ttnt` (minutes to arrival).
    pub minutes: Option<String>,
    /// Raw `time`.
    pub scheduled_time: Option<String>,
    pub is_delayed: bool,
    /// `false` only when the API explicitly marks the entry invalid.
    pub is_valid: bool,
    pub route: Option<String>,
    pub time_type: Option<TimeType>,
    /// `curr_time` of the response this train came from.
    pub current_time: Option<String>,
}

impl TrainArrival {
    /// Minutes to arrival, if present and numeric.
    pub fn minutes_to_arrival(&self) -> Option<i64> {
        self.minutes.as_deref().and_then(parse_leading_int)
    }

    pub fn scheduled(&self) -> Option<MtrTimestamp> {
        MtrTimestamp::parse_opt(self.scheduled_time.as_deref())
    }

    /// The response's "now", against which arrival/departure is decided.
    pub fn reference_time(&self) -> Option<MtrTimestamp> {
        MtrTimestamp::parse_opt(self.current_time.as_deref())
    }

    pub fn via_racecourse(&self) -> bool {
        self.route.as_deref() == Some("RAC")
    }
}

/// Flatten one line's response into train arrivals.
///
/// Returns an empty list when the response has no usable schedule payload.
pub fn normalize(response: &ScheduleResponse, binding: LineBinding) -> Vec<TrainArrival> {
    let Some(data) = response.data.as_ref() else {
        return Vec::new();
    };

    let key = binding.schedule_key();
    let current_time = response
        .curr_time
        .as_deref()
        .or_else(|| nested_str(data, &key, "curr_time"));
    let line_delayed = response.isdelay.as_deref() == Some(YES);

    direction_lists(data, &key, binding.line)
        .into_iter()
        .flat_map(|(direction, trains)| {
            trains
                .iter()
                .filter(|train| train.is_object())
                .filter_map(|train| TrainDto::deserialize(train).ok())
                .map(move |dto| TrainArrival {
                    line: binding.line,
                    direction: direction.clone(),
                    destination: dto.dest.unwrap_or_default(),
                    platform: dto.plat,
                    sequence: dto.seq.as_deref().and_then(parse_leading_int),
                    minutes: dto.ttnt,
                    scheduled_time: dto.time,
                    is_delayed: dto
                        .isdelay
                        .as_deref()
                        .map_or(line_delayed, |flag| flag == YES),
                    is_valid: dto.valid.as_deref() != Some(NO),
                    route: dto.route,
                    time_type: dto.timetype.as_deref().and_then(TimeType::parse),
                    current_time: current_time.map(str::to_string),
                })
        })
        .collect()
}

/// Locate the direction lists inside a schedule payload.
///
/// 1. `data[key]` is an object: its `UP` and `DOWN` lists.
/// 2. `data[key]` is a list: that list, labelled with the line code.
/// 3. `data[key]` is absent: `UP` and `DOWN` directly on `data`.
pub fn direction_lists<'a>(
    data: &'a Value,
    key: &str,
    line: LineCode,
) -> Vec<(Direction, &'a Vec<Value>)> {
    match data.get(key) {
        Some(Value::Object(schedule)) => up_down(schedule),
        Some(Value::Array(trains)) => vec![(Direction::Other(line.as_str().to_string()), trains)],
        Some(Value::Null) | None => data.as_object().map(up_down).unwrap_or_default(),
        Some(_) => Vec::new(),
    }
}

fn up_down(schedule: &Map<String, Value>) -> Vec<(Direction, &Vec<Value>)> {
    [("UP", Direction::Up), ("DOWN", Direction::Down)]
        .into_iter()
        .filter_map(|(name, direction)| {
            schedule
                .get(name)
                .and_then(Value::as_array)
                .map(|trains| (direction, trains))
        })
        .collect()
}

fn nested_str<'a>(data: &'a Value, key: &str, field: &str) -> Option<&'a str> {
    data.get(key)?.get(field)?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationCode;
    use crate::mtr::ApiStatus;
    use serde_json::json;

    fn binding(line: LineCode, sta: &str) -> LineBinding {
        LineBinding::new(line, StationCode::parse(sta).unwrap())
    }

    fn response(data: Value) -> ScheduleResponse {
        ScheduleResponse {
            status: ApiStatus::Succeeded,
            curr_time: Some("2026-10-16 14:00:00".to_string()),
            sys_time: Some("2026-10-16 14:00:01".to_string()),
            data: Some(data),
            ..Default::default()
        }
    }

    fn train(seq: &str, dest: &str, ttnt: &str) -> Value {
        json!({
            "seq": seq,
            "dest": dest,
            "plat": "1",
            "time": "2026-10-16 14:05:00",
            "ttnt": ttnt,
            "valid": "Y",
            "source": "-"
        })
    }

    #[test]
    fn composite_key_with_directions() {
        let data = json!({
            "KTL-YAT": {
                "curr_time": "2026-10-16 14:00:00",
                "UP": [train("1", "TIK", "2"), train("2", "TIK", "6")],
                "DOWN": [train("1", "WHA", "3")]
            }
        });

        let arrivals = normalize(&response(data), binding(LineCode::Ktl, "YAT"));

        assert_eq!(arrivals.len(), 3);
        assert_eq!(arrivals[0].direction, Direction::Up);
        assert_eq!(arrivals[1].direction, Direction::Up);
        assert_eq!(arrivals[2].direction, Direction::Down);
        assert_eq!(arrivals[2].destination, "WHA");
        assert!(arrivals.iter().all(|a| a.line == LineCode::Ktl));
    }

    #[test]
    fn top_level_directions_normalize_identically() {
        let wrapped = json!({
            "KTL-YAT": {
                "UP": [train("1", "TIK", "2")],
                "DOWN": [train("1", "WHA", "3")]
            }
        });
        let flat = json!({
            "UP": [train("1", "TIK", "2")],
            "DOWN": [train("1", "WHA", "3")]
        });

        let b = binding(LineCode::Ktl, "YAT");
        assert_eq!(normalize(&response(wrapped), b), normalize(&response(flat), b));
    }

    #[test]
    fn composite_key_with_bare_list_uses_line_label() {
        let data = json!({ "DRL-SUN": [train("1", "DIS", "4")] });

        let arrivals = normalize(&response(data), binding(LineCode::Drl, "SUN"));

        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].direction, Direction::Other("DRL".to_string()));
    }

    #[test]
    fn composite_key_without_directions_yields_nothing() {
        let data = json!({
            "TWL-CEN": {"curr_time": "2026-10-16 14:00:00"},
            "UP": [train("1", "TSW", "2")]
        });

        assert!(normalize(&response(data), binding(LineCode::Twl, "CEN")).is_empty());
    }

    #[test]
    fn other_station_key_falls_back_to_top_level() {
        let data = json!({
            "TWL-ADM": {"UP": [train("1", "TSW", "2")]},
            "DOWN": [train("1", "CEN", "1")]
        });

        let arrivals = normalize(&response(data), binding(LineCode::Twl, "CEN"));
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].direction, Direction::Down);
    }

    #[test]
    fn missing_data_yields_nothing() {
        let mut raw = response(json!({}));
        raw.data = None;
        assert!(normalize(&raw, binding(LineCode::Isl, "CEN")).is_empty());

        assert!(normalize(&response(json!("oops")), binding(LineCode::Isl, "CEN")).is_empty());
    }

    #[test]
    fn non_object_elements_skipped() {
        let data = json!({ "UP": [train("1", "CHW", "2"), "garbage", 42, null] });
        let arrivals = normalize(&response(data), binding(LineCode::Isl, "CEN"));
        assert_eq!(arrivals.len(), 1);
    }

    #[test]
    fn fields_are_carried_over() {
        let data = json!({
            "EAL-ADM": {
                "UP": [{
                    "seq": "3",
                    "dest": "LMC",
                    "plat": "1",
                    "time": "2026-10-16 14:12:00",
                    "ttnt": "12",
                    "valid": "N",
                    "route": "RAC",
                    "timetype": "D",
                    "isdelay": "Y"
                }]
            }
        });

        let arrivals = normalize(&response(data), binding(LineCode::Eal, "ADM"));
        let a = &arrivals[0];

        assert_eq!(a.sequence, Some(3));
        assert_eq!(a.platform.as_deref(), Some("1"));
        assert_eq!(a.minutes_to_arrival(), Some(12));
        assert!(!a.is_valid);
        assert!(a.is_delayed);
        assert!(a.via_racecourse());
        assert_eq!(a.time_type, Some(TimeType::Departure));
        assert_eq!(a.current_time.as_deref(), Some("2026-10-16 14:00:00"));
        assert_eq!(a.scheduled().unwrap().to_string(), "14:12");
    }

    #[test]
    fn nested_current_time_used_when_top_level_missing() {
        let data = json!({
            "ISL-CEN": {
                "curr_time": "2026-10-16 09:30:00",
                "UP": [train("1", "CHW", "2")]
            }
        });
        let mut raw = response(data);
        raw.curr_time = None;

        let arrivals = normalize(&raw, binding(LineCode::Isl, "CEN"));
        assert_eq!(
            arrivals[0].current_time.as_deref(),
            Some("2026-10-16 09:30:00")
        );
    }

    #[test]
    fn line_wide_delay_applies_when_train_is_silent() {
        let data = json!({ "UP": [train("1", "CHW", "2")] });
        let mut raw = response(data);
        raw.isdelay = Some("Y".to_string());

        let arrivals = normalize(&raw, binding(LineCode::Isl, "CEN"));
        assert!(arrivals[0].is_delayed);
    }

    #[test]
    fn non_numeric_sequence_is_none() {
        let data = json!({ "UP": [train("x", "CHW", "")] });
        let arrivals = normalize(&response(data), binding(LineCode::Isl, "CEN"));
        assert_eq!(arrivals[0].sequence, None);
        assert_eq!(arrivals[0].minutes, None);
        assert_eq!(arrivals[0].minutes_to_arrival(), None);
    }
}
