//! Grouping and ordering of train arrivals into display rows.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::domain::{Direction, LineCode, MtrTimestamp};
use crate::mtr::ScheduleResponse;
use crate::stations::{LineBinding, StationDirectory};

use super::normalize::{TimeType, TrainArrival, normalize};

/// ETA columns per row.
pub const MAX_ETAS: usize = 4;

/// Shown for empty cells and empty remark lists.
pub const PLACEHOLDER: &str = "–";

/// Shown when a scheduled time is missing or unparsable.
pub const NO_TIME: &str = "N/A";

/// One ETA column of a display row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "minutes", rename_all = "snake_case")]
pub enum EtaCell {
    /// Minutes until arrival.
    Minutes(i64),
    /// Due now and its time has not passed yet.
    Arriving,
    /// Due now and its time has passed.
    Departed,
    Empty,
}

impl fmt::Display for EtaCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtaCell::Minutes(m) => write!(f, "{m}"),
            EtaCell::Arriving => f.write_str("Arr"),
            EtaCell::Departed => f.write_str("Dep"),
            EtaCell::Empty => f.write_str(PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Remark {
    Delayed,
    ViaRacecourse,
    Arrival,
    Departure,
}

impl Remark {
    pub fn label(&self) -> &'static str {
        match self {
            Remark::Delayed => "Delayed",
            Remark::ViaRacecourse => "Via Racecourse",
            Remark::Arrival => "Arrival",
            Remark::Departure => "Departure",
        }
    }
}

/// One row of the arrival board: the next trains of one line to one
/// destination from one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub line: LineCode,
    pub line_name: &'static str,
    pub direction: Direction,
    pub destination: String,
    pub destination_name: String,
    pub platform: Option<String>,
    pub etas: [EtaCell; MAX_ETAS],
    /// First train's scheduled time as `HH:MM`, or `N/A`.
    pub scheduled_time: String,
    /// The first train's time is not a live estimate.
    pub not_live: bool,
    pub remarks: Vec<Remark>,
    /// Earliest numeric minutes-to-arrival in the group.
    pub earliest_minutes: Option<i64>,
}

impl DisplayRow {
    /// Remarks joined with commas, or the placeholder.
    pub fn remark_text(&self) -> String {
        if self.remarks.is_empty() {
            return PLACEHOLDER.to_string();
        }
        self.remarks
            .iter()
            .map(Remark::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn platform_text(&self) -> &str {
        self.platform.as_deref().unwrap_or(NO_TIME)
    }
}

/// Rows plus the time the data is valid for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrivalBoard {
    pub rows: Vec<DisplayRow>,
    /// Earliest `sys_time` among the responses that went into the board.
    pub as_of: Option<MtrTimestamp>,
}

impl ArrivalBoard {
    /// Normalize and aggregate every successful line response.
    pub fn build<'a>(
        responses: impl IntoIterator<Item = (LineBinding, &'a ScheduleResponse)>,
        directory: &StationDirectory,
    ) -> Self {
        let mut arrivals = Vec::new();
        let mut as_of: Option<MtrTimestamp> = None;

        for (binding, response) in responses {
            if let Some(sys_time) = MtrTimestamp::parse_opt(response.sys_time.as_deref()) {
                as_of = Some(as_of.map_or(sys_time, |t| t.min(sys_time)));
            }
            arrivals.extend(normalize(response, binding));
        }

        Self {
            rows: aggregate(arrivals, directory),
            as_of,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Sort key where a missing value sorts after every present one.
fn missing_last(value: Option<i64>) -> (bool, i64) {
    (value.is_none(), value.unwrap_or_default())
}

type GroupKey = (LineCode, Option<String>, String);

struct ArrivalGroup {
    line: LineCode,
    platform: Option<String>,
    destination: String,
    direction: Direction,
    trains: Vec<TrainArrival>,
}

/// Group arrivals by (line, platform, destination) and project each group
/// to a display row, ordered by line name, direction, then earliest ETA.
pub fn aggregate(arrivals: Vec<TrainArrival>, directory: &StationDirectory) -> Vec<DisplayRow> {
    let mut groups: Vec<ArrivalGroup> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for train in arrivals {
        let key = (train.line, train.platform.clone(), train.destination.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(ArrivalGroup {
                line: train.line,
                platform: train.platform.clone(),
                destination: train.destination.clone(),
                direction: train.direction.clone(),
                trains: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].trains.push(train);
    }

    let mut rows: Vec<DisplayRow> = groups
        .into_iter()
        .map(|group| project(group, directory))
        .collect();

    rows.sort_by(|a, b| {
        a.line_name
            .cmp(b.line_name)
            .then_with(|| a.direction.cmp(&b.direction))
            .then_with(|| missing_last(a.earliest_minutes).cmp(&missing_last(b.earliest_minutes)))
    });

    rows
}

fn project(mut group: ArrivalGroup, directory: &StationDirectory) -> DisplayRow {
    group.trains.sort_by(|a, b| {
        missing_last(a.sequence)
            .cmp(&missing_last(b.sequence))
            .then_with(|| {
                missing_last(a.minutes_to_arrival()).cmp(&missing_last(b.minutes_to_arrival()))
            })
    });

    let mut etas = [EtaCell::Empty; MAX_ETAS];
    for (cell, train) in etas.iter_mut().zip(&group.trains) {
        *cell = eta_cell(train);
    }

    let earliest_minutes = group
        .trains
        .iter()
        .filter_map(TrainArrival::minutes_to_arrival)
        .min();

    let first = group.trains.first();

    DisplayRow {
        line: group.line,
        line_name: group.line.display_name(),
        direction: group.direction,
        destination_name: directory.display_name(&group.destination),
        destination: group.destination,
        platform: group.platform,
        etas,
        scheduled_time: first
            .and_then(TrainArrival::scheduled)
            .map_or_else(|| NO_TIME.to_string(), |t| t.to_string()),
        not_live: first.is_some_and(is_not_live),
        remarks: first.map(remarks).unwrap_or_default(),
        earliest_minutes,
    }
}

/// ETA cell for one train.
///
/// A train due now (minutes ≤ 0) is shown as departed once its scheduled
/// time is at or before the response's current time, arriving otherwise.
pub fn eta_cell(train: &TrainArrival) -> EtaCell {
    match train.minutes_to_arrival() {
        None => EtaCell::Empty,
        Some(minutes) if minutes > 0 => EtaCell::Minutes(minutes),
        Some(minutes) => match (train.scheduled(), train.reference_time()) {
            (Some(scheduled), Some(now)) if scheduled <= now => EtaCell::Departed,
            (Some(_), Some(_)) => EtaCell::Arriving,
            _ => EtaCell::Minutes(minutes),
        },
    }
}

/// Explicitly invalid, or delayed with no usable estimate.
fn is_not_live(train: &TrainArrival) -> bool {
    !train.is_valid || (train.is_delayed && train.minutes_to_arrival().is_none())
}

fn remarks(train: &TrainArrival) -> Vec<Remark> {
    let mut remarks = Vec::new();
    if train.is_delayed {
        remarks.push(Remark::Delayed);
    }
    if train.line.has_route_metadata() {
        if train.via_racecourse() {
            remarks.push(Remark::ViaRacecourse);
        }
        match train.time_type {
            Some(TimeType::Arrival) => remarks.push(Remark::Arrival),
            Some(TimeType::Departure) => remarks.push(Remark::Departure),
            None => {}
        }
    }
    remarks
}
