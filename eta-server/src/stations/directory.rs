//! Static station directory.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::domain::LineCode::{self, Ael, Drl, Eal, Isl, Ktl, Sil, Tcl, Tkl, Tml, Twl};
use crate::domain::StationCode;

/// A line serving a station, with the station code that line's API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineBinding {
    pub line: LineCode,
    pub station: StationCode,
}

impl LineBinding {
    pub fn new(line: LineCode, station: StationCode) -> Self {
        Self { line, station }
    }

    /// The composite key the API uses for this binding's schedule,
    /// e.g. `"KTL-YAT"`.
    pub fn schedule_key(&self) -> String {
        format!("{}-{}", self.line, self.station)
    }
}

/// A station and every line that serves it.
#[derive(Debug, Clone, Serialize)]
pub struct Station {
    pub code: StationCode,
    pub name: String,
    pub lines: Vec<LineBinding>,
}

/// Raw table row: code, display name, serving lines.
type StationEntry = (&'static str, &'static str, &'static [LineCode]);

const STATIONS: &[StationEntry] = &[
    // Airport Express / Tung Chung
    ("HOK", "Hong Kong", &[Ael, Tcl]),
    ("KOW", "Kowloon", &[Ael, Tcl]),
    ("TSY", "Tsing Yi", &[Ael, Tcl]),
    ("AIR", "Airport", &[Ael]),
    ("AWE", "AsiaWorld Expo", &[Ael]),
    ("OLY", "Olympic", &[Tcl]),
    ("NAC", "Nam Cheong", &[Tcl, Tml]),
    ("LAK", "Lai King", &[Tcl, Twl]),
    ("SUN", "Sunny Bay", &[Tcl, Drl]),
    ("TUC", "Tung Chung", &[Tcl]),
    // Tuen Ma
    ("TUM", "Tuen Mun", &[Tml]),
    ("SIH", "Siu Hong", &[Tml]),
    ("TIS", "Tin Shui Wai", &[Tml]),
    ("LOP", "Long Ping", &[Tml]),
    ("YUL", "Yuen Long", &[Tml]),
    ("KSR", "Kam Sheung Road", &[Tml]),
    ("TWW", "Tsuen Wan West", &[Tml]),
    ("MEF", "Mei Foo", &[Tml, Twl]),
    ("AUS", "Austin", &[Tml]),
    ("ETS", "East Tsim Sha Tsui", &[Tml]),
    ("HUH", "Hung Hom", &[Tml, Eal]),
    ("HOM", "Ho Man Tin", &[Tml, Ktl]),
    ("TKW", "To Kwa Wan", &[Tml]),
    ("SUW", "Sung Wong Toi", &[Tml]),
    ("KAT", "Kai Tak", &[Tml]),
    ("DIH", "Diamond Hill", &[Tml, Ktl]),
    ("HIK", "Hin Keng", &[Tml]),
    ("TAW", "Tai Wai", &[Tml, Eal]),
    ("CKT", "Che Kung Temple", &[Tml]),
    ("STW", "Sha Tin Wai", &[Tml]),
    ("CIO", "City One", &[Tml]),
    ("SHM", "Shek Mun", &[Tml]),
    ("TSH", "Tai Shui Hang", &[Tml]),
    ("HEO", "Heng On", &[Tml]),
    ("MOS", "Ma On Shan", &[Tml]),
    ("WKS", "Wu Kai Sha", &[Tml]),
    // Tseung Kwan O
    ("NOP", "North Point", &[Tkl, Isl]),
    ("QUB", "Quarry Bay", &[Tkl, Isl]),
    ("YAT", "Yau Tong", &[Tkl, Ktl]),
    ("TIK", "Tiu Keng Leng", &[Tkl, Ktl]),
    ("TKO", "Tseung Kwan O", &[Tkl]),
    ("LHP", "LOHAS Park", &[Tkl]),
    ("HAH", "Hang Hau", &[Tkl]),
    ("POA", "Po Lam", &[Tkl]),
    // East Rail
    ("ADM", "Admiralty", &[Eal, Sil, Twl, Isl]),
    ("EXC", "Exhibition Centre", &[Eal]),
    ("MKK", "Mong Kok East", &[Eal]),
    ("KOT", "Kowloon Tong", &[Eal, Ktl]),
    ("SHT", "Sha Tin", &[Eal]),
    ("FOT", "Fo Tan", &[Eal]),
    ("RAC", "Racecourse", &[Eal]),
    ("UNI", "University", &[Eal]),
    ("TAP", "Tai Po Market", &[Eal]),
    ("TWO", "Tai Wo", &[Eal]),
    ("FAN", "Fanling", &[Eal]),
    ("SHS", "Sheung Shui", &[Eal]),
    ("LOW", "Lo Wu", &[Eal]),
    ("LMC", "Lok Ma Chau", &[Eal]),
    // South Island
    ("OCP", "Ocean Park", &[Sil]),
    ("WCH", "Wong Chuk Hang", &[Sil]),
    ("LET", "Lei Tung", &[Sil]),
    ("SOH", "South Horizons", &[Sil]),
    // Tsuen Wan
    ("CEN", "Central", &[Twl, Isl]),
    ("TST", "Tsim Sha Tsui", &[Twl]),
    ("JOR", "Jordan", &[Twl]),
    ("YMT", "Yau Ma Tei", &[Twl, Ktl]),
    ("MOK", "Mong Kok", &[Twl, Ktl]),
    ("PRE", "Prince Edward", &[Twl, Ktl]),
    ("SSP", "Sham Shui Po", &[Twl]),
    ("CSW", "Cheung Sha Wan", &[Twl]),
    ("LCK", "Lai Chi Kok", &[Twl]),
    ("KWF", "Kwai Fong", &[Twl]),
    ("KWH", "Kwai Hing", &[Twl]),
    ("TWH", "Tai Wo Hau", &[Twl]),
    ("TSW", "Tsuen Wan", &[Twl]),
    // Island
    ("KET", "Kennedy Town", &[Isl]),
    ("HKU", "HKU", &[Isl]),
    ("SYP", "Sai Ying Pun", &[Isl]),
    ("SHW", "Sheung Wan", &[Isl]),
    ("WAC", "Wan Chai", &[Isl]),
    ("CAB", "Causeway Bay", &[Isl]),
    ("TIH", "Tin Hau", &[Isl]),
    ("FOH", "Fortress Hill", &[Isl]),
    ("TAK", "Tai Koo", &[Isl]),
    ("SWH", "Sai Wan Ho", &[Isl]),
    ("SKW", "Shau Kei Wan", &[Isl]),
    ("HFC", "Heng Fa Chuen", &[Isl]),
    ("CHW", "Chai Wan", &[Isl]),
    // Kwun Tong
    ("WHA", "Whampoa", &[Ktl]),
    ("SKM", "Shek Kip Mei", &[Ktl]),
    ("LOF", "Lok Fu", &[Ktl]),
    ("WTS", "Wong Tai Sin", &[Ktl]),
    ("CHH", "Choi Hung", &[Ktl]),
    ("KOB", "Kowloon Bay", &[Ktl]),
    ("NTK", "Ngau Tau Kok", &[Ktl]),
    ("KWT", "Kwun Tong", &[Ktl]),
    ("LAT", "Lam Tin", &[Ktl]),
    // Disneyland Resort
    ("DIS", "Disneyland Resort", &[Drl]),
];

static BUILTIN: LazyLock<StationDirectory> = LazyLock::new(|| StationDirectory::from_entries(STATIONS));

/// Code ↔ name ↔ line lookup for every station.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: HashMap<StationCode, Station>,
    /// Lower-cased display name → code.
    by_name: HashMap<String, StationCode>,
    /// Table order, for listing.
    order: Vec<StationCode>,
}

impl StationDirectory {
    /// The directory of every station on the network.
    pub fn builtin() -> &'static StationDirectory {
        &BUILTIN
    }

    /// Build a directory from table rows.
    ///
    /// Rows with an invalid code or no serving lines are skipped, so every
    /// station in the result has at least one binding.
    fn from_entries(entries: &[StationEntry]) -> Self {
        let mut directory = Self::default();

        for (code, name, lines) in entries {
            let Ok(code) = StationCode::parse(code) else {
                tracing::warn!(code, "skipping station with invalid code");
                continue;
            };
            if lines.is_empty() {
                tracing::warn!(%code, "skipping station with no lines");
                continue;
            }

            let station = Station {
                code,
                name: (*name).to_string(),
                lines: lines.iter().map(|line| LineBinding::new(*line, code)).collect(),
            };

            directory.by_name.insert(name.to_lowercase(), code);
            if directory.stations.insert(code, station).is_none() {
                directory.order.push(code);
            }
        }

        directory
    }

    /// Look up a station by code.
    pub fn get(&self, code: &StationCode) -> Option<&Station> {
        self.stations.get(code)
    }

    /// Whether the directory knows this code.
    pub fn contains(&self, code: &StationCode) -> bool {
        self.stations.contains_key(code)
    }

    /// Case-insensitive exact match on a display name.
    pub fn code_for_name(&self, name: &str) -> Option<StationCode> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    /// Display name for a code as reported by the API (e.g. a train's
    /// destination), falling back to the raw code for unknown stations.
    pub fn display_name(&self, raw_code: &str) -> String {
        StationCode::parse(raw_code)
            .ok()
            .and_then(|code| self.get(&code))
            .map_or_else(|| raw_code.to_string(), |station| station.name.clone())
    }

    /// All stations in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.order.iter().filter_map(|code| self.stations.get(code))
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[test]
    fn builtin_covers_table() {
        let directory = StationDirectory::builtin();
        assert_eq!(directory.len(), STATIONS.len());
        assert_eq!(directory.iter().count(), STATIONS.len());
    }

    #[test]
    fn every_station_has_lines_and_name() {
        for station in StationDirectory::builtin().iter() {
            assert!(!station.name.is_empty(), "{} has no name", station.code);
            assert!(!station.lines.is_empty(), "{} has no lines", station.code);
            for binding in &station.lines {
                assert_eq!(binding.station, station.code);
            }
        }
    }

    #[test]
    fn display_names_are_unique() {
        let directory = StationDirectory::builtin();
        assert_eq!(directory.by_name.len(), directory.len());
    }

    #[test]
    fn central_is_served_by_tsuen_wan_and_island_lines() {
        let central = StationDirectory::builtin().get(&code("CEN")).unwrap();
        assert_eq!(central.name, "Central");
        let lines: Vec<_> = central.lines.iter().map(|b| b.line).collect();
        assert_eq!(lines, vec![LineCode::Twl, LineCode::Isl]);
    }

    #[test]
    fn admiralty_interchange_has_four_lines() {
        let adm = StationDirectory::builtin().get(&code("ADM")).unwrap();
        assert_eq!(adm.lines.len(), 4);
    }

    #[test]
    fn name_lookup_ignores_case() {
        let directory = StationDirectory::builtin();
        assert_eq!(directory.code_for_name("lohas park"), Some(code("LHP")));
        assert_eq!(directory.code_for_name("LOHAS PARK"), Some(code("LHP")));
        assert_eq!(directory.code_for_name("Lohas"), None);
    }

    #[test]
    fn display_name_falls_back_to_raw_code() {
        let directory = StationDirectory::builtin();
        assert_eq!(directory.display_name("TIK"), "Tiu Keng Leng");
        assert_eq!(directory.display_name("XYZ"), "XYZ");
        assert_eq!(directory.display_name(""), "");
    }

    #[test]
    fn schedule_key_format() {
        let binding = LineBinding::new(LineCode::Ktl, code("YAT"));
        assert_eq!(binding.schedule_key(), "KTL-YAT");
    }

    #[test]
    fn invalid_rows_are_skipped() {
        let entries: &[StationEntry] = &[
            ("CEN", "Central", &[Twl]),
            ("bad", "Bad", &[Twl]),
            ("NOL", "No Lines", &[]),
        ];
        let directory = StationDirectory::from_entries(entries);
        assert_eq!(directory.len(), 1);
        assert!(directory.contains(&code("CEN")));
        assert!(!directory.contains(&code("NOL")));
    }
}
