//! Travel direction buckets reported by the API.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// The direction list a train was listed under.
///
/// The API groups trains under `UP` and `DOWN`. Single-list payloads have
/// no direction of their own and are labelled with the line code instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Other(String),
}

impl Direction {
    /// The key as it appears in the payload (or the fallback label).
    pub fn as_str(&self) -> &str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Other(label) => label,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Other(_) => 2,
        }
    }
}

/// `UP` < `DOWN` < any other label, other labels lexicographically.
impl Ord for Direction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| match (self, other) {
                (Direction::Other(a), Direction::Other(b)) => a.cmp(b),
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for Direction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_before_down_before_others() {
        let mut dirs = vec![
            Direction::Other("TCL".into()),
            Direction::Down,
            Direction::Other("AEL".into()),
            Direction::Up,
        ];
        dirs.sort();
        assert_eq!(
            dirs,
            vec![
                Direction::Up,
                Direction::Down,
                Direction::Other("AEL".into()),
                Direction::Other("TCL".into()),
            ]
        );
    }

    #[test]
    fn as_str_matches_payload_keys() {
        assert_eq!(Direction::Up.as_str(), "UP");
        assert_eq!(Direction::Down.as_str(), "DOWN");
        assert_eq!(Direction::Other("DRL".into()).to_string(), "DRL");
    }
}
