//! Schema detection for track tables.
//!
//! Two participant layouts exist in the wild:
//!
//! - **Long format**: `x`, `y` and a `column` id per row.
//! - **Wide format**: numbered pairs `x1, y1, x2, y2, ...`, one pair per participant.
//!
//! Detection runs once per table and yields a [`TrackSchema`]. The checks are
//! ordered and the first match wins, so a table carrying both layouts is
//! treated as long format.

use crate::table::TrackTable;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Column holding the robot's x coordinate.
pub const ROBOT_X: &str = "robot_x";
/// Column holding the robot's y coordinate.
pub const ROBOT_Y: &str = "robot_y";
/// Long-format participant id column.
pub const PARTICIPANT_ID: &str = "column";

/// One numbered participant in a wide-format table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WideParticipant {
    /// Digit suffix shared by the participant's columns (`"2"` for `x2`/`y2`)
    pub suffix: String,
    
    /// Name of the x column, if present
    pub x_column: Option<String>,
    
    /// Name of the y column, if present
    pub y_column: Option<String>,
}

impl WideParticipant {
    /// Both coordinate columns, or `None` if either side is absent.
    pub fn columns(&self) -> Option<(&str, &str)> {
        match (&self.x_column, &self.y_column) {
            (Some(x), Some(y)) => Some((x.as_str(), y.as_str())),
            _ => None,
        }
    }
}

/// Participant layout of a track table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackSchema {
    /// `x`, `y`, `column` per row
    LongFormat,
    
    /// Numbered `x<N>` / `y<N>` pairs, sorted by numeric suffix
    WideFormat { participants: Vec<WideParticipant> },
    
    /// Only the robot trajectory is present
    RobotOnly,
}

impl TrackSchema {
    /// Inspects the column names of `table` and picks a layout.
    pub fn detect(table: &TrackTable) -> Self {
        if ["x", "y", PARTICIPANT_ID].iter().all(|c| table.has_column(c)) {
            return TrackSchema::LongFormat;
        }
        
        let names = table.column_names();
        if !names.iter().any(|n| numbered_suffix(n, 'x').is_some()) {
            return TrackSchema::RobotOnly;
        }
        
        let mut by_suffix: BTreeMap<SuffixKey, WideParticipant> = BTreeMap::new();
        for name in names {
            for axis in ['x', 'y'] {
                let Some(suffix) = numbered_suffix(name, axis) else {
                    continue;
                };
                let entry = by_suffix
                    .entry(SuffixKey(suffix.to_string()))
                    .or_insert_with(|| WideParticipant {
                        suffix: suffix.to_string(),
                        x_column: None,
                        y_column: None,
                    });
                if axis == 'x' {
                    entry.x_column = Some(name.clone());
                } else {
                    entry.y_column = Some(name.clone());
                }
            }
        }
        
        TrackSchema::WideFormat {
            participants: by_suffix.into_values().collect(),
        }
    }
    
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            TrackSchema::LongFormat => "long_format",
            TrackSchema::WideFormat { .. } => "wide_format",
            TrackSchema::RobotOnly => "robot_only",
        }
    }
}

impl std::fmt::Display for TrackSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns the digit suffix if `name` is `axis` followed by one or more ASCII digits.
pub fn numbered_suffix(name: &str, axis: char) -> Option<&str> {
    let rest = name.strip_prefix(axis)?;
    (!rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())).then_some(rest)
}

/// Orders digit strings by numeric value, then by spelling (`"01"` before `"1"`).
#[derive(Debug, Clone, PartialEq, Eq)]
struct SuffixKey(String);

impl Ord for SuffixKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_suffixes(&self.0, &other.0)
    }
}

impl PartialOrd for SuffixKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Numeric comparison of two ASCII digit strings of any length.
pub fn compare_suffixes(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.cmp(b))
}
