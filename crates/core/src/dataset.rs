//! The closed set of dataset types an export batch can contain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One exported table kind, tagged from the file name.
///
/// A "complete" game has all six of these. Missing types are reported as
/// warnings at ingestion, never treated as fatal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DatasetType {
    Passes,
    PlayerStats,
    Points,
    Possessions,
    DefensiveBlocks,
    StallOutsAgainst,
}

impl DatasetType {
    /// Every dataset type a complete game export provides.
    pub const ALL: [DatasetType; 6] = [
        DatasetType::Passes,
        DatasetType::PlayerStats,
        DatasetType::Points,
        DatasetType::Possessions,
        DatasetType::DefensiveBlocks,
        DatasetType::StallOutsAgainst,
    ];

    /// The filename token for this type, exactly as the stat exporter
    /// writes it.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passes => "Passes",
            Self::PlayerStats => "Player Stats",
            Self::Points => "Points",
            Self::Possessions => "Possessions",
            Self::DefensiveBlocks => "Defensive Blocks",
            Self::StallOutsAgainst => "Stall Outs Against",
        }
    }

    /// Canonicalizes a filename token against the closed enumeration,
    /// case-insensitively. Returns `None` for anything outside it.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
