//! Column schemas and typed row extraction.
//!
//! The exporter writes verbose, human-oriented headers (the coordinate
//! columns spell out their own axis conventions). The constants here are the
//! single source of truth for them; everything downstream resolves columns
//! through this module.

use validator::Validate;

use crate::error::{Error, Result};
use crate::table::Table;

// Passes
pub const COL_THROWER: &str = "Thrower";
pub const COL_RECEIVER: &str = "Receiver";
pub const COL_START_X: &str = "Start X (0 -> 1 = left sideline -> right sideline)";
pub const COL_START_Y: &str =
    "Start Y (0 -> 1 = back of opponent endzone -> back of own endzone)";
pub const COL_END_X: &str = "End X (0 -> 1 = left sideline -> right sideline)";
pub const COL_END_Y: &str = "End Y (0 -> 1 = back of opponent endzone -> back of own endzone)";
pub const COL_DISTANCE: &str = "Distance (m)";
pub const COL_THROWER_ERROR: &str = "Thrower error?";
pub const COL_RECEIVER_ERROR: &str = "Receiver error?";
pub const COL_ASSIST: &str = "Assist?";

// Player stats
pub const COL_PLAYER: &str = "Player";
pub const COL_POINTS_PLAYED_TOTAL: &str = "Points played total";
pub const COL_POINTS_PLAYED: &str = "Points played";

// Possessions
pub const COL_STARTED_ON_OFFENSE: &str = "Started point on offense?";
pub const COL_SCORED: &str = "Scored?";

/// Tag applied to every row at ingestion with the opponent parsed from the
/// file name.
pub const COL_GAME: &str = "Game";

/// Parses an exporter boolean cell. The exports write `True`/`False`, but
/// `1`/`yes` variants show up in hand-edited files; anything else is false.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

fn parse_f64(raw: &str, row: usize, column: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::malformed_row(row, format!("{column:?} is not numeric: {raw:?}")))
}

/// One typed Passes row.
///
/// Coordinates are in the exporter's normalized unit square: x runs left
/// sideline to right sideline, y runs back of opponent endzone to back of
/// own endzone.
#[derive(Debug, Clone, Validate)]
pub struct PassRow {
    pub thrower: String,
    pub receiver: String,
    #[validate(range(min = 0.0, max = 1.0))]
    pub start_x: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub start_y: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub end_x: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub end_y: f64,
    pub distance: f64,
    pub thrower_error: bool,
    pub receiver_error: bool,
    pub assist: bool,
}

/// Resolved column indices for a Passes table.
///
/// Resolving once up front turns a missing column into one clear error
/// instead of a per-row failure storm.
#[derive(Debug, Clone, Copy)]
pub struct PassColumns {
    thrower: usize,
    receiver: usize,
    start_x: usize,
    start_y: usize,
    end_x: usize,
    end_y: usize,
    distance: usize,
    thrower_error: usize,
    receiver_error: usize,
    assist: usize,
}

impl PassColumns {
    pub fn resolve(table: &Table) -> Result<Self> {
        let col = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| Error::missing_column("Passes", name))
        };
        Ok(Self {
            thrower: col(COL_THROWER)?,
            receiver: col(COL_RECEIVER)?,
            start_x: col(COL_START_X)?,
            start_y: col(COL_START_Y)?,
            end_x: col(COL_END_X)?,
            end_y: col(COL_END_Y)?,
            distance: col(COL_DISTANCE)?,
            thrower_error: col(COL_THROWER_ERROR)?,
            receiver_error: col(COL_RECEIVER_ERROR)?,
            assist: col(COL_ASSIST)?,
        })
    }

    /// Reads one row as a typed [`PassRow`].
    ///
    /// Non-numeric coordinates or out-of-range values fail with
    /// [`Error::MalformedRow`]; callers skip the row and warn rather than
    /// abort the dataset.
    pub fn read(&self, table: &Table, row: usize) -> Result<PassRow> {
        let cells = table
            .row(row)
            .ok_or_else(|| Error::malformed_row(row, "row index out of range"))?;

        let pass = PassRow {
            thrower: cells[self.thrower].trim().to_string(),
            receiver: cells[self.receiver].trim().to_string(),
            start_x: parse_f64(&cells[self.start_x], row, COL_START_X)?,
            start_y: parse_f64(&cells[self.start_y], row, COL_START_Y)?,
            end_x: parse_f64(&cells[self.end_x], row, COL_END_X)?,
            end_y: parse_f64(&cells[self.end_y], row, COL_END_Y)?,
            distance: parse_f64(&cells[self.distance], row, COL_DISTANCE)?,
            thrower_error: parse_flag(&cells[self.thrower_error]),
            receiver_error: parse_flag(&cells[self.receiver_error]),
            assist: parse_flag(&cells[self.assist]),
        };

        pass.validate()
            .map_err(|e| Error::malformed_row(row, e.to_string()))?;

        Ok(pass)
    }
}

/// Parses a `Points played` cell: a delimited list of point indices,
/// possibly surrounded by quotes (`"1, 3, 8"`).
pub fn parse_point_list(raw: &str, row: usize) -> Result<Vec<u32>> {
    let trimmed = raw.trim().trim_matches('"').trim_matches('\'');
    let mut points = Vec::new();
    for token in trimmed.split([',', ';']) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let point = token
            .parse::<u32>()
            .map_err(|_| Error::malformed_row(row, format!("unparseable point index: {token:?}")))?;
        points.push(point);
    }
    Ok(points)
}
