//! Playing-time matrix aggregation.
//!
//! Two heatmap views over the Player Stats export: a player-by-game summary
//! across the whole session, and a player-by-point running count inside one
//! game, with column labels derived from the Possessions record.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::warn;

use engine_core::schema::{
    parse_flag, parse_point_list, COL_GAME, COL_PLAYER, COL_POINTS_PLAYED,
    COL_POINTS_PLAYED_TOTAL, COL_SCORED, COL_STARTED_ON_OFFENSE,
};
use engine_core::{Error, Result, Table};

/// Trailing column label in both matrix views.
pub const TOTAL_LABEL: &str = "TOTAL";

/// One heatmap cell. `raw` is the displayed count (`None` renders empty,
/// not zero); `intensity` drives color only and never changes the number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlaytimeCell {
    pub raw: Option<u32>,
    pub intensity: f64,
}

/// Player-by-column playing time heatmap data.
///
/// Rows are sorted ascending by TOTAL. Each row's TOTAL cell equals the sum
/// (all-games view) or final running count (single-game view) of the other
/// cells.
#[derive(Debug, Clone, Serialize)]
pub struct PlaytimeMatrix {
    /// Row labels, one per player.
    pub players: Vec<String>,
    /// Column labels; the last one is always [`TOTAL_LABEL`].
    pub columns: Vec<String>,
    /// `cells[row][column]`, aligned with `players` and `columns`.
    pub cells: Vec<Vec<PlaytimeCell>>,
}

/// Normalizes every column against its own max among players who played.
/// A zero-activity column divides by 1 so nothing blows up.
fn normalize_columns(rows: &mut [Vec<PlaytimeCell>]) {
    let columns = rows.first().map_or(0, Vec::len);
    for col in 0..columns {
        let max = rows
            .iter()
            .filter_map(|row| row[col].raw)
            .max()
            .unwrap_or(0)
            .max(1) as f64;
        for row in rows.iter_mut() {
            row[col].intensity = row[col].raw.map_or(0.0, |v| v as f64 / max);
        }
    }
}

/// All-games view: total points played per player per game.
pub fn all_games(stats: &Table) -> Result<PlaytimeMatrix> {
    let missing = |name: &str| Error::missing_column("Player Stats", name);
    stats.column(COL_PLAYER).ok_or_else(|| missing(COL_PLAYER))?;
    stats.column(COL_GAME).ok_or_else(|| missing(COL_GAME))?;
    stats
        .column(COL_POINTS_PLAYED_TOTAL)
        .ok_or_else(|| missing(COL_POINTS_PLAYED_TOTAL))?;

    let mut games: BTreeSet<String> = BTreeSet::new();
    let mut counts: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();

    for index in 0..stats.len() {
        let player = stats.value(index, COL_PLAYER).unwrap_or("").trim();
        let game = stats.value(index, COL_GAME).unwrap_or("").trim();
        if player.is_empty() || game.is_empty() {
            continue;
        }
        let raw_total = stats.value(index, COL_POINTS_PLAYED_TOTAL).unwrap_or("");
        let total = match raw_total.trim().parse::<u32>() {
            Ok(total) => total,
            Err(_) => {
                warn!(row = index, value = raw_total, "skipping stats row with bad total");
                continue;
            }
        };
        games.insert(game.to_string());
        *counts
            .entry(player.to_string())
            .or_default()
            .entry(game.to_string())
            .or_default() += total;
    }

    let game_list: Vec<String> = games.into_iter().collect();

    let mut rows: Vec<(String, Vec<PlaytimeCell>, u32)> = counts
        .into_iter()
        .map(|(player, per_game)| {
            let mut cells: Vec<PlaytimeCell> = game_list
                .iter()
                .map(|game| PlaytimeCell {
                    raw: per_game.get(game).copied(),
                    intensity: 0.0,
                })
                .collect();
            let total: u32 = cells.iter().filter_map(|c| c.raw).sum();
            cells.push(PlaytimeCell {
                raw: Some(total),
                intensity: 0.0,
            });
            (player, cells, total)
        })
        .collect();

    // Ascending by total playtime; BTreeMap input keeps name order stable
    // among ties.
    rows.sort_by_key(|(_, _, total)| *total);

    let players: Vec<String> = rows.iter().map(|(p, _, _)| p.clone()).collect();
    let mut cells: Vec<Vec<PlaytimeCell>> = rows.into_iter().map(|(_, c, _)| c).collect();
    normalize_columns(&mut cells);

    let mut columns = game_list;
    columns.push(TOTAL_LABEL.to_string());

    Ok(PlaytimeMatrix {
        players,
        columns,
        cells,
    })
}

/// Single-game view: running count of points played, one column per point.
///
/// `possessions` supplies the point labels when present; otherwise columns
/// fall back to the bare point indices.
pub fn single_game(
    stats: &Table,
    possessions: Option<&Table>,
    game: &str,
) -> Result<PlaytimeMatrix> {
    let missing = |name: &str| Error::missing_column("Player Stats", name);
    stats.column(COL_PLAYER).ok_or_else(|| missing(COL_PLAYER))?;
    stats
        .column(COL_POINTS_PLAYED)
        .ok_or_else(|| missing(COL_POINTS_PLAYED))?;

    let scoped = stats.filter_eq(COL_GAME, game);

    let mut played: BTreeMap<String, BTreeSet<u32>> = BTreeMap::new();
    for index in 0..scoped.len() {
        let player = scoped.value(index, COL_PLAYER).unwrap_or("").trim();
        if player.is_empty() {
            continue;
        }
        let raw = scoped.value(index, COL_POINTS_PLAYED).unwrap_or("");
        let points = match parse_point_list(raw, index) {
            Ok(points) => points,
            Err(err) => {
                warn!(row = index, %err, "skipping stats row with bad point list");
                continue;
            }
        };
        played
            .entry(player.to_string())
            .or_default()
            .extend(points);
    }

    let point_columns: Vec<u32> = played
        .values()
        .flat_map(|points| points.iter().copied())
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect();

    let mut rows: Vec<(String, Vec<PlaytimeCell>, u32)> = played
        .into_iter()
        .map(|(player, points)| {
            let mut running = 0u32;
            let mut cells: Vec<PlaytimeCell> = point_columns
                .iter()
                .map(|point| {
                    if points.contains(point) {
                        running += 1;
                        PlaytimeCell {
                            raw: Some(running),
                            intensity: 0.0,
                        }
                    } else {
                        // Unplayed points stay empty, never zero.
                        PlaytimeCell::default()
                    }
                })
                .collect();
            cells.push(PlaytimeCell {
                raw: Some(running),
                intensity: 0.0,
            });
            (player, cells, running)
        })
        .collect();

    rows.sort_by_key(|(_, _, total)| *total);

    let players: Vec<String> = rows.iter().map(|(p, _, _)| p.clone()).collect();
    let mut cells: Vec<Vec<PlaytimeCell>> = rows.into_iter().map(|(_, c, _)| c).collect();
    normalize_columns(&mut cells);

    let mut columns = match possessions {
        Some(possessions) => {
            let mut labels = possession_labels(possessions, game)?;
            // Align 1:1 with the point columns.
            labels.resize(point_columns.len(), String::new());
            labels
        }
        None => point_columns.iter().map(u32::to_string).collect(),
    };
    columns.push(TOTAL_LABEL.to_string());

    Ok(PlaytimeMatrix {
        players,
        columns,
        cells,
    })
}

/// Point labels from the Possessions record: running score with offense or
/// defense role, flagged `BREAK` when role and outcome are inconsistent.
pub fn possession_labels(possessions: &Table, game: &str) -> Result<Vec<String>> {
    let missing = |name: &str| Error::missing_column("Possessions", name);
    possessions
        .column(COL_STARTED_ON_OFFENSE)
        .ok_or_else(|| missing(COL_STARTED_ON_OFFENSE))?;
    possessions
        .column(COL_SCORED)
        .ok_or_else(|| missing(COL_SCORED))?;

    let scoped = possessions.filter_eq(COL_GAME, game);

    let mut ours = 0u32;
    let mut theirs = 0u32;
    let mut labels = Vec::with_capacity(scoped.len());

    for index in 0..scoped.len() {
        let offense = parse_flag(scoped.value(index, COL_STARTED_ON_OFFENSE).unwrap_or(""));
        let scored = parse_flag(scoped.value(index, COL_SCORED).unwrap_or(""));

        // A scoring possession is ours; a scoreless possession only counts
        // against us when the point started on defense (an offense turnover
        // on its own decides nothing).
        if scored {
            ours += 1;
        } else if !offense {
            theirs += 1;
        }

        let role = if offense { "O" } else { "D" };
        let inconsistent = offense != scored;
        let suffix = if inconsistent { " BREAK" } else { "" };
        labels.push(format!("{role}: {ours}-{theirs}{suffix}"));
    }

    Ok(labels)
}
