//! Test fixtures: CSV generators matching the exporter's formats.

/// Passes export header, verbose coordinate columns included.
pub const PASSES_HEADER: &str = "Thrower,Receiver,\
    \"Start X (0 -> 1 = left sideline -> right sideline)\",\
    \"Start Y (0 -> 1 = back of opponent endzone -> back of own endzone)\",\
    \"End X (0 -> 1 = left sideline -> right sideline)\",\
    \"End Y (0 -> 1 = back of opponent endzone -> back of own endzone)\",\
    Distance (m),Thrower error?,Receiver error?,Assist?";

/// Formats one Passes row.
#[allow(clippy::too_many_arguments)]
pub fn pass_row(
    thrower: &str,
    receiver: &str,
    coords: (f64, f64, f64, f64),
    distance: f64,
    thrower_error: bool,
    receiver_error: bool,
    assist: bool,
) -> String {
    let (sx, sy, ex, ey) = coords;
    format!(
        "{thrower},{receiver},{sx},{sy},{ex},{ey},{distance},{thrower_error},{receiver_error},{assist}"
    )
}

/// A forward 25m completion, the simplest valid row.
pub fn completion(thrower: &str, receiver: &str) -> String {
    pass_row(
        thrower,
        receiver,
        (0.5, 0.8, 0.5, 0.2),
        25.0,
        false,
        false,
        false,
    )
}

/// Assembles a Passes CSV from rows.
pub fn passes_csv(rows: &[String]) -> Vec<u8> {
    let mut csv = String::from(PASSES_HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');
    csv.into_bytes()
}

/// Assembles a Player Stats CSV; `players` are
/// `(name, points_played_total, points_played_list)`.
pub fn player_stats_csv(players: &[(&str, u32, &str)]) -> Vec<u8> {
    let mut csv = String::from("Player,Points played total,Points played");
    for (name, total, points) in players {
        csv.push_str(&format!("\n{name},{total},\"{points}\""));
    }
    csv.push('\n');
    csv.into_bytes()
}

/// Assembles a Possessions CSV; `possessions` are
/// `(started_on_offense, scored)` in point order.
pub fn possessions_csv(possessions: &[(bool, bool)]) -> Vec<u8> {
    let mut csv = String::from("Started point on offense?,Scored?");
    for (offense, scored) in possessions {
        csv.push_str(&format!("\n{offense},{scored}"));
    }
    csv.push('\n');
    csv.into_bytes()
}

/// A minimal Points CSV, enough to register the dataset type.
pub fn points_csv() -> Vec<u8> {
    b"Point,Our score,Their score\n1,1,0\n".to_vec()
}

/// Export file name for a dataset and opponent.
pub fn export_name(dataset: &str, opponent: &str) -> String {
    format!("{dataset} vs. {opponent} 2026-02-18_22-57-28.csv")
}
