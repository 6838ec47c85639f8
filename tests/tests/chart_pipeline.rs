//! End-to-end chart derivation: ingestion through classification and
//! aggregation to serialized chart data.

use charts::{Chart, ChartDataBuilder, ChartScope, Outcome, Perspective};
use ingest::SessionBuilder;
use integration_tests::fixtures::*;

fn session_two_games() -> ingest::Session {
    let aurora = passes_csv(&[
        completion("Alice", "Bob"),
        pass_row("Alice", "Cara", (0.5, 0.8, 0.5, 0.2), 25.0, true, false, false),
        pass_row("Bob", "Alice", (0.5, 0.8, 0.5, 0.2), 30.0, false, false, true),
        pass_row("Cara", "Bob", (0.5, 0.6, 0.5, 0.55), 6.0, false, false, false),
    ]);
    let zephyr = passes_csv(&[completion("Alice", "Cara")]);
    let stats = player_stats_csv(&[
        ("Alice", 3, "1, 2, 4"),
        ("Bob", 1, "2"),
        ("Cara", 2, "1, 4"),
    ]);
    let possessions = possessions_csv(&[(true, true), (false, false), (true, false), (true, true)]);

    let mut builder = SessionBuilder::new();
    builder.add_file(&export_name("Passes", "Aurora"), &aurora);
    builder.add_file(&export_name("Passes", "Zephyr"), &zephyr);
    builder.add_file(&export_name("Player Stats", "Aurora"), &stats);
    builder.add_file(&export_name("Possessions", "Aurora"), &possessions);
    builder.finish()
}

#[test]
fn player_charts_classify_and_order_segments() {
    let session = session_two_games();
    let builder = ChartDataBuilder::default();

    let charts = builder
        .charts(&session, &ChartScope::player("Alice"))
        .unwrap();
    let throws = charts
        .iter()
        .find_map(|c| match c {
            Chart::TouchMap(map)
                if map.perspective == Perspective::Throws && !map.origin_relative =>
            {
                Some(map)
            }
            _ => None,
        })
        .expect("absolute throws chart");

    // Alice threw three passes across both games: a long completion, a
    // throwaway, and another completion. Errors draw last.
    assert_eq!(throws.segments.len(), 3);
    assert_eq!(
        throws.segments.last().unwrap().outcome,
        Outcome::ThrowerError
    );
    assert!(throws
        .segments
        .iter()
        .all(|s| s.player == "Alice" && s.perspective == Perspective::Throws));
}

#[test]
fn reception_assist_renders_as_goal() {
    let session = session_two_games();
    let builder = ChartDataBuilder::default();

    let charts = builder
        .charts(&session, &ChartScope::player("Alice"))
        .unwrap();
    let receptions = charts
        .iter()
        .find_map(|c| match c {
            Chart::TouchMap(map)
                if map.perspective == Perspective::Receptions && !map.origin_relative =>
            {
                Some(map)
            }
            _ => None,
        })
        .expect("absolute receptions chart");

    assert_eq!(receptions.legend[2].label, "Goal");
    assert!(receptions
        .segments
        .iter()
        .any(|s| s.outcome == Outcome::Assist));
}

#[test]
fn team_single_game_playtime_uses_possession_labels() {
    let session = session_two_games();
    let builder = ChartDataBuilder::default();

    let charts = builder
        .charts(&session, &ChartScope::team().in_game("Aurora"))
        .unwrap();
    let matrix = charts
        .iter()
        .find_map(|c| match c {
            Chart::Playtime(matrix) => Some(matrix),
            _ => None,
        })
        .expect("playtime matrix");

    // Point columns are the union {1, 2, 4}; labels come from the four
    // possessions, truncated to three, plus TOTAL.
    assert_eq!(
        matrix.columns,
        vec!["O: 1-0", "D: 1-1", "O: 1-1 BREAK", "TOTAL"]
    );

    // Ascending by points played: Bob, Cara, Alice.
    assert_eq!(matrix.players, vec!["Bob", "Cara", "Alice"]);

    for row in &matrix.cells {
        let total = row.last().unwrap().raw.unwrap();
        let max_running = row[..row.len() - 1]
            .iter()
            .filter_map(|c| c.raw)
            .max()
            .unwrap_or(0);
        assert_eq!(total, max_running);
    }
}

#[test]
fn all_games_playtime_total_column_sums_rows() {
    let session = session_two_games();
    let builder = ChartDataBuilder::default();

    let charts = builder.charts(&session, &ChartScope::team()).unwrap();
    let matrix = charts
        .iter()
        .find_map(|c| match c {
            Chart::Playtime(matrix) => Some(matrix),
            _ => None,
        })
        .expect("playtime matrix");

    assert_eq!(matrix.columns.last().map(String::as_str), Some("TOTAL"));
    for row in &matrix.cells {
        let total = row.last().unwrap().raw.unwrap();
        let sum: u32 = row[..row.len() - 1].iter().filter_map(|c| c.raw).sum();
        assert_eq!(total, sum);
    }
}

#[test]
fn chart_data_serializes_for_the_renderer() {
    let session = session_two_games();
    let builder = ChartDataBuilder::default();

    let charts = builder.charts(&session, &ChartScope::team()).unwrap();
    let json = serde_json::to_value(&charts).unwrap();
    let rendered = json.as_array().unwrap();
    assert!(!rendered.is_empty());

    // Touch-map segments carry outcome, color-bearing legend, and geometry.
    let touchmap = rendered
        .iter()
        .find(|c| c["kind"] == "touch_map")
        .expect("serialized touch-map");
    assert!(touchmap["legend"][0]["color"]
        .as_str()
        .unwrap()
        .starts_with('#'));
    assert!(touchmap["segments"][0]["start"]["x"].is_number());
}

#[test]
fn empty_scope_returns_no_charts_not_an_error() {
    let session = session_two_games();
    let builder = ChartDataBuilder::default();

    let charts = builder
        .charts(&session, &ChartScope::player("Nobody"))
        .unwrap();
    assert!(charts.is_empty());
}
