//! End-to-end session assembly: filename classification, partial-failure
//! ingestion, completeness warnings, and the session store.

use engine_core::DatasetType;
use ingest::{SessionBuilder, SessionStore, StoreConfig};
use integration_tests::fixtures::*;

#[test]
fn mixed_batch_assembles_with_warnings() {
    let aurora_passes = passes_csv(&[completion("Alice", "Bob"), completion("Bob", "Cara")]);
    let zephyr_passes = passes_csv(&[completion("Cara", "Alice")]);
    let aurora_stats = player_stats_csv(&[("Alice", 5, "1, 2, 5"), ("Bob", 2, "3, 4")]);

    let mut builder = SessionBuilder::new();
    builder.add_file(&export_name("Passes", "Aurora"), &aurora_passes);
    builder.add_file("garbage-file.csv", b"not,an,export\n1,2,3\n");
    builder.add_file(&export_name("Passes", "Zephyr"), &zephyr_passes);
    builder.add_file(&export_name("Player Stats", "Aurora"), &aurora_stats);
    let session = builder.finish();

    // Both opponents plus the skipped file produce warnings.
    assert!(session
        .warnings()
        .iter()
        .any(|w| w.contains("garbage-file.csv")));
    assert!(session.warnings().iter().any(|w| w.contains("Aurora")));
    assert!(session.warnings().iter().any(|w| w.contains("Zephyr")));

    assert_eq!(session.games(), vec!["Aurora", "Zephyr"]);
    assert_eq!(session.table(DatasetType::Passes).unwrap().len(), 3);
    assert_eq!(session.table(DatasetType::PlayerStats).unwrap().len(), 2);
    assert!(session.table(DatasetType::Points).is_none());
}

#[test]
fn incomplete_game_warning_names_each_missing_type() {
    let passes = passes_csv(&[completion("Alice", "Bob")]);
    let points = points_csv();

    let mut builder = SessionBuilder::new();
    builder.add_file(&export_name("Passes", "Riverdale"), &passes);
    builder.add_file(&export_name("Points", "Riverdale"), &points);
    let session = builder.finish();

    let riverdale: Vec<_> = session
        .warnings()
        .iter()
        .filter(|w| w.contains("Riverdale"))
        .collect();
    assert_eq!(riverdale.len(), 1);
    for missing in [
        "Player Stats",
        "Possessions",
        "Defensive Blocks",
        "Stall Outs Against",
    ] {
        assert!(riverdale[0].contains(missing));
    }
    assert!(!session.table(DatasetType::Passes).unwrap().is_empty());
}

#[test]
fn complete_game_emits_no_completeness_warning() {
    let mut builder = SessionBuilder::new();
    let passes = passes_csv(&[completion("Alice", "Bob")]);
    let stats = player_stats_csv(&[("Alice", 1, "1")]);
    let possessions = possessions_csv(&[(true, true)]);

    builder.add_file(&export_name("Passes", "Aurora"), &passes);
    builder.add_file(&export_name("Player Stats", "Aurora"), &stats);
    builder.add_file(&export_name("Points", "Aurora"), &points_csv());
    builder.add_file(&export_name("Possessions", "Aurora"), &possessions);
    builder.add_file(&export_name("Defensive Blocks", "Aurora"), b"Player\nA\n");
    builder.add_file(
        &export_name("Stall Outs Against", "Aurora"),
        b"Player\nA\n",
    );
    let session = builder.finish();

    assert!(session.warnings().is_empty());
    assert!(session.catalog().is_complete("Aurora"));
}

#[test]
fn rows_are_game_tagged_in_upload_order() {
    let zephyr = passes_csv(&[completion("Zoe", "Bob")]);
    let aurora = passes_csv(&[completion("Amy", "Bob")]);

    let mut builder = SessionBuilder::new();
    builder.add_file(&export_name("Passes", "Zephyr"), &zephyr);
    builder.add_file(&export_name("Passes", "Aurora"), &aurora);
    let session = builder.finish();

    let table = session.table(DatasetType::Passes).unwrap();
    assert_eq!(table.value(0, "Game"), Some("Zephyr"));
    assert_eq!(table.value(1, "Game"), Some("Aurora"));
}

#[test]
fn sessions_roundtrip_through_the_store() {
    let passes = passes_csv(&[completion("Alice", "Bob")]);
    let mut builder = SessionBuilder::new();
    builder.add_file(&export_name("Passes", "Aurora"), &passes);
    let session = builder.finish();

    let store = SessionStore::new(StoreConfig::default());
    let id = store.insert(session);

    let looked_up = store.get(&id).expect("session should be retrievable");
    assert_eq!(looked_up.games(), vec!["Aurora"]);
    assert!(store.get(&uuid::Uuid::new_v4()).is_none());
}
