//! Snapshot save/load against a scratch directory.

use field_day::persistence::{self, snapshot_path};
use field_day::{Game, MatchReport, Roster, Scoreboard, Submission};
use std::path::PathBuf;
use uuid::Uuid;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("field_day_test_{}", Uuid::new_v4()))
}

#[test]
fn missing_snapshot_loads_as_none() {
    let dir = scratch_dir();
    assert!(persistence::load(&dir).unwrap().is_none());
}

#[test]
fn snapshot_round_trips_the_whole_scoreboard() {
    let dir = scratch_dir();
    let mut roster = Roster::new();
    for (i, name) in ["Ann", "Bob", "Cas", "Dirk"].iter().enumerate() {
        roster.register(*name, i as u32 + 1).unwrap();
    }
    let mut board = Scoreboard::new(roster);
    board.submit(Submission::count(1, 33, true)).unwrap();
    board.submit(Submission::ordering(vec![4, 3, 2, 1], vec![2])).unwrap();
    board.generate_bracket_with_order(Game::Kubb, &[1, 2, 3, 4]).unwrap();
    board
        .record_match_result(Game::Kubb, &MatchReport::new("kubb_r1_m1", 4, 3))
        .unwrap();

    persistence::save(&dir, &board).unwrap();
    assert!(snapshot_path(&dir).exists());
    assert!(!snapshot_path(&dir).with_extension("json.tmp").exists());

    let loaded = persistence::load(&dir).unwrap().unwrap();
    assert_eq!(loaded, board);
    assert_eq!(loaded.rankings(), board.rankings());

    // Saving again replaces the snapshot.
    board.clear_all();
    persistence::save(&dir, &board).unwrap();
    let loaded = persistence::load(&dir).unwrap().unwrap();
    assert!(loaded.results().is_empty());
    assert_eq!(loaded.roster().len(), 4);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn corrupt_snapshot_is_an_error() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(snapshot_path(&dir), b"{ not json").unwrap();
    assert!(matches!(
        persistence::load(&dir),
        Err(persistence::PersistenceError::Serialization(_))
    ));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn save_into_an_unusable_directory_fails() {
    let blocker = scratch_dir();
    std::fs::write(&blocker, b"not a directory").unwrap();
    let err = persistence::save(&blocker, &Scoreboard::default()).unwrap_err();
    assert!(matches!(err, persistence::PersistenceError::Io(_)));
    std::fs::remove_file(&blocker).unwrap();
}
