use std::fs;

use capture_chain::chess::rules::StandardRules;
use capture_chain::core::square::Square;
use capture_chain::puzzle::Puzzle;
use capture_chain::search::node::Trail;
use capture_chain::search::tree::{SearchOptions, SearchTree};
use capture_chain::solution::{
    final_square_counts, load_report, replay_trail, write_report, SolutionError, SolutionReport,
};

fn two_corners() -> Puzzle {
    Puzzle::load("two_corners", "n6n/8/8/8/8/8/8/Q7 w - - 0 1").unwrap()
}

fn report_for(puzzle: &Puzzle) -> SolutionReport {
    let rules = StandardRules::new();
    let mut tree = SearchTree::new(&rules, puzzle.board.clone(), SearchOptions::default()).unwrap();
    let mut found: Vec<Trail<Square>> = Vec::new();
    let stats = tree.start_traverse(&rules, &mut found).unwrap();
    SolutionReport::new(puzzle, stats, found)
}

#[test]
fn report_roundtrips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("two_corners.json");

    let report = report_for(&two_corners());
    write_report(&path, &report, false).unwrap();
    let loaded = load_report(&path).unwrap();

    assert_eq!(loaded, report);
    assert_eq!(loaded.counts.solutions, 2);
    assert_eq!(loaded.start_square.map(|s| s.to_string()).as_deref(), Some("a1"));
}

#[test]
fn report_json_uses_square_names() {
    let report = report_for(&two_corners());
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["solver"], "white");
    assert_eq!(value["solutions"][0], serde_json::json!(["a1", "a8", "h8"]));
    assert_eq!(value["final_squares"], serde_json::json!({"a8": 1, "h8": 1}));
}

#[test]
fn existing_report_needs_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    fs::write(&path, "{}").unwrap();

    let report = report_for(&two_corners());
    assert!(matches!(
        write_report(&path, &report, false),
        Err(SolutionError::AlreadyExists { .. })
    ));
    write_report(&path, &report, true).unwrap();
    assert_eq!(load_report(&path).unwrap().solutions.len(), 2);
}

#[test]
fn unknown_format_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.json");

    let mut report = report_for(&two_corners());
    report.format_version = 99;
    write_report(&path, &report, false).unwrap();

    assert!(matches!(
        load_report(&path),
        Err(SolutionError::FormatVersion { found: 99, .. })
    ));
}

#[test]
fn final_squares_are_counted_per_solution() {
    let trails: Vec<Trail<Square>> = ["a1 b1", "c3 b1", "c3 d4"]
        .iter()
        .map(|t| {
            Trail::from(
                t.split(' ')
                    .map(|s| s.parse::<Square>().unwrap())
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    let counts = final_square_counts(&trails);

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[&"b1".parse::<Square>().unwrap()], 2);
    assert_eq!(counts[&"d4".parse::<Square>().unwrap()], 1);
}

#[test]
fn replay_rejects_trails_that_are_not_safe_captures() {
    let rules = StandardRules::new();
    let puzzle = two_corners();
    let trail = |names: &[&str]| -> Trail<Square> {
        Trail::from(
            names
                .iter()
                .map(|s| s.parse::<Square>().unwrap())
                .collect::<Vec<_>>(),
        )
    };

    let end = replay_trail(&rules, &puzzle.board, &trail(&["a1", "h8", "a8"])).unwrap();
    assert_eq!(end.occupied_count(), 1);

    for bad in [vec![], vec!["b1"], vec!["a1", "b2"], vec!["a1", "a8", "a1"]] {
        assert!(matches!(
            replay_trail(&rules, &puzzle.board, &trail(&bad)),
            Err(SolutionError::Replay { .. })
        ));
    }
}
