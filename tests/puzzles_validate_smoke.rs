use capture_chain::chess::piece::Color;
use capture_chain::puzzle::{Puzzle, PuzzleError};
use capture_chain::puzzles;

#[test]
fn built_in_puzzles_load_and_validate() {
    for name in puzzles::names() {
        let puzzle = puzzles::by_name(name)
            .expect("built-in puzzle must parse")
            .expect("listed name must resolve");
        assert_eq!(puzzle.name, *name);
        puzzle.validate().expect("built-in puzzle must validate");
    }
    assert!(puzzles::names().contains(&puzzles::DEFAULT_PUZZLE));
}

#[test]
fn unknown_names_resolve_to_none() {
    assert!(puzzles::by_name("no_such_puzzle").unwrap().is_none());
}

#[test]
fn malformed_position_is_reported_before_searching() {
    let err = Puzzle::from_fen("broken", "8/8/8/8").unwrap_err();
    assert!(matches!(err, PuzzleError::Fen(_)));
}

#[test]
fn more_than_one_solving_piece_fails_validation() {
    let err = Puzzle::load("two_rooks", "8/8/8/8/8/8/8/RR5n w - - 0 1").unwrap_err();
    match err {
        PuzzleError::SolverNotUnique { color, count } => {
            assert_eq!(color, Color::White);
            assert_eq!(count, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rook_swarm_describes_its_solver() {
    let puzzle = puzzles::rook_swarm().unwrap();
    assert_eq!(puzzle.solver(), Color::White);
    assert_eq!(puzzle.solver_square().map(|s| s.to_string()).as_deref(), Some("g7"));
    assert_eq!(puzzle.opponent_count(), 16);
}
