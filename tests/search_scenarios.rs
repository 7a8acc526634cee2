use std::fmt;

use capture_chain::chess::board::Board;
use capture_chain::chess::rules::StandardRules;
use capture_chain::core::square::Square;
use capture_chain::puzzles;
use capture_chain::search::node::Trail;
use capture_chain::search::rules::RulesLike;
use capture_chain::search::sink::LinePrinter;
use capture_chain::search::tree::{solve, SearchOptions, SearchTree};
use capture_chain::search::SearchError;
use capture_chain::solution::replay_trail;

fn solutions_of(fen: &str) -> Vec<Vec<String>> {
    let board = Board::from_fen(fen).unwrap();
    solve(&StandardRules::new(), board)
        .unwrap()
        .iter()
        .map(|t| t.squares().iter().map(Square::to_string).collect())
        .collect()
}

#[test]
fn lone_piece_is_solved_without_expansion() {
    let rules = StandardRules::new();
    let puzzle = puzzles::empty_board().unwrap();
    let mut tree = SearchTree::new(&rules, puzzle.board, SearchOptions::default()).unwrap();
    let mut found: Vec<Trail<Square>> = Vec::new();
    let stats = tree.start_traverse(&rules, &mut found).unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].to_string(), "e4");
    assert_eq!(stats.nodes, 1);
    assert!(tree.root().children().is_empty());
}

#[test]
fn single_undefended_neighbour_gives_one_two_square_trail() {
    assert_eq!(solutions_of(puzzles::LONE_ROOK_FEN), [["a1", "b1"]]);
}

#[test]
fn only_capture_lands_on_a_defended_square() {
    let rules = StandardRules::new();
    let puzzle = puzzles::guarded_pawn().unwrap();
    let mut tree = SearchTree::new(&rules, puzzle.board, SearchOptions::default()).unwrap();
    let mut found: Vec<Trail<Square>> = Vec::new();
    let stats = tree.start_traverse(&rules, &mut found).unwrap();

    assert!(found.is_empty());
    assert_eq!(stats.dead_ends, 1);
    assert_eq!(stats.nodes, 1);
}

#[test]
fn blocked_target_becomes_reachable_after_first_capture() {
    assert_eq!(solutions_of(puzzles::KNIGHT_PAIR_FEN), [["a1", "c1", "e1"]]);
}

#[test]
fn solutions_arrive_in_generation_order() {
    assert_eq!(
        solutions_of("n6n/8/8/8/8/8/8/Q7 w - - 0 1"),
        [["a1", "a8", "h8"], ["a1", "h8", "a8"]]
    );
}

#[test]
fn defence_is_judged_after_the_capturing_piece_moves() {
    // Rxc4 would uncover the h4 rook's line onto c4; Rxh4 first is safe.
    assert_eq!(
        solutions_of("8/8/8/8/2nR3r/8/8/8 w - - 0 1"),
        [["d4", "h4", "c4"]]
    );
}

#[test]
fn each_promotion_is_its_own_branch() {
    let found = solutions_of("1n6/P7/8/8/8/8/8/8 w - - 0 1");
    assert_eq!(found.len(), 4);
    assert!(found.iter().all(|t| t == &["a7", "b8"]));
}

#[test]
fn black_can_be_the_solving_side() {
    assert_eq!(
        solutions_of("8/8/8/8/8/8/8/rN6 b - - 0 1"),
        [["a1", "b1"]]
    );
}

#[test]
fn pawn_on_the_first_rank_is_an_ordinary_target() {
    assert_eq!(solutions_of("8/8/8/8/8/8/8/Rp6 w - - 0 1"), [["a1", "b1"]]);
}

#[test]
fn saturated_move_counters_do_not_abort_the_search() {
    assert_eq!(
        solutions_of("8/8/8/8/8/8/8/rN6 b - - 4294967295 4294967295"),
        [["a1", "b1"]]
    );
}

#[test]
fn rook_swarm_has_a_single_solution() {
    let rules = StandardRules::new();
    let puzzle = puzzles::rook_swarm().unwrap();
    puzzle.validate().unwrap();

    let mut tree = SearchTree::new(&rules, puzzle.board.clone(), SearchOptions::default()).unwrap();
    let mut found: Vec<Trail<Square>> = Vec::new();
    let stats = tree.start_traverse(&rules, &mut found).unwrap();

    assert_eq!(stats.solutions, 1);
    assert_eq!(stats.nodes, 22);
    assert_eq!(stats.dead_ends, 1);
    assert_eq!(stats.max_depth, 16);
    assert_eq!(
        found[0].to_string(),
        "g7 h7 h6 h5 h4 h3 h2 c2 c4 a4 a5 a6 a7 c7 d7 d6 d3"
    );
}

#[test]
fn rook_swarm_solutions_replay_to_a_lone_piece() {
    let rules = StandardRules::new();
    let puzzle = puzzles::rook_swarm().unwrap();
    let found = solve(&rules, puzzle.board.clone()).unwrap();

    for trail in &found {
        assert_eq!(trail.len(), puzzle.opponent_count() + 1);
        assert_eq!(trail.first(), puzzle.solver_square());
        assert!(trail.squares().windows(2).all(|w| w[0] != w[1]));

        let end = replay_trail(&rules, &puzzle.board, trail).unwrap();
        assert_eq!(end.occupied_count(), 1);
    }
}

#[test]
fn repeated_searches_agree() {
    let rules = StandardRules::new();
    let puzzle = puzzles::rook_swarm().unwrap();
    let a = solve(&rules, puzzle.board.clone()).unwrap();
    let b = solve(&rules, puzzle.board.clone()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn printer_writes_one_line_per_solution() {
    let rules = StandardRules::new();
    let board = Board::from_fen("n6n/8/8/8/8/8/8/Q7 w - - 0 1").unwrap();
    let mut tree = SearchTree::new(&rules, board, SearchOptions::default()).unwrap();
    let mut printer = LinePrinter::new(Vec::new());
    tree.start_traverse(&rules, &mut printer).unwrap();

    assert_eq!(printer.lines(), 2);
    let text = String::from_utf8(printer.into_inner()).unwrap();
    assert_eq!(text, "a1 a8 h8\na1 h8 a8\n");
}

#[test]
fn root_needs_exactly_one_solving_piece() {
    let rules = StandardRules::new();
    for (fen, expected) in [
        ("8/8/8/8/8/8/8/RR6 w - - 0 1", 2),
        ("8/8/8/8/8/8/8/n7 w - - 0 1", 0),
    ] {
        let board = Board::from_fen(fen).unwrap();
        match SearchTree::new(&rules, board, SearchOptions::default()) {
            Err(SearchError::SolverNotUnique { count, .. }) => assert_eq!(count, expected),
            Err(e) => panic!("unexpected error for {fen}: {e}"),
            Ok(_) => panic!("{fen} should be rejected"),
        }
    }
}

/// Toy engine whose captures duplicate the solving piece.
struct SplittingRules;

#[derive(Clone, Debug)]
struct Counts {
    solvers: u8,
    foes: u8,
}

#[derive(Clone, Debug)]
struct Take(u8);

impl fmt::Display for Take {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl RulesLike for SplittingRules {
    type Board = Counts;
    type Move = Take;
    type Square = u8;
    type Color = bool;

    fn side_to_move(&self, _board: &Counts) -> bool {
        true
    }

    fn opponent(&self, color: bool) -> bool {
        !color
    }

    fn pieces_of(&self, board: &Counts, color: bool) -> Vec<u8> {
        if color {
            (0..board.solvers).collect()
        } else {
            (100..100 + board.foes).collect()
        }
    }

    fn piece_count(&self, board: &Counts) -> usize {
        (board.solvers + board.foes) as usize
    }

    fn legal_captures(&self, board: &Counts) -> Vec<Take> {
        (0..board.foes).map(Take).collect()
    }

    fn origin(&self, _mv: &Take) -> u8 {
        0
    }

    fn destination(&self, mv: &Take) -> u8 {
        100 + mv.0
    }

    fn is_attacked_by(&self, _board: &Counts, _sq: u8, _by: bool) -> bool {
        false
    }

    fn play(&self, board: &Counts, _mv: &Take) -> Counts {
        Counts {
            solvers: 2,
            foes: board.foes - 1,
        }
    }

    fn pass(&self, board: &Counts) -> Counts {
        board.clone()
    }
}

#[test]
fn broken_uniqueness_mid_search_aborts_everything() {
    let rules = SplittingRules;
    let start = Counts {
        solvers: 1,
        foes: 2,
    };
    let mut tree = SearchTree::new(&rules, start, SearchOptions::default()).unwrap();
    let mut found: Vec<Trail<u8>> = Vec::new();

    let err = tree.start_traverse(&rules, &mut found).unwrap_err();
    match err {
        SearchError::SolverNotUnique { count, trail } => {
            assert_eq!(count, 2);
            assert_eq!(trail, "0");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(found.is_empty());
}
