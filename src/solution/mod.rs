//! Solution reports and trail replay.
//!
//! A report is a JSON document holding every solution trail of one search run, in discovery
//! order, plus the run counters. Trails only store squares, so [`replay_trail`] re-derives the
//! capture sequence behind a trail; promotions are the one ambiguity and are resolved by
//! backtracking.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chess::piece::Color;
use crate::core::square::Square;
use crate::puzzle::Puzzle;
use crate::search::node::Trail;
use crate::search::rules::RulesLike;
use crate::search::stats::SearchStats;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SolutionError {
    #[error("io error at {stage} for {path}: {source}")]
    Io {
        stage: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("json error at {stage} for {path}: {source}")]
    Json {
        stage: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} already exists (pass --force to overwrite)")]
    AlreadyExists { path: String },
    #[error("unsupported report format version {found} (expected {expected})")]
    FormatVersion { found: u32, expected: u32 },
    #[error("trail [{trail}] cannot be replayed: {reason}")]
    Replay { trail: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionReport {
    pub format_version: u32,
    pub created_unix_secs: u64,
    pub puzzle: String,
    pub fen: String,
    pub solver: Color,
    pub start_square: Option<Square>,
    pub counts: SearchStats,
    /// Number of solutions ending on each square.
    pub final_squares: BTreeMap<Square, u64>,
    pub solutions: Vec<Trail<Square>>,
}

impl SolutionReport {
    pub fn new(puzzle: &Puzzle, counts: SearchStats, solutions: Vec<Trail<Square>>) -> Self {
        let created_unix_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            format_version: FORMAT_VERSION,
            created_unix_secs,
            puzzle: puzzle.name.clone(),
            fen: puzzle.fen.clone(),
            solver: puzzle.solver(),
            start_square: puzzle.solver_square(),
            counts,
            final_squares: final_square_counts(&solutions).into_iter().collect(),
            solutions,
        }
    }
}

/// How many solutions end on each square.
pub fn final_square_counts(solutions: &[Trail<Square>]) -> FxHashMap<Square, u64> {
    let mut out: FxHashMap<Square, u64> = FxHashMap::default();
    for sq in solutions.iter().filter_map(Trail::last) {
        *out.entry(sq).or_insert(0) += 1;
    }
    out
}

/// Write `report` as pretty JSON. Refuses to overwrite an existing file unless `force`.
pub fn write_report(
    path: &Path,
    report: &SolutionReport,
    force: bool,
) -> Result<(), SolutionError> {
    let path_str = path.display().to_string();
    if path.exists() && !force {
        return Err(SolutionError::AlreadyExists { path: path_str });
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SolutionError::Io {
            stage: "write_report",
            path: parent.display().to_string(),
            source,
        })?;
    }

    let file = fs::File::create(path).map_err(|source| SolutionError::Io {
        stage: "write_report",
        path: path_str.clone(),
        source,
    })?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, report).map_err(|source| SolutionError::Json {
        stage: "write_report",
        path: path_str.clone(),
        source,
    })?;
    w.write_all(b"\n")
        .and_then(|_| w.flush())
        .map_err(|source| SolutionError::Io {
            stage: "write_report",
            path: path_str,
            source,
        })
}

pub fn load_report(path: &Path) -> Result<SolutionReport, SolutionError> {
    let path_str = path.display().to_string();
    let file = fs::File::open(path).map_err(|source| SolutionError::Io {
        stage: "load_report",
        path: path_str.clone(),
        source,
    })?;
    let report: SolutionReport =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SolutionError::Json {
            stage: "load_report",
            path: path_str,
            source,
        })?;
    if report.format_version != FORMAT_VERSION {
        return Err(SolutionError::FormatVersion {
            found: report.format_version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(report)
}

/// Replay `trail` from `board` and return the board after its last capture (and pass).
///
/// Every step must be a safe capture from one trail square to the next.
pub fn replay_trail<R: RulesLike>(
    rules: &R,
    board: &R::Board,
    trail: &Trail<R::Square>,
) -> Result<R::Board, SolutionError> {
    let fail = |reason: &str| SolutionError::Replay {
        trail: trail.to_string(),
        reason: reason.to_string(),
    };

    let start = trail.first().ok_or_else(|| fail("trail is empty"))?;
    let solver = rules.side_to_move(board);
    if rules.pieces_of(board, solver) != [start] {
        return Err(fail("first square is not the lone solving piece"));
    }

    replay_from(rules, board, trail.squares())
        .ok_or_else(|| fail("no sequence of safe captures follows these squares"))
}

fn replay_from<R: RulesLike>(
    rules: &R,
    board: &R::Board,
    squares: &[R::Square],
) -> Option<R::Board> {
    let &[from, to, ..] = squares else {
        return Some(board.clone());
    };
    let opponent = rules.opponent(rules.side_to_move(board));

    for mv in rules.legal_captures(board) {
        if rules.origin(&mv) != from || rules.destination(&mv) != to {
            continue;
        }
        let after = rules.play(board, &mv);
        if rules.is_attacked_by(&after, to, opponent) {
            continue;
        }
        let next = rules.pass(&after);
        if let Some(end) = replay_from(rules, &next, &squares[1..]) {
            return Some(end);
        }
    }
    None
}
