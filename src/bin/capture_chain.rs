use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use capture_chain::chess::rules::StandardRules;
use capture_chain::core::square::Square;
use capture_chain::logging::{enable_verbose_logging, init_log_file};
use capture_chain::puzzle::Puzzle;
use capture_chain::puzzles;
use capture_chain::search::node::Trail;
use capture_chain::search::sink::{LinePrinter, Tee};
use capture_chain::search::tree::{Retention, SearchOptions, SearchTree};
use capture_chain::solution::{write_report, SolutionReport};
use capture_chain::vlog;

/// Print every chain of immune captures by which the lone piece of the side to move clears
/// the board, one line of squares per solution.
#[derive(Parser, Debug)]
#[command(name = "capture_chain", version, long_about = None)]
struct Cli {
    /// Starting position in FEN
    #[arg(long, conflicts_with = "puzzle")]
    fen: Option<String>,

    /// Built-in puzzle to solve (see --list)
    #[arg(long, short = 'p')]
    puzzle: Option<String>,

    /// List built-in puzzles and exit
    #[arg(long)]
    list: bool,

    /// Also write a JSON report of all solutions
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Overwrite an existing JSON report
    #[arg(long, requires = "json")]
    force: bool,

    /// Release each subtree once it has been explored
    #[arg(long)]
    drop_explored: bool,

    /// Print search counters to stderr when done
    #[arg(long)]
    stats: bool,

    /// Log node expansions and dead ends
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Send verbose output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        for name in puzzles::available_names() {
            println!("{name}");
        }
        return;
    }

    if cli.verbose {
        enable_verbose_logging();
    }
    if let Some(path) = &cli.log_file {
        if let Err(e) = init_log_file(path) {
            eprintln!("Failed to open log file {}: {e}", path.display());
            process::exit(1);
        }
    }

    let puzzle = match load_puzzle(&cli) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("{msg}");
            process::exit(2);
        }
    };
    if let Err(e) = puzzle.validate() {
        eprintln!("Invalid puzzle {}: {e}", puzzle.name);
        process::exit(2);
    }
    vlog!(
        "puzzle {} ({}), {} opposing pieces",
        puzzle.name,
        puzzle.fen,
        puzzle.opponent_count()
    );

    let rules = StandardRules::new();
    let retention = if cli.drop_explored {
        Retention::DropExplored
    } else {
        Retention::KeepTree
    };
    let options = SearchOptions::default().with_retention(retention);

    let mut tree = match SearchTree::new(&rules, puzzle.board.clone(), options) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Search failed: {e}");
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut printer = LinePrinter::new(BufWriter::new(stdout.lock()));
    let mut collected: Vec<Trail<Square>> = Vec::new();
    let result = {
        let mut sink = Tee(&mut printer, &mut collected);
        tree.start_traverse(&rules, &mut sink)
    };
    let flushed = printer.into_inner().flush();

    let stats = match result {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Search failed: {e}");
            process::exit(1);
        }
    };
    if let Err(e) = flushed {
        eprintln!("Failed to write solutions: {e}");
        process::exit(1);
    }

    if cli.stats {
        eprintln!("Puzzle: {}", puzzle.name);
        eprintln!("  fen: {}", puzzle.fen);
        eprintln!("  opposing pieces: {}", puzzle.opponent_count());
        eprintln!("  {stats}");
    }

    if let Some(path) = &cli.json {
        let report = SolutionReport::new(&puzzle, stats, collected);
        if let Err(e) = write_report(path, &report, cli.force) {
            eprintln!("Failed to write report: {e}");
            process::exit(1);
        }
        eprintln!("Wrote {} solutions to {}", report.solutions.len(), path.display());
    }
}

fn load_puzzle(cli: &Cli) -> Result<Puzzle, String> {
    if let Some(fen) = &cli.fen {
        return Puzzle::from_fen("custom", fen).map_err(|e| format!("Invalid --fen: {e}"));
    }

    let name = cli.puzzle.as_deref().unwrap_or(puzzles::DEFAULT_PUZZLE);
    match puzzles::by_name(name) {
        Ok(Some(p)) => Ok(p),
        Ok(None) => Err(format!(
            "Unknown puzzle: {name}\n\nAvailable puzzles:\n  - {}",
            puzzles::available_names().join("\n  - ")
        )),
        Err(e) => Err(format!("Failed to load puzzle {name}: {e}")),
    }
}
