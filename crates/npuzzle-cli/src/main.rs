mod render;
mod report;

use clap::{Parser, Subcommand};
use npuzzle_core::{verify, Grid, MoveSequence, Scrambler, SolveOutcome, Solver};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

/// Deterministic layer-by-layer N-puzzle solver.
#[derive(Parser)]
#[command(name = "npuzzle", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle description and print the move word.
    ///
    /// Exit status: 0 solved or already solved, 10 unsolvable, 1-7 for
    /// the parse failure causes, 9 on an internal invariant violation.
    Solve {
        /// Puzzle file; reads stdin when absent.
        file: Option<PathBuf>,
        /// Render the grid after every move.
        #[arg(long)]
        trace: bool,
        /// Milliseconds to pause between trace frames.
        #[arg(long, default_value_t = 0)]
        delay: u64,
        /// Emit a JSON report instead of plain output.
        #[arg(long)]
        json: bool,
        /// Print only the move word.
        #[arg(long)]
        quiet: bool,
    },
    /// Replay a move word against a puzzle and check the result.
    ///
    /// Exit status: 0 on OK, 11 on KO, 8 on a bad move word.
    Verify {
        /// File holding the puzzle description plus a trailing move-word
        /// line; reads stdin when absent.
        file: Option<PathBuf>,
        /// Move word to replay, instead of the trailing line.
        #[arg(long)]
        moves: Option<String>,
    },
    /// Emit a solvable scrambled puzzle description.
    Scramble {
        /// Grid size N.
        #[arg(long)]
        size: usize,
        /// Number of random blank moves; defaults to 20 per cell.
        #[arg(long)]
        steps: Option<usize>,
        /// RNG seed; random when absent.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let code = match cli.command {
        Command::Solve {
            file,
            trace,
            delay,
            json,
            quiet,
        } => run_solve(file, trace, delay, json, quiet),
        Command::Verify { file, moves } => run_verify(file, moves),
        Command::Scramble { size, steps, seed } => run_scramble(size, steps, seed),
    };
    ExitCode::from(code)
}

fn run_solve(file: Option<PathBuf>, trace: bool, delay: u64, json: bool, quiet: bool) -> u8 {
    let input = match read_input(file) {
        Ok(text) => text,
        Err(message) => {
            eprintln!("npuzzle: {message}");
            return 1;
        }
    };
    let grid = match Grid::parse(&input) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("npuzzle: {err}");
            return err.code() as u8;
        }
    };
    if !quiet && !json {
        render::print_grid(&grid, None);
    }

    let solver = Solver::new();
    let result = if trace && !json {
        let pause = Duration::from_millis(delay);
        let mut previous_blank = grid.blank();
        solver.solve_observed(&grid, &mut |_, current: &Grid| {
            // The tile that just slid is the one now occupying the
            // blank's previous cell.
            let moved = current.get(previous_blank);
            previous_blank = current.blank();
            render::print_grid(current, Some(moved));
            if !pause.is_zero() {
                thread::sleep(pause);
            }
        })
    } else {
        solver.solve(&grid)
    };

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("npuzzle: internal error: {err}");
            return 9;
        }
    };

    if json {
        println!("{}", report::render(&grid, &outcome));
        return match outcome {
            SolveOutcome::Unsolvable => 10,
            _ => 0,
        };
    }
    match outcome {
        SolveOutcome::AlreadySolved => {
            if !quiet {
                eprintln!("already solved");
            }
            println!();
            0
        }
        SolveOutcome::Solved(moves) => {
            println!("{moves}");
            0
        }
        SolveOutcome::Unsolvable => {
            eprintln!("npuzzle: puzzle is not solvable");
            10
        }
    }
}

fn run_verify(file: Option<PathBuf>, moves: Option<String>) -> u8 {
    let input = match read_input(file) {
        Ok(text) => text,
        Err(message) => {
            eprintln!("npuzzle: {message}");
            return 1;
        }
    };
    let parsed = match moves {
        Some(word) => Grid::parse(&input)
            .and_then(|grid| MoveSequence::parse(&word).map(|moves| (grid, moves))),
        None => verify::parse_puzzle_and_moves(&input),
    };
    let (grid, moves) = match parsed {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("npuzzle: {err}");
            return err.code() as u8;
        }
    };
    match verify::replay(&grid, &moves) {
        Ok(end) if end.is_solved() => {
            println!("OK");
            0
        }
        Ok(end) => {
            println!("KO");
            eprintln!("input puzzle:");
            render::print_grid(&grid, None);
            eprintln!("after replay:");
            render::print_grid(&end, None);
            11
        }
        Err(err) => {
            eprintln!("npuzzle: {err}");
            9
        }
    }
}

fn run_scramble(size: usize, steps: Option<usize>, seed: Option<u64>) -> u8 {
    if size == 0 {
        eprintln!("npuzzle: size cannot be zero");
        return 3;
    }
    let seed = seed.unwrap_or_else(rand::random);
    let steps = steps.unwrap_or(20 * size * size);
    let grid = Scrambler::with_seed(seed).scramble(size, steps);
    println!("# {size}x{size} scramble, seed {seed}, {steps} steps");
    println!("{size}");
    print!("{grid}");
    0
}

fn read_input(file: Option<PathBuf>) -> Result<String, String> {
    match file {
        Some(path) => {
            fs::read_to_string(&path).map_err(|err| format!("{}: {err}", path.display()))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("stdin: {err}"))?;
            Ok(text)
        }
    }
}
