//! Basic example of using the npuzzle engine

use npuzzle_core::{verify, Grid, Scrambler, SolveOutcome, Solver};

fn main() {
    // Scramble a puzzle
    println!("Scrambling a 4x4 puzzle...\n");
    let mut scrambler = Scrambler::with_seed(42);
    let puzzle = scrambler.scramble(4, 120);
    println!("{}", puzzle);

    // Check solvability (a scramble always is)
    println!("Solvable: {}\n", npuzzle_core::is_solvable(&puzzle));

    // Solve it
    println!("Solving...\n");
    let solver = Solver::new();
    match solver.solve(&puzzle) {
        Ok(SolveOutcome::Solved(moves)) => {
            println!("Solved in {} moves:", moves.len());
            println!("{}\n", moves);

            // Replay the move word against the original grid
            let ok = verify::check(&puzzle, &moves).expect("replay left the grid");
            println!("Replay reaches canonical: {}", ok);
        }
        Ok(SolveOutcome::AlreadySolved) => println!("Already solved, nothing to do"),
        Ok(SolveOutcome::Unsolvable) => {
            println!("Not solvable (this shouldn't happen for a scramble!)")
        }
        Err(err) => println!("Solver defect: {}", err),
    }

    // Parse a puzzle from a description
    println!("\n--- Parsing a puzzle from a description ---\n");
    let description = "\
3       # size
1 2 3
4 5 0   # 0 is the blank
7 8 6
";
    match Grid::parse(description) {
        Ok(grid) => {
            println!("{}", grid);
            if let Ok(SolveOutcome::Solved(moves)) = solver.solve(&grid) {
                println!("Move word: {}", moves);
            }
        }
        Err(err) => println!("Parse failed: {}", err),
    }
}
