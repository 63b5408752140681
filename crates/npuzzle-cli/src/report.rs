//! Machine-readable solve report for `--json`.

use npuzzle_core::{Grid, SolveOutcome};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub size: usize,
    pub solvable: bool,
    pub already_solved: bool,
    pub moves: String,
    pub move_count: usize,
}

impl SolveReport {
    pub fn new(grid: &Grid, outcome: &SolveOutcome) -> Self {
        let (solvable, already_solved, moves) = match outcome {
            SolveOutcome::AlreadySolved => (true, true, String::new()),
            SolveOutcome::Solved(moves) => (true, false, moves.to_string()),
            SolveOutcome::Unsolvable => (false, false, String::new()),
        };
        SolveReport {
            size: grid.size(),
            solvable,
            already_solved,
            move_count: moves.len(),
            moves,
        }
    }
}

/// Render the report as a JSON line.
pub fn render(grid: &Grid, outcome: &SolveOutcome) -> String {
    let report = SolveReport::new(grid, outcome);
    serde_json::to_string(&report).unwrap_or_else(|_| String::from("{}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use npuzzle_core::MoveSequence;

    #[test]
    fn test_report_fields() {
        let grid = Grid::solved(3);
        let outcome = SolveOutcome::Solved(MoveSequence::parse("uldr").unwrap());
        let json = render(&grid, &outcome);
        assert!(json.contains("\"moves\":\"uldr\""));
        assert!(json.contains("\"move_count\":4"));
        assert!(json.contains("\"solvable\":true"));

        let json = render(&grid, &SolveOutcome::Unsolvable);
        assert!(json.contains("\"solvable\":false"));
    }
}
