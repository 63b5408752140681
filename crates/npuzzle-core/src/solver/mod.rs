//! Layer-by-layer reduction solver.
//!
//! Restores a solvable grid by freezing rows top-to-bottom down to the
//! last two, reducing the remaining two-row band column-by-column, and
//! resolving the final 2x2 block. Deterministic: no search, no
//! backtracking, no heuristics. Every step preserves previously placed
//! tiles, which is what the focus/alignment machinery is for.

mod align;
mod band;
mod focus;
mod rows;

use crate::error::SolveError;
use crate::grid::{Grid, Move, MoveSequence, Position};
use crate::parity;
use serde::{Deserialize, Serialize};

/// Terminal result of a solve: the three distinguishable outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// The input was already canonical; no moves were made.
    AlreadySolved,
    /// The reduction succeeded; replaying the moves on the input yields
    /// the canonical configuration.
    Solved(MoveSequence),
    /// The parity oracle rejected the input; no moves were made.
    Unsolvable,
}

/// Stateless solver facade — all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Solve the puzzle, returning the move sequence that restores it.
    pub fn solve(&self, grid: &Grid) -> Result<SolveOutcome, SolveError> {
        self.solve_observed(grid, &mut |_, _| {})
    }

    /// Like [`Solver::solve`], additionally invoking `observe` after every
    /// applied move. Rendering and pacing belong to the observer, never to
    /// the solver.
    pub fn solve_observed(
        &self,
        grid: &Grid,
        observe: &mut dyn FnMut(Move, &Grid),
    ) -> Result<SolveOutcome, SolveError> {
        if !parity::is_solvable(grid) {
            return Ok(SolveOutcome::Unsolvable);
        }
        if grid.is_solved() {
            return Ok(SolveOutcome::AlreadySolved);
        }
        let mut reduction = Reduction {
            grid: grid.clone(),
            moves: MoveSequence::new(),
            observe,
            stage: "reduction",
        };
        reduction.run()?;
        Ok(SolveOutcome::Solved(reduction.moves))
    }
}

/// Working state of one reduction: the grid copy being mutated, the move
/// log, the observer, and the label of the routine currently running
/// (diagnostic context for invariant violations).
pub(crate) struct Reduction<'a> {
    pub(crate) grid: Grid,
    moves: MoveSequence,
    observe: &'a mut dyn FnMut(Move, &Grid),
    stage: &'static str,
}

impl Reduction<'_> {
    fn run(&mut self) -> Result<(), SolveError> {
        let n = self.grid.size();
        for row in 0..n.saturating_sub(2) {
            self.solve_row(row)?;
        }
        self.solve_band()?;
        self.enter("reduction");
        if !self.grid.is_solved() {
            return Err(self.postcondition());
        }
        Ok(())
    }

    pub(crate) fn enter(&mut self, stage: &'static str) {
        self.stage = stage;
    }

    pub(crate) fn size(&self) -> usize {
        self.grid.size()
    }

    pub(crate) fn blank(&self) -> Position {
        self.grid.blank()
    }

    /// Apply one move, record it, and notify the observer.
    pub(crate) fn emit(&mut self, mv: Move) -> Result<(), SolveError> {
        self.grid.apply(mv).map_err(|source| SolveError::IllegalMove {
            stage: self.stage,
            source,
        })?;
        self.moves.push(mv);
        (self.observe)(mv, &self.grid);
        Ok(())
    }

    /// Apply a literal move macro given as a word over `udlr`.
    pub(crate) fn run_macro(&mut self, word: &str) -> Result<(), SolveError> {
        for ch in word.chars() {
            let mv = Move::from_char(ch).ok_or(SolveError::MacroCharacter {
                stage: self.stage,
                ch,
            })?;
            self.emit(mv)?;
        }
        Ok(())
    }

    /// Find a tile, as a hard error if it is absent (impossible on a
    /// validated grid).
    pub(crate) fn locate(&self, tile: u16) -> Result<Position, SolveError> {
        self.grid
            .position_of(tile)
            .ok_or(SolveError::TileNotFound {
                stage: self.stage,
                tile,
            })
    }

    pub(crate) fn postcondition(&self) -> SolveError {
        SolveError::Postcondition {
            stage: self.stage,
            blank: self.grid.blank(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scramble::Scrambler;
    use crate::verify;

    fn rows3(rows: [[u16; 3]; 3]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn solve_and_replay(grid: &Grid) {
        let solver = Solver::new();
        match solver.solve(grid).expect("reduction must not violate invariants") {
            SolveOutcome::AlreadySolved => assert!(grid.is_solved()),
            SolveOutcome::Solved(moves) => {
                assert!(!grid.is_solved());
                assert!(
                    verify::check(grid, &moves).expect("replay must stay on the grid"),
                    "replay did not reach canonical for:\n{}",
                    grid
                );
            }
            SolveOutcome::Unsolvable => panic!("solvable grid reported unsolvable:\n{}", grid),
        }
    }

    #[test]
    fn test_canonical_inputs_need_no_moves() {
        for n in 1..=6 {
            let outcome = Solver::new().solve(&Grid::solved(n)).unwrap();
            assert_eq!(outcome, SolveOutcome::AlreadySolved, "size {}", n);
        }
    }

    #[test]
    fn test_one_move_scramble() {
        let grid = rows3([[1, 2, 3], [4, 5, 0], [7, 8, 6]]);
        solve_and_replay(&grid);
    }

    #[test]
    fn test_unsolvable_halts_without_moves() {
        let grid = rows3([[2, 1, 3], [4, 5, 6], [7, 8, 0]]);
        let outcome = Solver::new().solve(&grid).unwrap();
        assert_eq!(outcome, SolveOutcome::Unsolvable);
    }

    #[test]
    fn test_every_two_by_two_state() {
        let values = [0u16, 1, 2, 3];
        let mut solvable = 0;
        // All 24 arrangements, via index permutations.
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let idx = [a, b, c, d];
                        let mut used = [false; 4];
                        if idx.iter().any(|&i| std::mem::replace(&mut used[i], true)) {
                            continue;
                        }
                        let flat: Vec<u16> = idx.iter().map(|&i| values[i]).collect();
                        let grid = Grid::from_rows(vec![
                            flat[..2].to_vec(),
                            flat[2..].to_vec(),
                        ])
                        .unwrap();
                        if crate::is_solvable(&grid) {
                            solvable += 1;
                            solve_and_replay(&grid);
                        }
                    }
                }
            }
        }
        assert_eq!(solvable, 12);
    }

    #[test]
    fn test_three_by_three_permutation_sweep() {
        // Every 4th permutation of the 9 cell values; roughly 45k solvable
        // boards, covering all row-tail and band cases many times over.
        let mut values: Vec<u16> = (0..9).collect();
        let mut count = 0usize;
        let mut index = 0usize;
        permute_grids(&mut values, 0, &mut |flat| {
            index += 1;
            if index % 4 != 0 {
                return;
            }
            let grid = Grid::from_rows(vec![
                flat[..3].to_vec(),
                flat[3..6].to_vec(),
                flat[6..].to_vec(),
            ])
            .unwrap();
            if crate::is_solvable(&grid) {
                count += 1;
                solve_and_replay(&grid);
            }
        });
        assert!(count > 40_000);
    }

    fn permute_grids(values: &mut Vec<u16>, at: usize, visit: &mut impl FnMut(&[u16])) {
        if at == values.len() {
            visit(values);
            return;
        }
        for i in at..values.len() {
            values.swap(at, i);
            permute_grids(values, at + 1, visit);
            values.swap(at, i);
        }
    }

    #[test]
    fn test_scrambles_up_to_ten() {
        for n in 3..=10 {
            for seed in 1..=3 {
                let grid = Scrambler::with_seed(seed).scramble(n, 30 * n * n);
                solve_and_replay(&grid);
            }
        }
    }

    #[test]
    fn test_determinism() {
        let grid = Scrambler::with_seed(99).scramble(5, 400);
        let first = Solver::new().solve(&grid).unwrap();
        let second = Solver::new().solve(&grid).unwrap();
        assert_eq!(first, second);
        match first {
            SolveOutcome::Solved(moves) => assert!(!moves.is_empty()),
            other => panic!("expected a solved outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_observer_sees_every_move() {
        let grid = Scrambler::with_seed(3).scramble(4, 120);
        let mut seen = 0usize;
        let outcome = Solver::new()
            .solve_observed(&grid, &mut |_, g| {
                seen += 1;
                assert_eq!(g.get(g.blank()), 0);
            })
            .unwrap();
        match outcome {
            SolveOutcome::Solved(moves) => assert_eq!(seen, moves.len()),
            other => panic!("expected a solved outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_serializes() {
        let grid = rows3([[1, 2, 3], [4, 5, 0], [7, 8, 6]]);
        let outcome = Solver::new().solve(&grid).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: SolveOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
