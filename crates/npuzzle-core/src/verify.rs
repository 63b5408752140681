//! Move-sequence replay and verification.
//!
//! A pure, unconditional replay: no access to solver internals. The
//! combined input format (puzzle description followed by one move-word
//! line) matches what the solver frontend emits.

use crate::error::{MoveError, ParseError};
use crate::grid::{content_lines, Grid, MoveSequence};

/// Apply `moves` to a copy of `start`, returning the resulting grid.
pub fn replay(start: &Grid, moves: &MoveSequence) -> Result<Grid, MoveError> {
    let mut grid = start.clone();
    for mv in moves.iter() {
        grid.apply(mv)?;
    }
    Ok(grid)
}

/// Replay `moves` against `start` and check the result is canonical.
pub fn check(start: &Grid, moves: &MoveSequence) -> Result<bool, MoveError> {
    Ok(replay(start, moves)?.is_solved())
}

/// Parse a puzzle description followed by one final non-comment line
/// holding the move word.
pub fn parse_puzzle_and_moves(input: &str) -> Result<(Grid, MoveSequence), ParseError> {
    let lines = content_lines(input);
    let (word, rest) = lines.split_last().ok_or(ParseError::Empty)?;
    let grid = Grid::parse(&rest.join("\n"))?;
    let moves = MoveSequence::parse(word)?;
    Ok((grid, moves))
}
