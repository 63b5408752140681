use crate::grid::{Move, Position};
use thiserror::Error;

/// A malformed puzzle description.
///
/// Each cause carries a stable numeric code, used by frontends as the
/// process exit status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no input found")]
    Empty,
    #[error("cannot parse size {0:?} as an integer")]
    SizeNotInteger(String),
    #[error("size cannot be zero")]
    SizeZero,
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("cannot parse tile {0:?} as an integer")]
    TileNotInteger(String),
    #[error("row {row}: expected {expected} tiles, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("tile {0} is missing from the grid")]
    MissingTile(u16),
    #[error("unknown move character {0:?}")]
    UnknownMove(char),
}

impl ParseError {
    /// Stable per-cause code.
    pub fn code(&self) -> i32 {
        match self {
            ParseError::Empty => 1,
            ParseError::SizeNotInteger(_) => 2,
            ParseError::SizeZero => 3,
            ParseError::RowCount { .. } => 4,
            ParseError::TileNotInteger(_) => 5,
            ParseError::ColumnCount { .. } => 6,
            ParseError::MissingTile(_) => 7,
            ParseError::UnknownMove(_) => 8,
        }
    }
}

/// A move that would take the blank outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("move {mv} is illegal with the blank at {blank}")]
pub struct MoveError {
    pub mv: Move,
    pub blank: Position,
}

/// A defect in the reduction logic.
///
/// These are never caused by input (bad input fails at parse time, an
/// unsolvable grid is an expected outcome) and never worth retrying: the
/// algorithm is deterministic, so a retry reproduces the violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("{stage}: {source}")]
    IllegalMove {
        stage: &'static str,
        #[source]
        source: MoveError,
    },
    #[error("{stage}: tile {tile} is not on the grid")]
    TileNotFound { stage: &'static str, tile: u16 },
    #[error("{stage}: move macro contains {ch:?}")]
    MacroCharacter { stage: &'static str, ch: char },
    #[error("{stage}: postcondition failed with the blank at {blank}")]
    Postcondition {
        stage: &'static str,
        blank: Position,
    },
}
