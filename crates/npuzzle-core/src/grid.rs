//! The mutable puzzle grid: tiles, blank tracking, moves, parsing.

use crate::error::{MoveError, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate, row-major from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The direction the blank travels when a move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in a fixed order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_char(self) -> char {
        match self {
            Move::Up => 'u',
            Move::Down => 'd',
            Move::Left => 'l',
            Move::Right => 'r',
        }
    }

    pub fn from_char(ch: char) -> Option<Move> {
        match ch {
            'u' => Some(Move::Up),
            'd' => Some(Move::Down),
            'l' => Some(Move::Left),
            'r' => Some(Move::Right),
            _ => None,
        }
    }

    /// The move that undoes this one.
    pub fn inverse(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Row/column delta applied to the blank.
    fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An ordered, append-only move list; prints as a word over `udlr`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSequence(Vec<Move>);

impl MoveSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.0.iter().copied()
    }

    /// Parse a word over the alphabet `udlr`.
    pub fn parse(word: &str) -> Result<Self, ParseError> {
        word.trim()
            .chars()
            .map(|ch| Move::from_char(ch).ok_or(ParseError::UnknownMove(ch)))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in &self.0 {
            write!(f, "{}", mv.as_char())?;
        }
        Ok(())
    }
}

/// An N×N sliding-tile grid: values `1..N²` plus one `0` for the blank.
///
/// The blank position is tracked alongside the tile array and kept in sync
/// by every move application. The grid is never resized after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    tiles: Vec<u16>,
    blank: Position,
}

impl Grid {
    /// The canonical configuration of the given size.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero; parsed grids reject that earlier.
    pub fn solved(size: usize) -> Grid {
        assert!(size >= 1, "grid size must be at least 1");
        let cells = size * size;
        let mut tiles: Vec<u16> = (1..cells as u16).collect();
        tiles.push(0);
        Grid {
            size,
            tiles,
            blank: Position::new(size - 1, size - 1),
        }
    }

    /// Build and validate a grid from explicit rows.
    pub fn from_rows(rows: Vec<Vec<u16>>) -> Result<Grid, ParseError> {
        let size = rows.len();
        if size == 0 {
            return Err(ParseError::SizeZero);
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(ParseError::ColumnCount {
                    row,
                    expected: size,
                    found: cells.len(),
                });
            }
        }
        let tiles: Vec<u16> = rows.into_iter().flatten().collect();
        let cells = size * size;
        let mut seen = vec![false; cells];
        for &tile in &tiles {
            if let Some(slot) = seen.get_mut(tile as usize) {
                *slot = true;
            }
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(ParseError::MissingTile(missing as u16));
        }
        let blank_index = tiles
            .iter()
            .position(|&t| t == 0)
            .ok_or(ParseError::MissingTile(0))?;
        Ok(Grid {
            size,
            tiles,
            blank: Position::new(blank_index / size, blank_index % size),
        })
    }

    /// Parse a puzzle description.
    ///
    /// The first non-comment line is the size N; exactly N lines of N
    /// whitespace-separated integers follow. Everything after a `#` is a
    /// comment; blank lines are dropped.
    pub fn parse(input: &str) -> Result<Grid, ParseError> {
        let lines = content_lines(input);
        let (size_line, rows) = lines.split_first().ok_or(ParseError::Empty)?;
        let size: usize = size_line
            .parse()
            .map_err(|_| ParseError::SizeNotInteger(size_line.to_string()))?;
        if size == 0 {
            return Err(ParseError::SizeZero);
        }
        if rows.len() != size {
            return Err(ParseError::RowCount {
                expected: size,
                found: rows.len(),
            });
        }
        let mut parsed = Vec::with_capacity(size);
        for (row, line) in rows.iter().enumerate() {
            let cells = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<u16>()
                        .map_err(|_| ParseError::TileNotInteger(tok.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if cells.len() != size {
                return Err(ParseError::ColumnCount {
                    row,
                    expected: size,
                    found: cells.len(),
                });
            }
            parsed.push(cells);
        }
        Grid::from_rows(parsed)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn blank(&self) -> Position {
        self.blank
    }

    /// Tile value at `pos` (`0` for the blank).
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    pub fn get(&self, pos: Position) -> u16 {
        self.tiles[pos.row * self.size + pos.col]
    }

    /// The grid contents as rows of values.
    pub fn rows(&self) -> Vec<Vec<u16>> {
        self.tiles
            .chunks(self.size)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    /// The cell `tile` occupies in the canonical configuration.
    pub fn target_of(&self, tile: u16) -> Position {
        let index = if tile == 0 {
            self.size * self.size - 1
        } else {
            tile as usize - 1
        };
        Position::new(index / self.size, index % self.size)
    }

    /// Linear search for a tile.
    pub fn position_of(&self, tile: u16) -> Option<Position> {
        self.tiles
            .iter()
            .position(|&t| t == tile)
            .map(|index| Position::new(index / self.size, index % self.size))
    }

    pub fn is_solved(&self) -> bool {
        let cells = self.size * self.size;
        self.tiles[cells - 1] == 0
            && self.tiles[..cells - 1]
                .iter()
                .enumerate()
                .all(|(i, &t)| t as usize == i + 1)
    }

    /// Whether `mv` keeps the blank inside the grid.
    pub fn is_legal(&self, mv: Move) -> bool {
        let (dr, dc) = mv.offset();
        let row = self.blank.row as isize + dr;
        let col = self.blank.col as isize + dc;
        row >= 0 && col >= 0 && row < self.size as isize && col < self.size as isize
    }

    /// Swap the blank with its neighbor in the direction of `mv`.
    ///
    /// A move whose target lies outside the grid is an invariant
    /// violation and is reported, never clamped.
    pub fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        if !self.is_legal(mv) {
            return Err(MoveError {
                mv,
                blank: self.blank,
            });
        }
        let (dr, dc) = mv.offset();
        let dest = Position::new(
            (self.blank.row as isize + dr) as usize,
            (self.blank.col as isize + dc) as usize,
        );
        let from = self.blank.row * self.size + self.blank.col;
        let to = dest.row * self.size + dest.col;
        self.tiles.swap(from, to);
        self.blank = dest;
        debug_assert_eq!(self.tiles[to], 0);
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.size * self.size - 1).to_string().len();
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", self.tiles[row * self.size + col])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Lines of `input` with `#` comments stripped and blanks dropped.
pub(crate) fn content_lines(input: &str) -> Vec<&str> {
    input
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid3() -> Grid {
        Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 0], vec![7, 8, 6]]).unwrap()
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "\
# a scrambled board
3          # size
1 2 3
4 5 0      # blank mid-row

7 8 6
";
        let grid = Grid::parse(input).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.blank(), Position::new(1, 2));
        assert_eq!(grid, grid3());
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(Grid::parse("  \n# only comments\n"), Err(ParseError::Empty));
        assert_eq!(
            Grid::parse("three\n1 2\n3 0\n"),
            Err(ParseError::SizeNotInteger("three".into()))
        );
        assert_eq!(Grid::parse("0\n"), Err(ParseError::SizeZero));
        assert_eq!(
            Grid::parse("2\n1 2\n"),
            Err(ParseError::RowCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Grid::parse("2\n1 2\n3 x\n"),
            Err(ParseError::TileNotInteger("x".into()))
        );
        assert_eq!(
            Grid::parse("2\n1 2 3\n3 0 1\n"),
            Err(ParseError::ColumnCount {
                row: 0,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            Grid::parse("2\n1 1\n3 0\n"),
            Err(ParseError::MissingTile(2))
        );
        assert_eq!(
            Grid::parse("2\n1 2\n3 4\n"),
            Err(ParseError::MissingTile(0))
        );
    }

    #[test]
    fn test_parse_error_codes_are_stable() {
        assert_eq!(ParseError::Empty.code(), 1);
        assert_eq!(ParseError::SizeNotInteger(String::new()).code(), 2);
        assert_eq!(ParseError::SizeZero.code(), 3);
        assert_eq!(
            ParseError::RowCount {
                expected: 0,
                found: 0
            }
            .code(),
            4
        );
        assert_eq!(ParseError::TileNotInteger(String::new()).code(), 5);
        assert_eq!(
            ParseError::ColumnCount {
                row: 0,
                expected: 0,
                found: 0
            }
            .code(),
            6
        );
        assert_eq!(ParseError::MissingTile(0).code(), 7);
        assert_eq!(ParseError::UnknownMove('x').code(), 8);
    }

    #[test]
    fn test_solved_and_targets() {
        let grid = Grid::solved(3);
        assert!(grid.is_solved());
        assert_eq!(grid.blank(), Position::new(2, 2));
        assert_eq!(grid.target_of(1), Position::new(0, 0));
        assert_eq!(grid.target_of(5), Position::new(1, 1));
        assert_eq!(grid.target_of(0), Position::new(2, 2));
        assert!(Grid::solved(1).is_solved());
    }

    #[test]
    fn test_apply_updates_blank_and_tiles() {
        let mut grid = grid3();
        grid.apply(Move::Down).unwrap();
        assert_eq!(grid.blank(), Position::new(2, 2));
        assert!(grid.is_solved());
    }

    #[test]
    fn test_apply_rejects_offgrid_moves() {
        let mut grid = Grid::solved(2);
        // Blank bottom-right: down and right leave the grid.
        let err = grid.apply(Move::Down).unwrap_err();
        assert_eq!(err.mv, Move::Down);
        assert_eq!(err.blank, Position::new(1, 1));
        assert!(grid.apply(Move::Right).is_err());
        // The failed attempts must not have changed anything.
        assert!(grid.is_solved());
        grid.apply(Move::Up).unwrap();
        grid.apply(Move::Left).unwrap();
        assert_eq!(grid.blank(), Position::new(0, 0));
        assert!(grid.apply(Move::Up).is_err());
        assert!(grid.apply(Move::Left).is_err());
    }

    #[test]
    fn test_position_of() {
        let grid = grid3();
        assert_eq!(grid.position_of(6), Some(Position::new(2, 2)));
        assert_eq!(grid.position_of(0), Some(Position::new(1, 2)));
        assert_eq!(grid.position_of(9), None);
    }

    #[test]
    fn test_display_reparses() {
        let grid = grid3();
        let text = format!("{}\n{}", grid.size(), grid);
        assert_eq!(Grid::parse(&text).unwrap(), grid);
    }

    #[test]
    fn test_move_sequence_round_trip() {
        let seq = MoveSequence::parse("uldr").unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.to_string(), "uldr");
        assert_eq!(
            MoveSequence::parse("ud x"),
            Err(ParseError::UnknownMove(' '))
        );
        assert_eq!(MoveSequence::parse("q"), Err(ParseError::UnknownMove('q')));
        assert!(MoveSequence::parse("  \n").unwrap().is_empty());
    }
}
