//! Blank routing: position the blank on a chosen side of a tile.
//!
//! Every primitive may relocate the tile it is aimed at (the blank can
//! sweep straight through it), so the possibly-updated position is
//! returned by value and must replace the caller's copy. All four
//! primitives require at least two fully unsolved rows below the row
//! currently being filled; the row engine only calls them under that
//! precondition.

use super::Reduction;
use crate::error::SolveError;
use crate::grid::{Move, Position};

impl Reduction<'_> {
    /// Move the blank directly below `tile`.
    ///
    /// If the blank is already in the tile's column above it, the descent
    /// sweeps through the tile, shifting it up one row.
    pub(crate) fn focus_bottom(&mut self, tile: Position) -> Result<Position, SolveError> {
        self.enter("focus_bottom");
        let mut tile = tile;
        let dest_row = if self.blank().col == tile.col && self.blank().row < tile.row {
            let dest = tile.row;
            tile.row -= 1;
            dest
        } else {
            tile.row + 1
        };
        while self.blank().row < dest_row {
            self.emit(Move::Down)?;
        }
        while self.blank().row > dest_row {
            self.emit(Move::Up)?;
        }
        while self.blank().col < tile.col {
            self.emit(Move::Right)?;
        }
        while self.blank().col > tile.col {
            self.emit(Move::Left)?;
        }
        Ok(tile)
    }

    /// Move the blank directly above `tile`.
    ///
    /// A tile in the last row is approached from above only; otherwise
    /// this goes below first and steps up through the tile, pushing it
    /// down one row.
    pub(crate) fn focus_top(&mut self, tile: Position) -> Result<Position, SolveError> {
        self.enter("focus_top");
        let mut tile = tile;
        if tile.row == self.size() - 1 {
            while self.blank().row < tile.row - 1 {
                self.emit(Move::Down)?;
            }
            while self.blank().row > tile.row - 1 {
                self.emit(Move::Up)?;
            }
            while self.blank().col < tile.col {
                self.emit(Move::Right)?;
            }
            while self.blank().col > tile.col {
                self.emit(Move::Left)?;
            }
        } else {
            tile = self.focus_bottom(tile)?;
            self.enter("focus_top");
            self.emit(Move::Up)?;
            tile.row += 1;
        }
        Ok(tile)
    }

    /// Move the blank directly right of `tile`.
    ///
    /// If the blank approaches through the tile's row from the left, the
    /// sweep shifts the tile one column left.
    pub(crate) fn focus_right(&mut self, tile: Position) -> Result<Position, SolveError> {
        self.enter("focus_right");
        let mut tile = tile;
        if self.blank().col == tile.col && self.blank().row + 1 == tile.row {
            // Directly above the tile: side-step before descending so the
            // tile stays put.
            if self.blank().col == self.size() - 1 {
                self.run_macro("ld")?;
            } else {
                self.run_macro("rd")?;
            }
        } else if self.blank().row < self.size() - 1 {
            // Leave the working row before moving sideways.
            self.emit(Move::Down)?;
        }
        let dest_col = if self.blank().row == tile.row && self.blank().col < tile.col {
            let dest = tile.col;
            tile.col -= 1;
            dest
        } else {
            tile.col + 1
        };
        while self.blank().col < dest_col {
            self.emit(Move::Right)?;
        }
        while self.blank().col > dest_col {
            self.emit(Move::Left)?;
        }
        while self.blank().row < tile.row {
            self.emit(Move::Down)?;
        }
        while self.blank().row > tile.row {
            self.emit(Move::Up)?;
        }
        Ok(tile)
    }

    /// Move the blank directly left of `tile`.
    ///
    /// A tile in the last column is approached from the left only;
    /// otherwise this goes right first and steps left through the tile,
    /// pushing it one column right.
    pub(crate) fn focus_left(&mut self, tile: Position) -> Result<Position, SolveError> {
        self.enter("focus_left");
        let mut tile = tile;
        if self.blank().col == tile.col && self.blank().row + 1 == tile.row {
            if self.blank().col == self.size() - 1 {
                self.run_macro("ld")?;
            } else {
                self.run_macro("rd")?;
            }
        } else if self.blank().row < self.size() - 1 {
            self.emit(Move::Down)?;
        }
        if tile.col == self.size() - 1 {
            while self.blank().col < tile.col - 1 {
                self.emit(Move::Right)?;
            }
            while self.blank().col > tile.col - 1 {
                self.emit(Move::Left)?;
            }
            while self.blank().row < tile.row {
                self.emit(Move::Down)?;
            }
            while self.blank().row > tile.row {
                self.emit(Move::Up)?;
            }
        } else {
            tile = self.focus_right(tile)?;
            self.enter("focus_left");
            self.emit(Move::Left)?;
            tile.col += 1;
        }
        Ok(tile)
    }
}
