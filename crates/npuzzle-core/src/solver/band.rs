//! Bottom band: the last two rows, solved column-by-column, then the
//! final 2x2 block.
//!
//! With only two rows left the alignment machinery's room-below
//! precondition is gone, so each column pair is staged explicitly: the
//! top tile parks in the bottom tile's home, the bottom tile parks one
//! cell right of it, and `ulldr` rotates both into place. Committing
//! either tile home before the other was staged would seal the blank out
//! of the remaining target cell.

use super::Reduction;
use crate::error::SolveError;
use crate::grid::{Move, Position};

impl Reduction<'_> {
    pub(crate) fn solve_band(&mut self) -> Result<(), SolveError> {
        let n = self.size();
        if n < 2 {
            return Ok(());
        }
        for col in 0..n - 2 {
            self.solve_band_column(col)?;
        }
        self.solve_corner_block()
    }

    /// Solve one column of the band: stage the pair, then rotate it home.
    fn solve_band_column(&mut self, col: usize) -> Result<(), SolveError> {
        self.enter("solve_band_column");
        let n = self.size();
        let top_value = ((n - 2) * n + col + 1) as u16;
        let bottom_value = ((n - 1) * n + col + 1) as u16;
        let top_home = Position::new(n - 2, col);
        let bottom_home = Position::new(n - 1, col);
        if self.locate(top_value)? == top_home && self.locate(bottom_value)? == bottom_home {
            return Ok(());
        }
        self.stage_top_tile(top_value, col)?;
        self.stage_bottom_tile(bottom_value, col)?;
        self.enter("solve_band_column");
        self.run_macro("ulldr")?;
        if self.locate(top_value)? != top_home || self.locate(bottom_value)? != bottom_home {
            return Err(self.postcondition());
        }
        Ok(())
    }

    /// Bring the column's top tile to the bottom tile's home `(N-1, col)`.
    fn stage_top_tile(&mut self, value: u16, col: usize) -> Result<(), SolveError> {
        self.enter("stage_top_tile");
        let n = self.size();
        let top_row = n - 2;
        let bottom_row = n - 1;
        let staged = Position::new(bottom_row, col);
        let mut tile = self.locate(value)?;
        if tile == staged {
            return Ok(());
        }
        if tile.row == top_row {
            // Drop it into the bottom row first.
            if self.blank().row == top_row {
                self.emit(Move::Down)?;
            }
            while self.blank().col < tile.col {
                self.emit(Move::Right)?;
            }
            while self.blank().col > tile.col {
                self.emit(Move::Left)?;
            }
            self.emit(Move::Up)?;
            tile = Position::new(bottom_row, tile.col);
        }
        // Walk it left along the bottom row, routing the blank around
        // through the top row whenever it sits on the wrong side.
        while tile.col > col {
            if self.blank().row == bottom_row && self.blank().col > tile.col {
                self.emit(Move::Up)?;
            }
            if self.blank().row == top_row {
                while self.blank().col + 1 < tile.col {
                    self.emit(Move::Right)?;
                }
                while self.blank().col + 1 > tile.col {
                    self.emit(Move::Left)?;
                }
                self.emit(Move::Down)?;
            } else {
                while self.blank().col + 1 < tile.col {
                    self.emit(Move::Right)?;
                }
            }
            self.emit(Move::Right)?;
            tile = Position::new(bottom_row, tile.col - 1);
        }
        Ok(())
    }

    /// Bring the column's bottom tile to `(N-1, col+1)` and the blank to
    /// `(N-1, col+2)`, with the top tile already staged at `(N-1, col)`.
    fn stage_bottom_tile(&mut self, value: u16, col: usize) -> Result<(), SolveError> {
        self.enter("stage_bottom_tile");
        let n = self.size();
        let top_row = n - 2;
        let bottom_row = n - 1;
        let staged = Position::new(bottom_row, col + 1);
        let mut budget = 4 * n + 8;
        loop {
            if budget == 0 {
                return Err(self.postcondition());
            }
            budget -= 1;
            let tile = self.locate(value)?;
            if tile == staged {
                break;
            }
            if tile == Position::new(top_row, col) {
                // Trapped directly above the staged top tile: no blank
                // route into that pocket exists without moving the staged
                // tile, so a fixed maneuver lifts it out and back while
                // the bottom tile comes around to its staging cell.
                while self.blank().row == top_row && self.blank().col > col + 1 {
                    self.emit(Move::Left)?;
                }
                if self.blank().row == top_row {
                    self.emit(Move::Down)?;
                }
                while self.blank().col > col + 1 {
                    self.emit(Move::Left)?;
                }
                self.run_macro("uldrruldlurrdlu")?;
                break;
            }
            if tile.row == top_row {
                if self.blank().row == top_row {
                    if self.blank().col == col {
                        // Pocketed left of the tile; push through it and
                        // resolve as the trapped case next round.
                        self.emit(Move::Right)?;
                    } else {
                        self.emit(Move::Down)?;
                    }
                    continue;
                }
                // Pull it down into the bottom row.
                while self.blank().col < tile.col {
                    self.emit(Move::Right)?;
                }
                while self.blank().col > tile.col {
                    self.emit(Move::Left)?;
                }
                self.emit(Move::Up)?;
                continue;
            }
            // Bottom row, at least two columns right of the staging cell:
            // one step left, blank routed around through the top row.
            if self.blank().row == bottom_row && self.blank().col > tile.col {
                self.emit(Move::Up)?;
            }
            if self.blank().row == top_row {
                while self.blank().col + 1 < tile.col {
                    self.emit(Move::Right)?;
                }
                while self.blank().col + 1 > tile.col {
                    self.emit(Move::Left)?;
                }
                self.emit(Move::Down)?;
            } else {
                while self.blank().col + 1 < tile.col {
                    self.emit(Move::Right)?;
                }
            }
            self.emit(Move::Right)?;
        }
        // Seat the blank right of the staged pair.
        if self.blank().row == top_row {
            while self.blank().col < col + 2 {
                self.emit(Move::Right)?;
            }
            while self.blank().col > col + 2 {
                self.emit(Move::Left)?;
            }
            self.emit(Move::Down)?;
        } else {
            while self.blank().col > col + 2 {
                self.emit(Move::Left)?;
            }
        }
        Ok(())
    }

    /// Resolve the final 2x2 block: park the blank bottom-left, then the
    /// cell holding the block's bottom-left tile picks one of three fixed
    /// rotations. The fourth configuration is already solved.
    fn solve_corner_block(&mut self) -> Result<(), SolveError> {
        self.enter("solve_corner_block");
        if self.grid.is_solved() {
            return Ok(());
        }
        let n = self.size();
        let top_row = n - 2;
        let left_col = n - 2;
        if self.blank().row == top_row {
            self.emit(Move::Down)?;
        }
        if self.blank().col == n - 1 {
            self.emit(Move::Left)?;
        }
        let value = ((n - 1) * n + left_col + 1) as u16;
        let tile = self.locate(value)?;
        if tile == Position::new(n - 1, n - 1) {
            self.emit(Move::Right)
        } else if tile == Position::new(top_row, left_col) {
            self.run_macro("urd")
        } else if tile == Position::new(top_row, n - 1) {
            self.run_macro("ruldr")
        } else {
            // Only reachable if the parity gate was wrong or an earlier
            // stage corrupted the board.
            Err(self.postcondition())
        }
    }
}
