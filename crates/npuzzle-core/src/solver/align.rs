//! Single-tile walking: advance a tile one cell at a time toward a
//! target coordinate, re-seating the blank between advances with a fixed
//! four-move repositioning macro.

use super::Reduction;
use crate::error::SolveError;
use crate::grid::{Move, Position};

impl Reduction<'_> {
    /// Whether horizontal repositioning should route through the row
    /// below the tile. A tile in the last row has no row below; near the
    /// target row the choice also depends on where the blank is.
    fn reposition_below(&self, tile: Position, target: Position) -> bool {
        if tile.row == self.size() - 1 {
            false
        } else if tile.row == target.row {
            true
        } else if tile.row == target.row + 1 {
            if tile.col < target.col {
                true
            } else {
                self.blank().row >= tile.row
            }
        } else {
            self.blank().row >= tile.row
        }
    }

    /// Whether vertical repositioning should route through the column
    /// right of the tile. A tile in the last column has no column there.
    fn reposition_right(&self, tile: Position) -> bool {
        tile.col != self.size() - 1
    }

    fn horizontal_repositioning(&self, tile: Position, target: Position) -> &'static str {
        if self.reposition_below(tile, target) {
            if tile.col < target.col {
                "drru"
            } else {
                "dllu"
            }
        } else if tile.col < target.col {
            "urrd"
        } else {
            "ulld"
        }
    }

    pub(crate) fn vertical_repositioning(&self, tile: Position, target: Position) -> &'static str {
        if self.reposition_right(tile) {
            if tile.row < target.row {
                "rddl"
            } else {
                "ruul"
            }
        } else if tile.row < target.row {
            "lddr"
        } else {
            "luur"
        }
    }

    /// Walk `tile` left or right until it reaches `target.col`.
    pub(crate) fn align_horizontal(
        &mut self,
        tile: Position,
        target: Position,
    ) -> Result<Position, SolveError> {
        let repos = self.horizontal_repositioning(tile, target);
        self.enter("align_horizontal");
        let mut tile = tile;
        let mut first = true;
        while tile.col < target.col {
            if first {
                tile = self.focus_right(tile)?;
                self.enter("align_horizontal");
                first = false;
            } else {
                self.run_macro(repos)?;
            }
            self.emit(Move::Left)?;
            tile.col += 1;
        }
        while tile.col > target.col {
            if first {
                tile = self.focus_left(tile)?;
                self.enter("align_horizontal");
                first = false;
            } else {
                self.run_macro(repos)?;
            }
            self.emit(Move::Right)?;
            tile.col -= 1;
        }
        Ok(tile)
    }

    /// Walk `tile` up or down until it reaches `target.row`, re-seating
    /// the blank with `repos` between advances.
    pub(crate) fn align_vertical(
        &mut self,
        tile: Position,
        target: Position,
        repos: &'static str,
    ) -> Result<Position, SolveError> {
        self.enter("align_vertical");
        let mut tile = tile;
        let mut first = true;
        while tile.row < target.row {
            if first {
                tile = self.focus_bottom(tile)?;
                self.enter("align_vertical");
                first = false;
            } else {
                self.run_macro(repos)?;
            }
            self.emit(Move::Up)?;
            tile.row += 1;
        }
        while tile.row > target.row {
            if first {
                tile = self.focus_top(tile)?;
                self.enter("align_vertical");
                first = false;
            } else {
                self.run_macro(repos)?;
            }
            self.emit(Move::Down)?;
            tile.row -= 1;
        }
        Ok(tile)
    }
}
