//! Row reduction: every row above the bottom two.
//!
//! The first N-2 tiles of a row are plain alignment work. The final two
//! interlock: placing either one naively blocks the other, so their
//! placement is an explicit case machine over the relative configuration
//! of the two tiles and the blank. Each handler is a contract: from
//! exactly its configuration, its literal move macro ends with both tiles
//! home and nothing above the working row disturbed.

use super::Reduction;
use crate::error::SolveError;
use crate::grid::{Move, Position};

/// Relative configuration of a row's last two tiles (`first` is the
/// penultimate tile, `last` the final one) and the blank, against their
/// target cells. Classification order is load-bearing and fixed in
/// [`classify_tail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TailCase {
    /// Each tile sits in the other's target cell.
    Swapped,
    /// The blank holds the first tile's target while the first tile
    /// holds the last tile's target.
    BlankAtFirstTarget,
    /// Both tiles already home.
    BothPlaced,
    /// First tile home; last tile directly below its target.
    LastBelowTarget,
    /// First tile home; last tile diagonally below-left of its target.
    LastDiagonal,
    /// First tile home; last tile anywhere else.
    LastElsewhere,
    /// First tile parked in the last tile's target cell.
    FirstAtLastTarget,
    /// Last tile home; first tile somewhere in the end column.
    LastPlacedFirstInEndColumn,
    /// Anything else.
    Unplaced,
}

/// Pure classifier for the row-tail case machine.
pub(crate) fn classify_tail(
    first: Position,
    last: Position,
    blank: Position,
    first_target: Position,
    last_target: Position,
    end_col: usize,
) -> TailCase {
    if first == last_target && last == first_target {
        TailCase::Swapped
    } else if blank == first_target && first == last_target {
        TailCase::BlankAtFirstTarget
    } else if first == first_target {
        if last == last_target {
            TailCase::BothPlaced
        } else if last.row == last_target.row + 1 && last.col == last_target.col {
            TailCase::LastBelowTarget
        } else if last.row == last_target.row + 1 && last.col + 1 == last_target.col {
            TailCase::LastDiagonal
        } else {
            TailCase::LastElsewhere
        }
    } else if first == last_target {
        TailCase::FirstAtLastTarget
    } else if first.col == end_col && last == last_target {
        TailCase::LastPlacedFirstInEndColumn
    } else {
        TailCase::Unplaced
    }
}

impl Reduction<'_> {
    pub(crate) fn solve_row(&mut self, row: usize) -> Result<(), SolveError> {
        self.solve_row_bulk(row)?;
        self.solve_row_tail(row)
    }

    /// Place the first N-2 tiles of `row`, in increasing order, so each
    /// alignment can treat lower-numbered tiles in the row as frozen.
    fn solve_row_bulk(&mut self, row: usize) -> Result<(), SolveError> {
        self.enter("solve_row_bulk");
        let n = self.size();
        let first_value = (row * n + 1) as u16;
        for value in first_value..first_value + (n as u16 - 2) {
            let target = self.grid.target_of(value);
            let tile = self.locate(value)?;
            let tile = self.align_horizontal(tile, target)?;
            let repos = self.vertical_repositioning(tile, target);
            self.align_vertical(tile, target, repos)?;
        }
        Ok(())
    }

    /// Place the final two tiles of `row` by case analysis, re-locating
    /// both tiles at every dispatch rather than trusting possibly-stale
    /// coordinates.
    fn solve_row_tail(&mut self, row: usize) -> Result<(), SolveError> {
        let n = self.size();
        let first_value = ((row + 1) * n - 1) as u16;
        let last_value = ((row + 1) * n) as u16;
        let first_target = self.grid.target_of(first_value);
        let last_target = self.grid.target_of(last_value);

        // Every transforming case reaches a terminal one within a couple
        // of re-dispatches; the bound only exists to fail fast on a
        // handler defect instead of spinning.
        for _ in 0..8 {
            self.enter("solve_row_tail");
            let first = self.locate(first_value)?;
            let last = self.locate(last_value)?;
            let case = classify_tail(first, last, self.blank(), first_target, last_target, n - 1);
            match case {
                TailCase::BothPlaced => break,
                TailCase::Swapped => self.tail_swapped(last)?,
                TailCase::BlankAtFirstTarget => {
                    self.enter("tail_blank_at_first_target");
                    self.emit(Move::Right)?;
                }
                TailCase::LastBelowTarget => {
                    self.tail_last_below(last, last_target)?;
                    break;
                }
                TailCase::LastDiagonal => {
                    self.tail_last_diagonal(last, last_target)?;
                    break;
                }
                TailCase::LastElsewhere => {
                    self.tail_last_elsewhere(first, last_value, last_target)?;
                    break;
                }
                TailCase::FirstAtLastTarget => {
                    self.tail_first_at_last_target(last, last_target)?;
                    break;
                }
                TailCase::LastPlacedFirstInEndColumn => {
                    self.tail_first_in_end_column(first, last_value, first_target)?;
                    break;
                }
                TailCase::Unplaced => self.tail_unplaced(first, last_value, last_target)?,
            }
        }

        self.enter("solve_row_tail");
        if self.locate(first_value)? != first_target || self.locate(last_value)? != last_target {
            return Err(self.postcondition());
        }
        Ok(())
    }

    /// Both tiles in each other's target: park the blank under the last
    /// tile and rotate once, which lands in the diagonal case.
    fn tail_swapped(&mut self, last: Position) -> Result<(), SolveError> {
        self.focus_bottom(last)?;
        self.enter("tail_swapped");
        self.run_macro("ur")
    }

    /// First tile home, last tile directly below its target.
    fn tail_last_below(&mut self, last: Position, last_target: Position) -> Result<(), SolveError> {
        let last = self.focus_bottom(last)?;
        self.enter("tail_last_below");
        if last == last_target {
            // The descent swept it home.
            return Ok(());
        }
        self.run_macro("uuldrdluurd")
    }

    /// First tile home, last tile diagonally below-left of its target.
    fn tail_last_diagonal(
        &mut self,
        last: Position,
        last_target: Position,
    ) -> Result<(), SolveError> {
        self.enter("tail_last_diagonal");
        if self.blank().row == last_target.row + 1 && self.blank().col < last.col {
            // Blank shares the tile's row to its left: sweep right through
            // it, then untangle from the far side.
            let steps = 1 + last.col - self.blank().col;
            for _ in 0..steps {
                self.emit(Move::Right)?;
            }
            self.run_macro("uldldrrulurd")
        } else {
            if self.blank().row <= last_target.row + 1 && self.blank().col > last.col {
                while self.blank().row < last_target.row + 2 {
                    self.emit(Move::Down)?;
                }
            }
            while self.blank().row > last_target.row + 2 {
                self.emit(Move::Up)?;
            }
            while self.blank().col > last.col {
                self.emit(Move::Left)?;
            }
            while self.blank().col < last.col {
                self.emit(Move::Right)?;
            }
            self.run_macro("urulddrulurd")
        }
    }

    /// First tile home, last tile anywhere else: pull the first tile one
    /// step right (which may displace the last tile), bring the last tile
    /// under the first's new cell, then drop both home.
    fn tail_last_elsewhere(
        &mut self,
        first: Position,
        last_value: u16,
        last_target: Position,
    ) -> Result<(), SolveError> {
        let first = self.focus_right(first)?;
        self.enter("tail_last_elsewhere");
        self.emit(Move::Left)?;
        let first = Position::new(first.row, first.col + 1);
        let last = self.locate(last_value)?;
        let last = self.align_horizontal(last, last_target)?;
        let below = Position::new(last_target.row + 1, last_target.col);
        self.align_vertical(last, below, "luur")?;
        self.focus_left(first)?;
        self.enter("tail_last_elsewhere");
        self.run_macro("rd")
    }

    /// First tile parked in the last tile's target: bring the last tile
    /// directly below it, then rotate both home.
    fn tail_first_at_last_target(
        &mut self,
        last: Position,
        last_target: Position,
    ) -> Result<(), SolveError> {
        self.enter("tail_first_at_last_target");
        let last = self.align_horizontal(last, last_target)?;
        let below = Position::new(last_target.row + 1, last_target.col);
        let last = self.align_vertical(last, below, "luur")?;
        // The vertical walk may not have run at all; make sure the blank
        // really is below the last tile before committing.
        self.focus_bottom(last)?;
        self.enter("tail_first_at_last_target");
        self.run_macro("luurd")
    }

    /// Last tile home, first tile somewhere in the end column: thread the
    /// first tile out of the boundary column without disturbing the last
    /// tile.
    fn tail_first_in_end_column(
        &mut self,
        first: Position,
        last_value: u16,
        first_target: Position,
    ) -> Result<(), SolveError> {
        let n = self.size();
        let mut first = first;
        if first.row < n - 1 {
            first = self.focus_bottom(first)?;
            // The next focus walks the blank up the end column past the
            // first tile, pushing it down one row.
            first.row += 1;
        }
        let last = self.locate(last_value)?;
        self.focus_bottom(last)?;
        self.enter("tail_first_in_end_column");
        self.run_macro("uldr")?;
        self.align_vertical(first, first_target, "luur")?;
        self.enter("tail_first_in_end_column");
        self.emit(Move::Down)?;
        // The displaced last tile landed in one of two cells; resync if it
        // took the left one.
        let peek = Position::new(first_target.row + 2, first_target.col);
        if self.grid.get(peek) == last_value {
            self.run_macro("lurd")?;
        }
        self.run_macro("luurd")
    }

    /// Default: aim the first tile one column right of its own target
    /// (the last tile's column) and re-dispatch from whatever
    /// configuration that produces.
    fn tail_unplaced(
        &mut self,
        first: Position,
        last_value: u16,
        last_target: Position,
    ) -> Result<(), SolveError> {
        self.enter("tail_unplaced");
        let first = self.align_horizontal(first, last_target)?;
        if self.locate(last_value)? != last_target {
            self.align_vertical(first, last_target, "luur")?;
        }
        Ok(())
    }
}
