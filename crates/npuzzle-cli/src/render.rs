//! Styled grid printing: the blank cell red, tiles already on their
//! canonical cell green, and the tile that just moved yellow.

use crossterm::style::Stylize;
use npuzzle_core::{Grid, Position};

pub fn print_grid(grid: &Grid, active: Option<u16>) {
    let n = grid.size();
    let width = (n * n - 1).to_string().len();
    for row in 0..n {
        for col in 0..n {
            let pos = Position::new(row, col);
            let value = grid.get(pos);
            let cell = format!("{value:>width$}");
            if value != 0 && active == Some(value) {
                print!("{} ", cell.black().on_yellow());
            } else if value == 0 {
                print!("{} ", cell.black().on_red());
            } else if grid.target_of(value) == pos {
                print!("{} ", cell.black().on_green());
            } else {
                print!("{cell} ");
            }
        }
        println!();
    }
    println!();
}
