//! Solvability oracle.
//!
//! A configuration can reach the canonical ordering by blank swaps iff the
//! permutation parity matches the blank's distance parity. This is the
//! classic 15-puzzle group invariant and is exact for every size.

use crate::grid::{Grid, Position};

/// Whether `grid` is reachable from the canonical configuration.
///
/// Flattens the grid row-major with the blank counted as the maximum
/// value, counts inversions, and adds the blank's Manhattan distance to
/// the bottom-right cell; solvable iff the sum is even.
pub fn is_solvable(grid: &Grid) -> bool {
    let n = grid.size();
    let max = (n * n) as u32;
    let mut flat = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            let tile = grid.get(Position::new(row, col));
            flat.push(if tile == 0 { max } else { tile as u32 });
        }
    }
    let mut inversions = 0usize;
    for i in 0..flat.len() {
        for j in i + 1..flat.len() {
            if flat[i] > flat[j] {
                inversions += 1;
            }
        }
    }
    let blank = grid.blank();
    let distance = (n - 1 - blank.row) + (n - 1 - blank.col);
    (distance + inversions) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Move;
    use crate::scramble::Scrambler;
    use std::collections::HashSet;

    /// All grids of the given size, as raw tile vectors.
    fn permutations(n: usize) -> Vec<Vec<u16>> {
        let mut out = Vec::new();
        let mut values: Vec<u16> = (0..(n * n) as u16).collect();
        permute(&mut values, 0, &mut out);
        out
    }

    fn permute(values: &mut Vec<u16>, at: usize, out: &mut Vec<Vec<u16>>) {
        if at == values.len() {
            out.push(values.clone());
            return;
        }
        for i in at..values.len() {
            values.swap(at, i);
            permute(values, at + 1, out);
            values.swap(at, i);
        }
    }

    fn grid_from_flat(n: usize, flat: &[u16]) -> Grid {
        let rows = flat.chunks(n).map(|c| c.to_vec()).collect();
        Grid::from_rows(rows).unwrap()
    }

    /// Every configuration reachable from the canonical grid by legal moves.
    fn reachable(n: usize) -> HashSet<Vec<u16>> {
        let mut seen = HashSet::new();
        let mut frontier = vec![Grid::solved(n)];
        seen.insert(flatten(&frontier[0]));
        while let Some(grid) = frontier.pop() {
            for mv in Move::ALL {
                if !grid.is_legal(mv) {
                    continue;
                }
                let mut next = grid.clone();
                next.apply(mv).unwrap();
                if seen.insert(flatten(&next)) {
                    frontier.push(next);
                }
            }
        }
        seen
    }

    fn flatten(grid: &Grid) -> Vec<u16> {
        grid.rows().into_iter().flatten().collect()
    }

    #[test]
    fn test_canonical_is_solvable() {
        for n in 1..=5 {
            assert!(is_solvable(&Grid::solved(n)), "size {}", n);
        }
    }

    #[test]
    fn test_known_verdicts() {
        let solvable =
            Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 0], vec![7, 8, 6]]).unwrap();
        assert!(is_solvable(&solvable));
        let unsolvable =
            Grid::from_rows(vec![vec![2, 1, 3], vec![4, 5, 6], vec![7, 8, 0]]).unwrap();
        assert!(!is_solvable(&unsolvable));
    }

    #[test]
    fn test_oracle_matches_reachability_exhaustively() {
        for n in 2..=3 {
            let reachable = reachable(n);
            let all = permutations(n);
            assert_eq!(reachable.len() * 2, all.len());
            for flat in all {
                let grid = grid_from_flat(n, &flat);
                assert_eq!(
                    is_solvable(&grid),
                    reachable.contains(&flat),
                    "oracle disagrees with reachability on {:?}",
                    flat
                );
            }
        }
    }

    #[test]
    fn test_scrambles_are_solvable_and_transpositions_are_not() {
        for n in 4..=8 {
            let grid = Scrambler::with_seed(n as u64).scramble(n, 25 * n * n);
            assert!(is_solvable(&grid), "size {}", n);

            // Swapping two adjacent non-blank tiles flips the permutation
            // parity while leaving the blank alone.
            let mut rows = grid.rows();
            let mut swapped = false;
            'rows: for row in rows.iter_mut() {
                for col in 0..row.len() - 1 {
                    if row[col] != 0 && row[col + 1] != 0 {
                        row.swap(col, col + 1);
                        swapped = true;
                        break 'rows;
                    }
                }
            }
            assert!(swapped);
            let twisted = Grid::from_rows(rows).unwrap();
            assert!(!is_solvable(&twisted), "size {}", n);
        }
    }
}
