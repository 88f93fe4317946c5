use alloc::vec::Vec;

use crate::*;

/// Whether `grid` can be brought back to the solved arrangement with legal moves.
///
/// Every move is a single transposition that also shifts the blank by one cell, so the parity of the permutation
/// plus the blank's taxicab distance from the bottom-right corner never changes. The solved grid has both at zero,
/// and every arrangement where that sum is even is reachable.
pub fn is_solvable(grid: &Grid) -> bool {
    let last = grid.size() - 1;
    let (row, col) = grid.blank_position();
    let distance = usize::from(last - row) + usize::from(last - col);

    (permutation_parity(grid) + distance) % 2 == 0
}

/// Swaps the first two non-blank tiles if `grid` is unsolvable, returning whether it did.
pub fn make_solvable(grid: &mut Grid) -> Result<bool> {
    if is_solvable(grid) {
        return Ok(false);
    }

    let size = grid.size();
    let picked = {
        let mut tiles = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .filter(|&coords| !grid.is_blank(coords));
        (tiles.next(), tiles.next())
    };
    let (Some(first), Some(second)) = picked else {
        return Err(GameError::InvalidSize(size));
    };

    grid.swap(first, second)?;
    Ok(true)
}

/// `0` for an even permutation, `1` for an odd one, counted through its cycle decomposition.
fn permutation_parity(grid: &Grid) -> usize {
    let values: Vec<Tile> = grid.values().collect();
    let mut visited = alloc::vec![false; values.len()];
    let mut transpositions = 0;

    for start in 0..values.len() {
        if visited[start] {
            continue;
        }
        let mut index = start;
        let mut cycle_len = 0;
        while !visited[index] {
            visited[index] = true;
            index = usize::from(values[index] - 1);
            cycle_len += 1;
        }
        transpositions += cycle_len - 1;
    }

    transpositions % 2
}
