use crate::*;

/// Whether `grid` matches the solved arrangement of its size.
pub fn is_solved(grid: &Grid) -> bool {
    Grid::solved(grid.size()).is_ok_and(|solved| solved == *grid)
}
