use serde::{Deserialize, Serialize};

use crate::*;
pub use parity::*;
pub use random::*;
pub use walk::*;

mod parity;
mod random;
mod walk;

/// Bound on redraws when a shuffle happens to land on the solved arrangement.
const MAX_ATTEMPTS: usize = 16;

pub trait GridShuffler {
    /// Produces a scrambled grid holding the same tiles as `solved`.
    fn shuffle(&mut self, solved: &Grid) -> Result<Grid>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShufflePolicy {
    /// Any permutation is accepted, even ones no sequence of moves can solve.
    AnyPermutation,
    /// Unsolvable deals are repaired by swapping two tiles.
    #[default]
    Solvable,
}

/// Calls `draw` until it returns an unsolved grid, giving up with the last draw after [`MAX_ATTEMPTS`].
fn draw_unsolved(mut draw: impl FnMut() -> Result<Grid>) -> Result<Grid> {
    let mut grid = draw()?;
    for attempt in 1..MAX_ATTEMPTS {
        if !is_solved(&grid) {
            return Ok(grid);
        }
        log::warn!("Shuffle came out solved, redrawing (attempt {attempt})");
        grid = draw()?;
    }

    if is_solved(&grid) {
        log::warn!("Shuffle still solved after {MAX_ATTEMPTS} attempts, using it anyway");
    }
    Ok(grid)
}
