use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Deals every tile into a uniformly random cell with a Fisher–Yates shuffle, then applies the configured
/// [`ShufflePolicy`].
#[derive(Clone, Debug)]
pub struct RandomShuffler {
    rng: SmallRng,
    policy: ShufflePolicy,
}

impl RandomShuffler {
    pub fn new(seed: u64, policy: ShufflePolicy) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            policy,
        }
    }

    pub fn policy(&self) -> ShufflePolicy {
        self.policy
    }

    fn deal(&mut self, solved: &Grid) -> Result<Grid> {
        let mut values = Vec::new();
        values
            .try_reserve_exact(solved.total_cells())
            .map_err(|_| GameError::AllocationFailure)?;
        values.extend(solved.values());

        for i in (1..values.len()).rev() {
            let j = self.rng.random_range(0..=i);
            values.swap(i, j);
        }

        let mut grid = Grid::from_values(solved.size(), values)?;
        if self.policy == ShufflePolicy::Solvable && make_solvable(&mut grid)? {
            log::debug!("Dealt an unsolvable grid, swapped two tiles to fix parity");
        }
        Ok(grid)
    }
}

impl GridShuffler for RandomShuffler {
    fn shuffle(&mut self, solved: &Grid) -> Result<Grid> {
        let grid = draw_unsolved(|| self.deal(solved))?;
        log::debug!(
            "Shuffled {size}x{size} grid, blank at {:?}",
            grid.blank_position(),
            size = grid.size()
        );
        Ok(grid)
    }
}
