use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Scrambles by playing random legal moves from the given grid, never immediately undoing the previous one.
///
/// The result is always solvable, and the recorded history undone in reverse restores the starting grid.
#[derive(Clone, Debug)]
pub struct RandomWalkShuffler {
    rng: SmallRng,
    steps: usize,
}

impl RandomWalkShuffler {
    pub const DEFAULT_STEPS: usize = 200;

    pub fn new(seed: u64, steps: usize) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            steps,
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Walks from `start`, returning the scrambled grid together with the moves that produced it.
    pub fn shuffle_with_history(&mut self, start: &Grid) -> Result<(Grid, Vec<Direction>)> {
        let mut grid = start.clone();
        let mut history = Vec::new();
        history
            .try_reserve_exact(self.steps)
            .map_err(|_| GameError::AllocationFailure)?;

        for _ in 0..self.steps {
            let undo = history.last().copied().map(Direction::opposite);
            let mut options = [Direction::Left; 4];
            let mut count = 0;
            for direction in legal_moves(&grid).filter(|&direction| Some(direction) != undo) {
                options[count] = direction;
                count += 1;
            }

            let direction = options[self.rng.random_range(0..count)];
            apply_move(&mut grid, direction)?;
            history.push(direction);
        }

        Ok((grid, history))
    }
}

impl GridShuffler for RandomWalkShuffler {
    fn shuffle(&mut self, solved: &Grid) -> Result<Grid> {
        let grid = draw_unsolved(|| Ok(self.shuffle_with_history(solved)?.0))?;
        log::debug!(
            "Walked {} steps on {size}x{size} grid, blank at {:?}",
            self.steps,
            grid.blank_position(),
            size = grid.size()
        );
        Ok(grid)
    }
}

/// The moves that take a grid scrambled by `history` back to where the walk started.
pub fn undo_sequence(history: &[Direction]) -> impl Iterator<Item = Direction> + '_ {
    history.iter().rev().map(|&direction| direction.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn history_has_requested_length_and_no_backtracking() {
        let solved = Grid::solved(4).unwrap();
        let mut shuffler = RandomWalkShuffler::new(3, 50);

        let (grid, history) = shuffler.shuffle_with_history(&solved).unwrap();

        assert_eq!(history.len(), 50);
        assert!(history.windows(2).all(|pair| pair[1] != pair[0].opposite()));
        assert!(grid.is_permutation_valid());
        assert!(is_solvable(&grid));
    }

    #[test]
    fn zero_steps_gives_back_the_start() {
        let solved = Grid::solved(3).unwrap();
        let mut shuffler = RandomWalkShuffler::new(0, 0);

        let (grid, history) = shuffler.shuffle_with_history(&solved).unwrap();

        assert!(history.is_empty());
        assert_eq!(grid, solved);
    }

    proptest! {
        #[test]
        fn undoing_the_walk_solves_the_grid(seed: u64, size in 2u8..=5, steps in 0usize..120) {
            let solved = Grid::solved(size).unwrap();
            let mut shuffler = RandomWalkShuffler::new(seed, steps);

            let (mut grid, history) = shuffler.shuffle_with_history(&solved).unwrap();
            for direction in undo_sequence(&history) {
                apply_move(&mut grid, direction).unwrap();
            }

            prop_assert!(is_solved(&grid));
        }
    }
}
