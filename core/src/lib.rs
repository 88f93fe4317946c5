#![cfg_attr(not(test), no_std)]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use controller::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use types::*;
pub use win::*;

mod controller;
mod engine;
mod error;
mod generator;
mod grid;
mod render;
mod types;
mod win;

/// Smallest grid that still allows a move in every direction from some cell.
pub const MIN_SIZE: Coord = 2;

/// Largest grid whose tiles still fit in [`Tile`].
pub const MAX_SIZE: Coord = 255;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub size: Coord,
    pub move_budget: MoveCount,
}

impl PuzzleConfig {
    pub const fn new_unchecked(size: Coord, move_budget: MoveCount) -> Self {
        Self { size, move_budget }
    }

    pub fn new(size: Coord, move_budget: MoveCount) -> Self {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        let move_budget = move_budget.max(1);
        Self::new_unchecked(size, move_budget)
    }

    pub const fn total_cells(&self) -> usize {
        let size = self.size as usize;
        size * size
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Moved,
    Won,
    Lost,
}

impl MoveOutcome {
    pub const fn is_finished(self) -> bool {
        use MoveOutcome::*;
        match self {
            Moved => false,
            Won => true,
            Lost => true,
        }
    }
}
