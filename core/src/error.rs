use thiserror::Error;

use crate::{ControllerState, Coord, Tile};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Move would take the blank outside the grid")]
    OutOfBounds,
    #[error("Unknown move symbol {0:?}, expected one of A, D, W, S")]
    InvalidDirectionSymbol(char),
    #[error("Unknown level symbol {0:?}, expected 1, 2 or 3")]
    InvalidLevelSymbol(char),
    #[error("Unknown difficulty symbol {0:?}, expected E, M or H")]
    InvalidDifficultySymbol(char),
    #[error("Could not allocate the grid buffer")]
    AllocationFailure,
    #[error("Unsupported grid size {0}")]
    InvalidSize(Coord),
    #[error("Move budget must allow at least one move")]
    EmptyMoveBudget,
    #[error("Tile {0} is not part of this grid")]
    InvalidTile(Tile),
    #[error("Values do not form a permutation of the grid tiles")]
    NotAPermutation,
    #[error("Action not allowed while the game is {0:?}")]
    InvalidTransition(ControllerState),
}

impl GameError {
    /// Player mistakes that leave the game untouched and should just be re-prompted.
    pub const fn is_recoverable(self) -> bool {
        matches!(
            self,
            Self::OutOfBounds
                | Self::InvalidDirectionSymbol(_)
                | Self::InvalidLevelSymbol(_)
                | Self::InvalidDifficultySymbol(_)
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
