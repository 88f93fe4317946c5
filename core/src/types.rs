use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Single coordinate axis used for grid dimension and positions.
pub type Coord = u8;

/// Tile value stored in a cell; `n * n` marks the blank.
pub type Tile = u16;

/// Count type used for move budgets and moves made.
pub type MoveCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Where the blank goes when a move is applied.
///
/// `Left`/`Right` move the blank along the column axis, `Up`/`Down` along the row axis. The tile sitting in the
/// target cell slides the opposite way into the old blank position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Maps the `A`/`D`/`W`/`S` keys, case-insensitive.
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol.to_ascii_uppercase() {
            'A' => Ok(Self::Left),
            'D' => Ok(Self::Right),
            'W' => Ok(Self::Up),
            'S' => Ok(Self::Down),
            _ => Err(GameError::InvalidDirectionSymbol(symbol)),
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Left => 'A',
            Self::Right => 'D',
            Self::Up => 'W',
            Self::Down => 'S',
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// `(row, col)` displacement of the blank.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
        }
    }
}

/// Applies `direction` to `coords`, returning a value only when it remains inside an `size`×`size` grid.
pub(crate) fn step(coords: Coord2, direction: Direction, size: Coord) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = direction.delta();

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= size {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= size {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol.to_ascii_uppercase() {
            'E' => Ok(Self::Easy),
            'M' => Ok(Self::Medium),
            'H' => Ok(Self::Hard),
            _ => Err(GameError::InvalidDifficultySymbol(symbol)),
        }
    }

    /// Grid dimension `n` of the `n`×`n` puzzle.
    pub const fn size(self) -> Coord {
        match self {
            Self::Easy => 3,
            Self::Medium => 4,
            Self::Hard => 5,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Easy => Some(Self::Medium),
            Self::Medium => Some(Self::Hard),
            Self::Hard => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    One,
    Two,
    Three,
}

impl Level {
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol {
            '1' => Ok(Self::One),
            '2' => Ok(Self::Two),
            '3' => Ok(Self::Three),
            _ => Err(GameError::InvalidLevelSymbol(symbol)),
        }
    }

    pub const fn move_budget(self) -> MoveCount {
        match self {
            Self::One => 40,
            Self::Two => 35,
            Self::Three => 30,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::One => Some(Self::Two),
            Self::Two => Some(Self::Three),
            Self::Three => None,
        }
    }
}

/// Answer to the after-win prompt: `y`/`Y` moves on, anything else stops.
pub fn parse_continue(symbol: char) -> bool {
    symbol.eq_ignore_ascii_case(&'y')
}

/// A `(Level, Difficulty)` pair, the unit of progression.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Stage {
    pub level: Level,
    pub difficulty: Difficulty,
}

impl Stage {
    pub const FIRST: Stage = Stage::new(Level::One, Difficulty::Easy);

    pub const fn new(level: Level, difficulty: Difficulty) -> Self {
        Self { level, difficulty }
    }

    /// Grows the grid first, then moves to the next level starting over at `Easy`.
    pub const fn next(self) -> Option<Self> {
        match (self.difficulty.next(), self.level.next()) {
            (Some(difficulty), _) => Some(Self::new(self.level, difficulty)),
            (None, Some(level)) => Some(Self::new(level, Difficulty::Easy)),
            (None, None) => None,
        }
    }

    pub const fn config(self) -> crate::PuzzleConfig {
        crate::PuzzleConfig::new_unchecked(self.difficulty.size(), self.level.move_budget())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_symbols_are_case_insensitive() {
        assert_eq!(Direction::from_symbol('a'), Ok(Direction::Left));
        assert_eq!(Direction::from_symbol('D'), Ok(Direction::Right));
        assert_eq!(Direction::from_symbol('w'), Ok(Direction::Up));
        assert_eq!(Direction::from_symbol('S'), Ok(Direction::Down));
        assert_eq!(
            Direction::from_symbol('x'),
            Err(GameError::InvalidDirectionSymbol('x'))
        );
    }

    #[test]
    fn symbol_matches_parser() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_symbol(direction.symbol()), Ok(direction));
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn step_stops_at_edges() {
        assert_eq!(step((0, 0), Direction::Up, 3), None);
        assert_eq!(step((0, 0), Direction::Left, 3), None);
        assert_eq!(step((2, 2), Direction::Down, 3), None);
        assert_eq!(step((2, 2), Direction::Right, 3), None);
        assert_eq!(step((2, 2), Direction::Up, 3), Some((1, 2)));
        assert_eq!(step((2, 2), Direction::Left, 3), Some((2, 1)));
    }

    #[test]
    fn stage_selection_symbols() {
        assert_eq!(Level::from_symbol('2'), Ok(Level::Two));
        assert_eq!(Level::from_symbol('4'), Err(GameError::InvalidLevelSymbol('4')));
        assert_eq!(Difficulty::from_symbol('h'), Ok(Difficulty::Hard));
        assert_eq!(
            Difficulty::from_symbol('q'),
            Err(GameError::InvalidDifficultySymbol('q'))
        );
    }

    #[test]
    fn only_yes_continues() {
        assert!(parse_continue('y'));
        assert!(parse_continue('Y'));
        assert!(!parse_continue('n'));
        assert!(!parse_continue('\n'));
    }

    #[test]
    fn budgets_and_sizes() {
        assert_eq!(
            [Level::One, Level::Two, Level::Three].map(Level::move_budget),
            [40, 35, 30]
        );
        assert_eq!(
            [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard].map(Difficulty::size),
            [3, 4, 5]
        );
    }

    #[test]
    fn stages_progress_size_first_then_level() {
        let mut stages = alloc::vec![Stage::FIRST];
        while let Some(next) = stages.last().and_then(|stage| stage.next()) {
            stages.push(next);
        }

        assert_eq!(stages.len(), 9);
        assert_eq!(stages[1], Stage::new(Level::One, Difficulty::Medium));
        assert_eq!(stages[3], Stage::new(Level::Two, Difficulty::Easy));
        assert_eq!(stages[8], Stage::new(Level::Three, Difficulty::Hard));
    }
}
