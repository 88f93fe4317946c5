use crate::types::step;
use crate::*;

/// Moves the blank one cell in `direction`, sliding the tile there into the blank's old cell.
///
/// The target cell is checked before anything is written: a move off the edge fails with
/// [`GameError::OutOfBounds`] and leaves `grid` exactly as it was. On success returns the cell the blank left, which
/// now holds the moved tile.
pub fn apply_move(grid: &mut Grid, direction: Direction) -> Result<Coord2> {
    let from = grid.blank_position();
    let to = step(from, direction, grid.size()).ok_or(GameError::OutOfBounds)?;

    grid.swap(from, to)?;
    log::trace!("Blank moved {direction:?} from {from:?} to {to:?}");
    Ok(from)
}

/// Directions that [`apply_move`] would accept for the current blank position.
pub fn legal_moves(grid: &Grid) -> impl Iterator<Item = Direction> + use<> {
    let blank = grid.blank_position();
    let size = grid.size();
    Direction::ALL
        .into_iter()
        .filter(move |&direction| step(blank, direction, size).is_some())
}

pub fn is_legal_move(grid: &Grid, direction: Direction) -> bool {
    step(grid.blank_position(), direction, grid.size()).is_some()
}
