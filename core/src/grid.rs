use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// An `n`×`n` permutation of the tiles `1..=n*n`, where `n*n` is the blank.
///
/// Every mutator keeps the values a permutation and keeps the cached blank coordinate pointing at the blank, so a
/// `Grid` can never be observed in a broken state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "GridSnapshot", try_from = "GridSnapshot")]
pub struct Grid {
    tiles: Array2<Tile>,
    blank: Coord2,
}

/// Flat row-major serialized form of a [`Grid`], validated on the way back in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub size: Coord,
    pub tiles: Vec<Tile>,
}

impl Grid {
    /// Row-major ascending tiles with the blank in the last cell.
    pub fn solved(size: Coord) -> Result<Self> {
        let mut values = reserve_cells(size)?;
        values.extend(1..=blank_tile(size));
        Self::from_parts(size, values, (size - 1, size - 1))
    }

    /// Builds a grid from row-major `values`, which must be a permutation of `1..=size*size`.
    pub fn from_values(size: Coord, values: Vec<Tile>) -> Result<Self> {
        let cells = total_cells(check_size(size)?);
        if values.len() != cells {
            return Err(GameError::NotAPermutation);
        }

        let blank_value = blank_tile(size);
        let mut seen = Vec::new();
        seen.try_reserve_exact(cells)
            .map_err(|_| GameError::AllocationFailure)?;
        seen.resize(cells, false);

        let mut blank = None;
        for (index, &value) in values.iter().enumerate() {
            if value == 0 || value > blank_value {
                return Err(GameError::InvalidTile(value));
            }
            let slot = &mut seen[usize::from(value - 1)];
            if *slot {
                return Err(GameError::NotAPermutation);
            }
            *slot = true;
            if value == blank_value {
                blank = Some(coords_of(index, size));
            }
        }

        let blank = blank.ok_or(GameError::NotAPermutation)?;
        Self::from_parts(size, values, blank)
    }

    fn from_parts(size: Coord, values: Vec<Tile>, blank: Coord2) -> Result<Self> {
        let n = usize::from(size);
        let tiles =
            Array2::from_shape_vec((n, n), values).map_err(|_| GameError::InvalidSize(size))?;
        Ok(Self { tiles, blank })
    }

    pub fn size(&self) -> Coord {
        // built from a `Coord` dimension, so it always fits
        self.tiles.nrows() as Coord
    }

    pub fn total_cells(&self) -> usize {
        self.tiles.len()
    }

    /// The sentinel value marking the blank cell.
    pub fn blank_tile(&self) -> Tile {
        blank_tile(self.size())
    }

    pub fn blank_position(&self) -> Coord2 {
        self.blank
    }

    pub fn is_blank(&self, coords: Coord2) -> bool {
        self.blank == coords
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Places `value` at `coords`; the tile previously there moves to where `value` used to be.
    pub fn set(&mut self, coords: Coord2, value: Tile) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        let from = self
            .position_of(value)
            .ok_or(GameError::InvalidTile(value))?;
        self.swap(coords, from)
    }

    /// Exchanges two cells, carrying the blank coordinate along if either one is the blank.
    pub fn swap(&mut self, a: Coord2, b: Coord2) -> Result<()> {
        let a = self.validate_coords(a)?;
        let b = self.validate_coords(b)?;

        self.tiles.swap(a.to_nd_index(), b.to_nd_index());
        if self.blank == a {
            self.blank = b;
        } else if self.blank == b {
            self.blank = a;
        }
        Ok(())
    }

    pub fn position_of(&self, value: Tile) -> Option<Coord2> {
        self.tiles
            .iter()
            .position(|&tile| tile == value)
            .map(|index| coords_of(index, self.size()))
    }

    /// Tiles in row-major order, the blank included.
    pub fn values(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Tile> + '_> + '_ {
        self.tiles.rows().into_iter().map(|row| row.into_iter().copied())
    }

    /// Full consistency check: the tiles are a permutation and the cached blank is where the sentinel is.
    pub fn is_permutation_valid(&self) -> bool {
        let blank_value = self.blank_tile();
        let mut seen = alloc::vec![false; self.total_cells()];

        for value in self.values() {
            if value == 0 || value > blank_value {
                return false;
            }
            let slot = &mut seen[usize::from(value - 1)];
            if *slot {
                return false;
            }
            *slot = true;
        }

        self.tiles[self.blank.to_nd_index()] == blank_value
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        Self {
            size: grid.size(),
            tiles: grid.values().collect(),
        }
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = GameError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self> {
        Self::from_values(snapshot.size, snapshot.tiles)
    }
}

fn check_size(size: Coord) -> Result<Coord> {
    if size >= MIN_SIZE {
        Ok(size)
    } else {
        Err(GameError::InvalidSize(size))
    }
}

const fn total_cells(size: Coord) -> usize {
    let size = size as usize;
    size * size
}

const fn blank_tile(size: Coord) -> Tile {
    let size = size as Tile;
    size * size
}

fn coords_of(index: usize, size: Coord) -> Coord2 {
    let size = usize::from(size);
    ((index / size) as Coord, (index % size) as Coord)
}

fn reserve_cells(size: Coord) -> Result<Vec<Tile>> {
    let cells = total_cells(check_size(size)?);
    let mut values = Vec::new();
    values
        .try_reserve_exact(cells)
        .map_err(|_| GameError::AllocationFailure)?;
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: Coord, values: &[Tile]) -> Grid {
        Grid::from_values(size, values.to_vec()).unwrap()
    }

    #[test]
    fn solved_grids_are_ascending_with_blank_last() {
        for size in [3, 4, 5] {
            let grid = Grid::solved(size).unwrap();
            let cells = Tile::from(size) * Tile::from(size);

            assert!(grid.is_permutation_valid());
            assert_eq!(grid.values().collect::<Vec<_>>(), (1..=cells).collect::<Vec<_>>());
            assert_eq!(grid.blank_position(), (size - 1, size - 1));
            assert_eq!(grid.blank_tile(), cells);
        }
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert_eq!(Grid::solved(0), Err(GameError::InvalidSize(0)));
        assert_eq!(Grid::solved(1), Err(GameError::InvalidSize(1)));
        assert!(Grid::solved(MAX_SIZE).is_ok());
    }

    #[test]
    fn from_values_locates_blank() {
        let grid = grid(3, &[1, 2, 3, 4, 9, 5, 7, 8, 6]);
        assert_eq!(grid.blank_position(), (1, 1));
        assert!(grid.is_blank((1, 1)));
        assert_eq!(grid.get((2, 2)), Ok(6));
    }

    #[test]
    fn from_values_rejects_non_permutations() {
        assert_eq!(
            Grid::from_values(2, alloc::vec![1, 1, 3, 4]),
            Err(GameError::NotAPermutation)
        );
        assert_eq!(
            Grid::from_values(2, alloc::vec![1, 2, 3]),
            Err(GameError::NotAPermutation)
        );
        assert_eq!(
            Grid::from_values(2, alloc::vec![0, 2, 3, 4]),
            Err(GameError::InvalidTile(0))
        );
        assert_eq!(
            Grid::from_values(2, alloc::vec![1, 2, 3, 5]),
            Err(GameError::InvalidTile(5))
        );
    }

    #[test]
    fn get_checks_bounds() {
        let grid = Grid::solved(3).unwrap();
        assert_eq!(grid.get((0, 0)), Ok(1));
        assert_eq!(grid.get((3, 0)), Err(GameError::OutOfBounds));
        assert_eq!(grid.get((0, 3)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn swap_carries_blank_coordinate() {
        let mut grid = Grid::solved(3).unwrap();

        grid.swap((2, 2), (1, 2)).unwrap();
        assert_eq!(grid.blank_position(), (1, 2));
        assert_eq!(grid[(2, 2)], 6);

        grid.swap((0, 0), (1, 2)).unwrap();
        assert_eq!(grid.blank_position(), (0, 0));
        assert!(grid.is_permutation_valid());
    }

    #[test]
    fn swap_out_of_bounds_leaves_grid_untouched() {
        let mut grid = Grid::solved(3).unwrap();
        let before = grid.clone();

        assert_eq!(grid.swap((2, 2), (2, 3)), Err(GameError::OutOfBounds));
        assert_eq!(grid, before);
    }

    #[test]
    fn set_keeps_permutation() {
        let mut grid = Grid::solved(3).unwrap();

        grid.set((0, 0), 9).unwrap();
        assert_eq!(grid.blank_position(), (0, 0));
        assert_eq!(grid[(2, 2)], 1);
        assert!(grid.is_permutation_valid());

        assert_eq!(grid.set((0, 0), 10), Err(GameError::InvalidTile(10)));
        assert_eq!(grid.set((5, 0), 2), Err(GameError::OutOfBounds));
    }

    #[test]
    fn rows_are_row_major() {
        let grid = Grid::solved(3).unwrap();
        let rows: Vec<Vec<Tile>> = grid.rows().map(|row| row.collect()).collect();
        assert_eq!(rows, [[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
    }

    #[test]
    fn snapshot_is_flat_and_validated() {
        let grid = grid(2, &[2, 4, 1, 3]);

        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"{"size":2,"tiles":[2,4,1,3]}"#);
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);

        let broken = r#"{"size":2,"tiles":[2,2,1,3]}"#;
        assert!(serde_json::from_str::<Grid>(broken).is_err());
    }
}
