use tracing::debug;

use crate::errors::InvalidGrid;
use crate::models::{Cell, TileKind, TilePlacement, Vec3};

pub const WALKABLE: i32 = 1;
pub const FOOTPRINT: i32 = -10;

/// Rectangular matrix of cell codes, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl Grid {
    pub fn from_rows(matrix: Vec<Vec<i32>>) -> Result<Self, InvalidGrid> {
        let rows = matrix.len();
        let cols = matrix.first().map(|r| r.len()).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(InvalidGrid::ZeroSize { rows, cols });
        }
        let mut cells = Vec::with_capacity(rows * cols);
        for (row, r) in matrix.into_iter().enumerate() {
            if r.len() != cols {
                return Err(InvalidGrid::Ragged { row, len: r.len(), expected: cols });
            }
            cells.extend(r);
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn dims(&self) -> (usize, usize) { (self.rows, self.cols) }

    pub fn get(&self, cell: Cell) -> Option<i32> {
        let idx = self.index_of(cell)?;
        Some(self.cells[idx])
    }

    pub(crate) fn index_of(&self, cell: Cell) -> Option<usize> {
        if cell.row < 0 || cell.col < 0 {
            return None;
        }
        let (r, c) = (cell.row as usize, cell.col as usize);
        if r >= self.rows || c >= self.cols {
            return None;
        }
        Some(r * self.cols + c)
    }

    pub(crate) fn code_at(&self, idx: usize) -> i32 { self.cells[idx] }

    pub(crate) fn cell_at(&self, idx: usize) -> Cell {
        Cell::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    /// Cells in row-major order with their codes.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, i32)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &code)| (self.cell_at(i), code))
    }

    pub fn walkable_cells(&self) -> Vec<Cell> {
        self.iter().filter(|&(_, code)| code == WALKABLE).map(|(c, _)| c).collect()
    }

    /// One tile per cell whose code maps to a surface tile, laid out at
    /// `(col * cell_size, 0, row * cell_size)`.
    pub fn tile_placements(&self, cell_size: f32) -> Vec<TilePlacement> {
        self.iter()
            .filter_map(|(cell, code)| {
                let kind = TileKind::from_code(code)?;
                let position = Vec3::new(cell.col as f32 * cell_size, 0.0, cell.row as f32 * cell_size);
                Some(TilePlacement { kind, cell, position })
            })
            .collect()
    }
}

/// Holds the grid of the latest accepted update. Replacement is wholesale.
#[derive(Debug, Default)]
pub struct GridModel {
    current: Option<Grid>,
}

impl GridModel {
    pub fn new() -> Self { Self::default() }

    pub fn current(&self) -> Option<&Grid> { self.current.as_ref() }

    pub fn dims(&self) -> Option<(usize, usize)> { self.current.as_ref().map(Grid::dims) }

    /// Validate and swap in `matrix`; on error the previous grid stays.
    pub fn replace(&mut self, matrix: Vec<Vec<i32>>) -> Result<&Grid, InvalidGrid> {
        let grid = Grid::from_rows(matrix)?;
        debug!(rows = grid.rows, cols = grid.cols, "grid replaced");
        Ok(self.current.insert(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_size() {
        assert_eq!(Grid::from_rows(vec![]), Err(InvalidGrid::ZeroSize { rows: 0, cols: 0 }));
        assert_eq!(Grid::from_rows(vec![vec![], vec![]]), Err(InvalidGrid::ZeroSize { rows: 2, cols: 0 }));
    }

    #[test]
    fn rejects_ragged() {
        let err = Grid::from_rows(vec![vec![1, 2], vec![1]]).unwrap_err();
        assert_eq!(err, InvalidGrid::Ragged { row: 1, len: 1, expected: 2 });
    }

    #[test]
    fn failed_replace_keeps_previous_grid() {
        let mut model = GridModel::new();
        model.replace(vec![vec![1, 2, 4]]).unwrap();
        assert!(model.replace(vec![]).is_err());
        assert_eq!(model.dims(), Some((1, 3)));
        assert_eq!(model.current().unwrap().get(Cell::new(0, 2)), Some(4));
    }

    #[test]
    fn get_out_of_bounds() {
        let g = Grid::from_rows(vec![vec![1, 2], vec![5, -1]]).unwrap();
        assert_eq!(g.get(Cell::new(1, 1)), Some(-1));
        assert_eq!(g.get(Cell::new(2, 0)), None);
        assert_eq!(g.get(Cell::new(0, -1)), None);
    }

    #[test]
    fn tiles_and_walkables() {
        let g = Grid::from_rows(vec![vec![1, -10, 3], vec![2, 1, 5]]).unwrap();
        assert_eq!(g.walkable_cells(), vec![Cell::new(0, 0), Cell::new(1, 1)]);
        let tiles = g.tile_placements(2.0);
        let kinds: Vec<TileKind> = tiles.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TileKind::Street, TileKind::Dirt, TileKind::Street, TileKind::Pothole]);
        assert_eq!(tiles[3].position, Vec3::new(4.0, 0.0, 2.0));
    }
}
