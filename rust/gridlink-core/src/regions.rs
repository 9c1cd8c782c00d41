use std::collections::VecDeque;

use crate::grid::{Grid, FOOTPRINT};
use crate::models::{BoundingBox, Cell};

/// Maximal 4-connected set of footprint cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    cells: Vec<Cell>,
    bounds: BoundingBox,
}

impl Region {
    pub fn cells(&self) -> &[Cell] { &self.cells }
    pub fn bounds(&self) -> BoundingBox { self.bounds }
    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
    pub fn contains(&self, cell: Cell) -> bool { self.cells.contains(&cell) }
}

// Fixed neighbour order: down, up, right, left.
const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Label every building region of `grid`.
///
/// Cells are scanned row-major; each unvisited footprint cell seeds a
/// breadth-first fill. Enumeration order of the result is not meaningful,
/// only the member sets are.
pub fn extract_regions(grid: &Grid) -> Vec<Region> {
    let (rows, cols) = grid.dims();
    let mut visited = vec![false; rows * cols];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut out = Vec::new();

    for seed in 0..rows * cols {
        if visited[seed] || grid.code_at(seed) != FOOTPRINT {
            continue;
        }
        let first = grid.cell_at(seed);
        let mut bounds = BoundingBox::from_cell(first);
        let mut cells = Vec::new();
        queue.push_back(seed);

        while let Some(idx) = queue.pop_front() {
            // A cell can be queued twice before it is dequeued.
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            let cell = grid.cell_at(idx);
            bounds.include(cell);
            cells.push(cell);

            for (dr, dc) in NEIGHBORS {
                let Some(n) = grid.index_of(Cell::new(cell.row + dr, cell.col + dc)) else { continue };
                if !visited[n] && grid.code_at(n) == FOOTPRINT {
                    queue.push_back(n);
                }
            }
        }

        out.push(Region { cells, bounds });
    }

    out
}
