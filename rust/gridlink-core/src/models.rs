use serde::{Deserialize, Serialize};

/// Grid coordinate. `row` is the first matrix index, `col` the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self { Self { row, col } }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self { Self { x, y, z } }
}

/// Unit direction on the horizontal plane (world X follows columns, world Z follows rows).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub x: f32,
    pub z: f32,
}

impl Direction {
    pub const FORWARD: Direction = Direction { x: 0.0, z: 1.0 };

    /// Normalized direction from `from` to `to`, or None when the cells coincide.
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        // widened: cells anywhere in i32 range must not overflow
        let dx = (i64::from(to.col) - i64::from(from.col)) as f32;
        let dz = (i64::from(to.row) - i64::from(from.row)) as f32;
        let len = (dx * dx + dz * dz).sqrt();
        if len == 0.0 {
            return None;
        }
        Some(Self { x: dx / len, z: dz / len })
    }
}

/// Inclusive cell bounds of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_row: i32,
    pub min_col: i32,
    pub max_row: i32,
    pub max_col: i32,
}

impl BoundingBox {
    pub fn from_cell(c: Cell) -> Self {
        Self { min_row: c.row, min_col: c.col, max_row: c.row, max_col: c.col }
    }

    pub fn include(&mut self, c: Cell) {
        self.min_row = self.min_row.min(c.row);
        self.min_col = self.min_col.min(c.col);
        self.max_row = self.max_row.max(c.row);
        self.max_col = self.max_col.max(c.col);
    }

    pub fn row_span(&self) -> i32 { self.max_row - self.min_row + 1 }
    pub fn col_span(&self) -> i32 { self.max_col - self.min_col + 1 }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementCommand {
    pub asset: String,
    pub center: Vec3,
    pub width: f32,
    pub depth: f32,
    pub scale: Vec3,
}

/// Surface tiles drawn for the non-footprint cell codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Street,
    Dirt,
    Cracked,
    Pothole,
    Closed,
}

impl TileKind {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(TileKind::Street),
            2 => Some(TileKind::Dirt),
            4 => Some(TileKind::Cracked),
            5 => Some(TileKind::Pothole),
            -1 => Some(TileKind::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TilePlacement {
    pub kind: TileKind,
    pub cell: Cell,
    pub position: Vec3,
}
