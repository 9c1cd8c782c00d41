use crate::models::{Direction, PlacementCommand, TilePlacement, Vec3};

/// Receives finished commands. Smooth motion, asset instantiation and
/// drawing all happen on the other side of this trait.
pub trait Renderer {
    /// Drop everything built from the previous grid.
    fn clear_scene(&mut self);
    fn place_tile(&mut self, tile: &TilePlacement);
    fn place(&mut self, cmd: &PlacementCommand);
    fn rotate_towards(&mut self, direction: Direction);
    fn move_to(&mut self, position: Vec3);
    fn mark_visited(&mut self, position: Vec3);
    /// Native (width, depth) of an asset, if the renderer knows it.
    fn native_size(&self, asset: &str) -> Option<(f32, f32)>;
}

pub trait GroundQuery {
    fn height_at(&self, x: f32, z: f32) -> f32;
}

/// Ground at a constant height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatGround {
    pub height: f32,
}

impl GroundQuery for FlatGround {
    fn height_at(&self, _x: f32, _z: f32) -> f32 { self.height }
}
