#![allow(dead_code)]

use std::collections::HashMap;

use gridlink_core::{Direction, PlacementCommand, Renderer, TilePlacement, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear,
    Tile(TilePlacement),
    Place(PlacementCommand),
    Rotate(Direction),
    MoveTo(Vec3),
    Visited(Vec3),
}

/// Records every command in order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
    pub native: HashMap<String, (f32, f32)>,
}

impl RecordingRenderer {
    pub fn with_native(asset: &str, w: f32, d: f32) -> Self {
        let mut r = Self::default();
        r.native.insert(asset.to_string(), (w, d));
        r
    }

    pub fn placements(&self) -> Vec<&PlacementCommand> {
        self.calls.iter().filter_map(|c| match c { Call::Place(p) => Some(p), _ => None }).collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear_scene(&mut self) { self.calls.push(Call::Clear); }
    fn place_tile(&mut self, tile: &TilePlacement) { self.calls.push(Call::Tile(*tile)); }
    fn place(&mut self, cmd: &PlacementCommand) { self.calls.push(Call::Place(cmd.clone())); }
    fn rotate_towards(&mut self, direction: Direction) { self.calls.push(Call::Rotate(direction)); }
    fn move_to(&mut self, position: Vec3) { self.calls.push(Call::MoveTo(position)); }
    fn mark_visited(&mut self, position: Vec3) { self.calls.push(Call::Visited(position)); }
    fn native_size(&self, asset: &str) -> Option<(f32, f32)> { self.native.get(asset).copied() }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}
