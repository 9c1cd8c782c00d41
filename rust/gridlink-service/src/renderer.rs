use gridlink_core::{Direction, PlacementCommand, Renderer, TilePlacement, Vec3};
use serde::Serialize;
use tracing::{debug, info};

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Renderer for headless runs: every command becomes a structured log event.
/// Knows no asset sizes, so buildings are scaled by cell size.
#[derive(Debug, Default)]
pub struct TracingRenderer {
    pub tiles: usize,
    pub buildings: usize,
    pub footprints: usize,
}

impl Renderer for TracingRenderer {
    fn clear_scene(&mut self) {
        debug!(tiles = self.tiles, buildings = self.buildings, "scene cleared");
        self.tiles = 0;
        self.buildings = 0;
    }

    fn place_tile(&mut self, tile: &TilePlacement) {
        self.tiles += 1;
        debug!(tile = %json(tile), "place_tile");
    }

    fn place(&mut self, cmd: &PlacementCommand) {
        self.buildings += 1;
        info!(command = %json(cmd), "place_building");
    }

    fn rotate_towards(&mut self, direction: Direction) {
        info!(x = direction.x, z = direction.z, "walker_rotate");
    }

    fn move_to(&mut self, position: Vec3) {
        info!(position = %json(&position), "walker_move");
    }

    fn mark_visited(&mut self, position: Vec3) {
        self.footprints += 1;
        info!(position = %json(&position), footprints = self.footprints, "walker_footprint");
    }

    fn native_size(&self, _asset: &str) -> Option<(f32, f32)> {
        None
    }
}
