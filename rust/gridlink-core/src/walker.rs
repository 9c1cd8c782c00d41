use serde::Serialize;
use tracing::debug;

use crate::models::{Cell, Direction, Vec3};
use crate::scene::{GroundQuery, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WalkerPhase {
    Absent,
    Idle,
    Moving,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WalkerState {
    pub phase: WalkerPhase,
    /// Last settled cell (spawn point or last arrival).
    pub position: Cell,
    pub facing: Direction,
    /// Destination of the motion in flight; Some only while Moving.
    pub target: Option<Cell>,
}

impl Default for WalkerState {
    fn default() -> Self {
        Self { phase: WalkerPhase::Absent, position: Cell::new(0, 0), facing: Direction::FORWARD, target: None }
    }
}

/// Logical state of the single walker. Emits rotate/move intents and leaves
/// the interpolation to the renderer, which calls [`WalkerCoordinator::arrive`]
/// when a motion completes.
#[derive(Debug, Clone)]
pub struct WalkerCoordinator {
    state: WalkerState,
    cell_size: f32,
    hover_offset: f32,
}

impl WalkerCoordinator {
    pub fn new(cell_size: f32, hover_offset: f32) -> Self {
        Self { state: WalkerState::default(), cell_size, hover_offset }
    }

    pub fn state(&self) -> &WalkerState { &self.state }
    pub fn phase(&self) -> WalkerPhase { self.state.phase }

    fn ground_point<G: GroundQuery + ?Sized>(&self, cell: Cell, ground: &G) -> Vec3 {
        let x = cell.col as f32 * self.cell_size;
        let z = cell.row as f32 * self.cell_size;
        Vec3::new(x, ground.height_at(x, z), z)
    }

    /// Position the walker hovers at over `cell`.
    pub fn world_point<G: GroundQuery + ?Sized>(&self, cell: Cell, ground: &G) -> Vec3 {
        let mut p = self.ground_point(cell, ground);
        p.y += self.hover_offset;
        p
    }

    pub fn on_agent_move<R, G>(&mut self, target: Cell, renderer: &mut R, ground: &G)
    where
        R: Renderer + ?Sized,
        G: GroundQuery + ?Sized,
    {
        let dest = self.world_point(target, ground);
        let origin = match self.state.phase {
            WalkerPhase::Absent => {
                self.state = WalkerState { phase: WalkerPhase::Idle, position: target, target: None, ..self.state };
                renderer.move_to(dest);
                debug!(row = target.row, col = target.col, "walker spawned");
                return;
            }
            WalkerPhase::Idle => self.state.position,
            // Retarget: the pre-empted destination becomes the new origin.
            WalkerPhase::Moving => self.state.target.unwrap_or(self.state.position),
        };

        if let Some(dir) = Direction::between(origin, target) {
            self.state.facing = dir;
            renderer.rotate_towards(dir);
        }
        renderer.move_to(dest);
        if self.state.phase == WalkerPhase::Moving {
            debug!(row = target.row, col = target.col, "walker retargeted");
        }
        self.state.phase = WalkerPhase::Moving;
        self.state.target = Some(target);
    }

    /// Settle the motion in flight and drop a footprint marker at its target.
    /// Returns false when nothing was moving.
    pub fn arrive<R, G>(&mut self, renderer: &mut R, ground: &G) -> bool
    where
        R: Renderer + ?Sized,
        G: GroundQuery + ?Sized,
    {
        let Some(target) = self.state.target.take() else { return false };
        self.state.position = target;
        self.state.phase = WalkerPhase::Idle;
        renderer.mark_visited(self.ground_point(target, ground));
        debug!(row = target.row, col = target.col, "walker arrived");
        true
    }
}
