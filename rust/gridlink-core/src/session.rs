use tracing::info;

use crate::dispatch::UpdateHandler;
use crate::errors::InvalidGrid;
use crate::grid::GridModel;
use crate::models::Cell;
use crate::placement::{AssetPicker, PlacementPlanner, RandomAssetPicker};
use crate::regions::extract_regions;
use crate::scene::{GroundQuery, Renderer};
use crate::walker::WalkerCoordinator;

/// Consumer-side state for one server session: current grid, planner and
/// walker, plus the collaborators they talk to. Lives on the tick thread only.
pub struct Session<R, G, P = RandomAssetPicker> {
    grid: GridModel,
    planner: PlacementPlanner<P>,
    walker: WalkerCoordinator,
    renderer: R,
    ground: G,
}

impl<R: Renderer, G: GroundQuery, P: AssetPicker> Session<R, G, P> {
    pub fn new(planner: PlacementPlanner<P>, hover_offset: f32, renderer: R, ground: G) -> Self {
        let walker = WalkerCoordinator::new(planner.cell_size(), hover_offset);
        Self { grid: GridModel::new(), planner, walker, renderer, ground }
    }

    pub fn grid(&self) -> &GridModel { &self.grid }
    pub fn walker(&self) -> &WalkerCoordinator { &self.walker }
    pub fn renderer(&self) -> &R { &self.renderer }
    pub fn renderer_mut(&mut self) -> &mut R { &mut self.renderer }

    /// Renderer callback for a finished walker motion.
    pub fn walker_arrived(&mut self) -> bool {
        self.walker.arrive(&mut self.renderer, &self.ground)
    }

    fn rebuild(&mut self) {
        let Some(grid) = self.grid.current() else { return };
        self.renderer.clear_scene();

        let tiles = grid.tile_placements(self.planner.cell_size());
        for tile in &tiles {
            self.renderer.place_tile(tile);
        }

        let regions = extract_regions(grid);
        for region in &regions {
            let cmd = self.planner.plan(region.bounds(), &self.renderer);
            tracing::debug!(cells = region.len(), asset = %cmd.asset, width = cmd.width, depth = cmd.depth, "building placed");
            self.renderer.place(&cmd);
        }
        let walkable = grid.walkable_cells().len();
        info!(rows = grid.rows(), cols = grid.cols(), tiles = tiles.len(), walkable, regions = regions.len(), "city rebuilt from grid");
    }
}

impl<R: Renderer, G: GroundQuery, P: AssetPicker> UpdateHandler for Session<R, G, P> {
    fn on_grid_replace(&mut self, matrix: Vec<Vec<i32>>) -> Result<(), InvalidGrid> {
        self.grid.replace(matrix)?;
        self.rebuild();
        Ok(())
    }

    fn on_agent_move(&mut self, cell: Cell) {
        self.walker.on_agent_move(cell, &mut self.renderer, &self.ground);
    }
}
