pub mod models;
pub mod errors;
pub mod grid;
pub mod regions;
pub mod placement;
pub mod walker;
pub mod scene;
pub mod dispatch;
pub mod session;

pub use models::{BoundingBox, Cell, Direction, PlacementCommand, TileKind, TilePlacement, Vec3};
pub use errors::{InvalidGrid, PlannerError};
pub use grid::{Grid, GridModel};
pub use regions::{extract_regions, Region};
pub use placement::{AssetPicker, PlacementPlanner, RandomAssetPicker};
pub use walker::{WalkerCoordinator, WalkerPhase, WalkerState};
pub use scene::{FlatGround, GroundQuery, Renderer};
pub use dispatch::{DispatchEntry, DispatchQueue, DrainSummary, UpdateHandler};
pub use session::Session;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
