use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::PlannerError;
use crate::models::{BoundingBox, PlacementCommand, Vec3};
use crate::scene::Renderer;

/// Chooses which asset a region is built with. `assets` is never empty.
pub trait AssetPicker {
    fn pick(&mut self, assets: &[String]) -> usize;
}

/// Uniform random choice.
#[derive(Debug, Clone)]
pub struct RandomAssetPicker<R = StdRng> {
    rng: R,
}

impl RandomAssetPicker<StdRng> {
    pub fn from_entropy() -> Self { Self { rng: StdRng::from_entropy() } }
    pub fn seeded(seed: u64) -> Self { Self { rng: StdRng::seed_from_u64(seed) } }
}

impl<R: Rng> RandomAssetPicker<R> {
    pub fn with_rng(rng: R) -> Self { Self { rng } }
}

impl<R: Rng> AssetPicker for RandomAssetPicker<R> {
    fn pick(&mut self, assets: &[String]) -> usize { self.rng.gen_range(0..assets.len()) }
}

/// World-space footprint of a bounding box before any asset is involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub center: Vec3,
    pub width: f32,
    pub depth: f32,
}

pub struct PlacementPlanner<P = RandomAssetPicker> {
    cell_size: f32,
    assets: Vec<String>,
    picker: P,
}

impl<P: AssetPicker> PlacementPlanner<P> {
    pub fn new(cell_size: f32, assets: Vec<String>, picker: P) -> Result<Self, PlannerError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(PlannerError::BadCellSize(cell_size));
        }
        if assets.is_empty() {
            return Err(PlannerError::NoAssets);
        }
        Ok(Self { cell_size, assets, picker })
    }

    pub fn cell_size(&self) -> f32 { self.cell_size }
    pub fn assets(&self) -> &[String] { &self.assets }

    /// Width runs along columns (world X), depth along rows (world Z). The
    /// center is the midpoint of the box's outer cell edges.
    pub fn footprint(&self, b: BoundingBox) -> Footprint {
        let cs = self.cell_size;
        let width = b.col_span() as f32 * cs;
        let depth = b.row_span() as f32 * cs;
        let cx = (b.min_col + b.max_col + 1) as f32 / 2.0 * cs;
        let cz = (b.min_row + b.max_row + 1) as f32 / 2.0 * cs;
        Footprint { center: Vec3::new(cx, 0.0, cz), width, depth }
    }

    pub fn plan<R: Renderer + ?Sized>(&mut self, bounds: BoundingBox, renderer: &R) -> PlacementCommand {
        let fp = self.footprint(bounds);
        let idx = self.picker.pick(&self.assets).min(self.assets.len() - 1);
        let asset = self.assets[idx].clone();
        let scale = match renderer.native_size(&asset) {
            Some((nw, nd)) if nw > 0.0 && nd > 0.0 => Vec3::new(fp.width / nw, 1.0, fp.depth / nd),
            _ => {
                tracing::debug!(asset = %asset, "no native size; scaling by cell size");
                Vec3::new(fp.width / self.cell_size, 1.0, fp.depth / self.cell_size)
            }
        };
        PlacementCommand { asset, center: fp.center, width: fp.width, depth: fp.depth, scale }
    }
}
