//! Center-weighted placement distribution.
use glam::{UVec2, Vec2};
use mint::Vector2;

use crate::placement::PlacementDistribution;

/// Favors cells near the grid center; weight falls off toward the boundary
/// as `(1 - d)^sharpness` with `d` the normalized center distance. Boundary
/// cells can reach weight zero and drop out of the candidate pool.
#[derive(Debug, Clone, Copy)]
pub struct CenterWeightedPlacement {
    pub sharpness: f32,
}

impl CenterWeightedPlacement {
    pub fn new(sharpness: f32) -> Self {
        Self { sharpness }
    }
}

impl Default for CenterWeightedPlacement {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PlacementDistribution for CenterWeightedPlacement {
    fn weight(&self, position: Vector2<u32>, dims: Vector2<u32>) -> f32 {
        let dims = UVec2::from(dims).as_vec2();
        let position = UVec2::from(position).as_vec2();
        let center = (dims - Vec2::ONE) * 0.5;
        let half = (dims * 0.5).max(Vec2::ONE);
        let distance = ((position - center) / half).length().min(1.0);
        (1.0 - distance).powf(self.sharpness)
    }
}
