//! Uniform placement distribution.
use mint::Vector2;

use crate::placement::PlacementDistribution;

/// Equal probability for every playable cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPlacement;

impl PlacementDistribution for UniformPlacement {
    fn weight(&self, _position: Vector2<u32>, _dims: Vector2<u32>) -> f32 {
        1.0
    }
}
