#![forbid(unsafe_code)]
//! map_collapse: constrained tile-map generation with connectivity analysis
//! and placement sampling.
//!
//! Modules:
//! - tileset: tile catalog, adjacency rules, and the terrain tile set builder
//! - wave: candidate-set generator with propagation and bounded retries
//! - connectivity: traversability graph, components, playable area
//! - placement: distribution-weighted sampling of distinct positions
//! - pipeline: generate -> analyze -> gate -> place in one call
//!
//! For examples and docs, see README and docs.rs.
pub mod connectivity;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod placement;
pub mod tileset;
pub mod wave;

mod rng;

/// Convenient re-exports for common types. Import with `use map_collapse::prelude::*;`.
pub mod prelude {
    pub use crate::connectivity::{analyze, ConnectivityReport, PlayableArea};
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Cell, Direction, Grid};
    pub use crate::pipeline::{
        MapConfig, MapResult, MapRunner, Placements, DEFAULT_PLAYABLE_THRESHOLD,
    };
    pub use crate::placement::{
        sample_positions, CenterWeightedPlacement, PlacementDistribution, UniformPlacement,
    };
    pub use crate::tileset::{
        default_level_weights, AdjacencyRule, Axis, Orientation, Symmetry, TerrainTileSetConfig,
        Tile, TileId, TileSet, DEFAULT_RAMP_WEIGHT,
    };
    pub use crate::wave::{generate, GenerateConfig, Generated, DEFAULT_MAX_ATTEMPTS};
}
