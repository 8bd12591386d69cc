//! One-call orchestration: generate, analyze, gate, place.
//!
//! [`MapRunner`] drives the full pipeline for callers that want a validated
//! map in one step: run the generator (or crop an existing map), analyze
//! connectivity, reject maps whose playable ratio falls below the threshold,
//! and sample object/agent positions from the survivors.
use mint::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::connectivity::{analyze, ConnectivityReport};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::placement::{sample_positions, PlacementDistribution};
use crate::rng::resolve_seed;
use crate::tileset::TileSet;
use crate::wave::{generate, GenerateConfig, DEFAULT_MAX_ATTEMPTS};

/// Minimum playable-area ratio a map must reach to be usable.
pub const DEFAULT_PLAYABLE_THRESHOLD: f32 = 0.2;

/// Configuration for running the map pipeline.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    pub periodic: bool,
    pub max_attempts: u32,
    /// Maps whose playable ratio falls below this are rejected.
    pub playable_threshold: f32,
    pub seed: Option<u64>,
}

impl MapConfig {
    /// Creates a new [`MapConfig`] with the specified dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            periodic: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            playable_threshold: DEFAULT_PLAYABLE_THRESHOLD,
            seed: None,
        }
    }

    pub fn with_periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_playable_threshold(mut self, playable_threshold: f32) -> Self {
        self.playable_threshold = playable_threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.generate_config().validate()?;
        if !(0.0..=1.0).contains(&self.playable_threshold) {
            return Err(Error::InvalidConfig(
                "playable_threshold must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }

    fn generate_config(&self) -> GenerateConfig {
        let mut config = GenerateConfig::new(self.width, self.height)
            .with_periodic(self.periodic)
            .with_max_attempts(self.max_attempts);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// A validated map: the grid, its connectivity report, and the seed that
/// reproduces it.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct MapResult {
    pub grid: Grid,
    pub report: ConnectivityReport,
    pub seed: u64,
}

impl MapResult {
    /// Samples distinct positions for `objects` objects and `agents` agents
    /// in one pass over the playable area.
    pub fn place(
        &self,
        objects: usize,
        agents: usize,
        distribution: &dyn PlacementDistribution,
        rng: &mut dyn Rng,
    ) -> Result<Placements> {
        let mut positions = sample_positions(
            &self.report.playable,
            objects + agents,
            distribution,
            rng,
        )?;
        let agent_positions = positions.split_off(objects);
        Ok(Placements {
            objects: positions,
            agents: agent_positions,
        })
    }
}

/// Object and agent coordinates sampled from one map.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct Placements {
    pub objects: Vec<Vector2<u32>>,
    pub agents: Vec<Vector2<u32>>,
}

/// Runs the generate-analyze-gate pipeline for one tile set.
pub struct MapRunner<'a> {
    /// Pipeline configuration applied to this runner.
    pub config: MapConfig,
    /// Tile catalog and adjacency rules used by the generator.
    pub tiles: &'a TileSet,
}

impl<'a> MapRunner<'a> {
    pub fn try_new(config: MapConfig, tiles: &'a TileSet) -> Result<Self> {
        config.validate()?;
        tiles.validate()?;
        Ok(Self { config, tiles })
    }

    /// Generates a fresh map and gates it on the playable threshold.
    pub fn run(&self) -> Result<MapResult> {
        let generated = generate(&self.config.generate_config(), self.tiles)?;
        self.finish(generated.grid, generated.seed)
    }

    /// Crops a window out of an existing map instead of generating, then
    /// analyzes and gates it the same way. The window wraps across the
    /// source edges when the runner is periodic.
    pub fn run_from_sample(&self, source: &Grid) -> Result<MapResult> {
        let seed = resolve_seed(self.config.seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = source.crop_sample(
            self.config.width,
            self.config.height,
            self.config.periodic,
            &mut rng,
        )?;
        self.finish(grid, seed)
    }

    fn finish(&self, grid: Grid, seed: u64) -> Result<MapResult> {
        let report = analyze(&grid);
        let ratio = report.playable.ratio;
        let threshold = self.config.playable_threshold;
        if ratio < threshold {
            warn!("Playable ratio {ratio:.3} below threshold {threshold:.3}; rejecting map.");
            return Err(Error::InsufficientPlayableArea { ratio, threshold });
        }

        info!(
            "Map ready: {} playable cells of {} (ratio {ratio:.3}).",
            report.playable.len(),
            grid.len()
        );
        Ok(MapResult { grid, report, seed })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::grid::Cell;
    use crate::placement::UniformPlacement;
    use crate::tileset::terrain::TerrainTileSetConfig;

    fn split_grid() -> Grid {
        // Column 0 at level 0, the rest at level 2: ratio 0.75.
        let cells = (0..4)
            .flat_map(|_| {
                (0..4).map(|x| if x == 0 { Cell::flat(0) } else { Cell::flat(2) })
            })
            .collect();
        Grid::new(4, 4, cells).unwrap()
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let tiles = TerrainTileSetConfig::new(1).build().unwrap();
        let config = MapConfig::new(4, 4).with_playable_threshold(1.5);
        assert!(matches!(
            MapRunner::try_new(config, &tiles),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn run_produces_a_gated_map() {
        let tiles = TerrainTileSetConfig::new(1).build().unwrap();
        let config = MapConfig::new(6, 6).with_seed(11);
        let runner = MapRunner::try_new(config, &tiles).unwrap();
        let result = runner.run().unwrap();
        assert_eq!(result.grid.len(), 36);
        assert!((result.report.playable.ratio - 1.0).abs() < f32::EPSILON);
        assert_eq!(result.seed, 11);
    }

    #[test]
    fn threshold_gate_rejects_fragmented_maps() {
        let tiles = TerrainTileSetConfig::new(1).build().unwrap();
        let config = MapConfig::new(4, 4)
            .with_seed(2)
            .with_playable_threshold(0.9);
        let runner = MapRunner::try_new(config, &tiles).unwrap();
        let result = runner.run_from_sample(&split_grid());
        assert!(matches!(
            result,
            Err(Error::InsufficientPlayableArea { .. })
        ));
    }

    #[test]
    fn run_from_sample_crops_the_source() {
        let tiles = TerrainTileSetConfig::new(1).build().unwrap();
        let config = MapConfig::new(2, 2).with_seed(4);
        let runner = MapRunner::try_new(config, &tiles).unwrap();
        let result = runner.run_from_sample(&split_grid()).unwrap();
        assert_eq!(result.grid.len(), 4);

        let again = runner.run_from_sample(&split_grid()).unwrap();
        assert_eq!(result.grid, again.grid);
    }

    #[test]
    fn place_splits_objects_and_agents() {
        let tiles = TerrainTileSetConfig::new(1).build().unwrap();
        let config = MapConfig::new(5, 5).with_seed(9);
        let runner = MapRunner::try_new(config, &tiles).unwrap();
        let result = runner.run().unwrap();

        let mut rng = StdRng::seed_from_u64(21);
        let placements = result.place(4, 2, &UniformPlacement, &mut rng).unwrap();
        assert_eq!(placements.objects.len(), 4);
        assert_eq!(placements.agents.len(), 2);

        let mut all: Vec<_> = placements
            .objects
            .iter()
            .chain(&placements.agents)
            .map(|p| (p.x, p.y))
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 6);
    }

    #[test]
    fn place_surfaces_insufficient_area() {
        let tiles = TerrainTileSetConfig::new(1).build().unwrap();
        let config = MapConfig::new(3, 1).with_seed(1);
        let runner = MapRunner::try_new(config, &tiles).unwrap();
        let result = runner.run().unwrap();

        let mut rng = StdRng::seed_from_u64(2);
        let placement = result.place(5, 0, &UniformPlacement, &mut rng);
        assert!(matches!(
            placement,
            Err(Error::InsufficientArea {
                requested: 5,
                available: 3
            })
        ));
    }
}
