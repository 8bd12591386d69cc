//! Height-level terrain tile set builder.
//!
//! Produces the flat-plus-ramp catalog used for terrain maps: one flat tile
//! per height level, four ramps per level transition (one per compass
//! direction, none out of the topmost level), and the adjacency rules tying
//! them together. Flat tiles of the same height neighbor freely; flats one
//! level apart form non-traversable cliffs; a ramp takes its own level's flat
//! at the base, the next level's flat at the top, and either of those (or a
//! same-direction ramp) laterally. Double ramps chain two transitions when
//! enabled.
use crate::error::{Error, Result};
use crate::grid::Direction;
use crate::tileset::{AdjacencyRule, Axis, Tile, TileId, TileSet};

/// Default weight for every ramp tile, deliberately rarer than flat tiles.
pub const DEFAULT_RAMP_WEIGHT: f32 = 0.2;

/// Default flat-tile weights: exponential decay across height levels, so
/// lower terrain stays more probable. Matches `exp` over a linear ramp from
/// 1.0 to -3.0 spread over at least six levels, truncated to `max_height`.
pub fn default_level_weights(max_height: u32) -> Vec<f32> {
    let span = max_height.max(6);
    let step = 4.0 / (span - 1) as f32;
    (0..max_height)
        .map(|level| (1.0 - step * level as f32).exp())
        .collect()
}

/// Configuration for building a terrain [`TileSet`].
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct TerrainTileSetConfig {
    /// Number of height levels; must be at least 1.
    pub max_height: u32,
    /// Per-level flat-tile weights; defaults to [`default_level_weights`].
    pub weights: Option<Vec<f32>>,
    /// Weight shared by every ramp tile.
    pub ramp_weight: f32,
    /// Allow a ramp to chain directly into the next level's ramp of the same
    /// direction, spanning two height levels.
    pub double_ramp: bool,
}

impl TerrainTileSetConfig {
    pub fn new(max_height: u32) -> Self {
        Self {
            max_height,
            weights: None,
            ramp_weight: DEFAULT_RAMP_WEIGHT,
            double_ramp: false,
        }
    }

    pub fn with_weights(mut self, weights: Vec<f32>) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_ramp_weight(mut self, ramp_weight: f32) -> Self {
        self.ramp_weight = ramp_weight;
        self
    }

    pub fn with_double_ramp(mut self, double_ramp: bool) -> Self {
        self.double_ramp = double_ramp;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_height == 0 {
            return Err(Error::InvalidConfig("max_height must be > 0".into()));
        }
        if let Some(weights) = &self.weights {
            if weights.len() != self.max_height as usize {
                return Err(Error::InvalidConfig(format!(
                    "expected {} weights, got {}",
                    self.max_height,
                    weights.len()
                )));
            }
            if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
                return Err(Error::InvalidConfig(
                    "level weights must be positive and finite".into(),
                ));
            }
        }
        if !self.ramp_weight.is_finite() || self.ramp_weight <= 0.0 {
            return Err(Error::InvalidConfig(
                "ramp_weight must be positive and finite".into(),
            ));
        }
        Ok(())
    }

    /// Builds the tile catalog and adjacency rules.
    pub fn build(&self) -> Result<TileSet> {
        self.validate()?;
        let weights = match &self.weights {
            Some(weights) => weights.clone(),
            None => default_level_weights(self.max_height),
        };

        let mut set = TileSet::new();
        let levels = self.max_height as usize;

        let mut flats = Vec::with_capacity(levels);
        for (level, &weight) in weights.iter().enumerate() {
            flats.push(set.insert(Tile::flat(format!("flat_{level}"), level as u32, weight))?);
        }

        // ramps[h] holds the four ascent variants out of level h, in
        // Direction::ALL order; the topmost level has no ramps out of it.
        let mut ramps: Vec<Vec<TileId>> = Vec::new();
        for level in 0..levels.saturating_sub(1) {
            ramps.push(set.insert_rotations(Tile::ramp(
                format!("ramp_{level}"),
                level as u32,
                Direction::North,
                self.ramp_weight,
            ))?);
        }

        for level in 0..levels {
            let flat = flats[level];
            set.add_rule(AdjacencyRule::new(flat, flat, Axis::X))?;
            set.add_rule(AdjacencyRule::new(flat, flat, Axis::Y))?;

            // One-level cliffs, both orders on both axes.
            if level + 1 < levels {
                let upper = flats[level + 1];
                for axis in [Axis::X, Axis::Y] {
                    set.add_rule(AdjacencyRule::new(flat, upper, axis))?;
                    set.add_rule(AdjacencyRule::new(upper, flat, axis))?;
                }
            }
        }

        for (level, level_ramps) in ramps.iter().enumerate() {
            let base = flats[level];
            let top = flats[level + 1];
            for (slot, (&ramp, ascent)) in level_ramps.iter().zip(Direction::ALL).enumerate() {
                rule_toward(&mut set, ramp, ascent.opposite(), base)?;
                rule_toward(&mut set, ramp, ascent, top)?;

                for lateral in [ascent.rotated_cw(), ascent.rotated_cw().opposite()] {
                    rule_toward(&mut set, ramp, lateral, base)?;
                    rule_toward(&mut set, ramp, lateral, top)?;
                    rule_toward(&mut set, ramp, lateral, ramp)?;
                }

                if self.double_ramp && level + 1 < ramps.len() {
                    rule_toward(&mut set, ramp, ascent, ramps[level + 1][slot])?;
                }
            }
        }

        Ok(set)
    }
}

/// Registers that `neighbor` may sit in `direction` from `tile`.
fn rule_toward(
    set: &mut TileSet,
    tile: TileId,
    direction: Direction,
    neighbor: TileId,
) -> Result<()> {
    let rule = match direction {
        Direction::East => AdjacencyRule::new(tile, neighbor, Axis::X),
        Direction::West => AdjacencyRule::new(neighbor, tile, Axis::X),
        Direction::South => AdjacencyRule::new(tile, neighbor, Axis::Y),
        Direction::North => AdjacencyRule::new(neighbor, tile, Axis::Y),
    };
    set.add_rule(rule)
}
