//! Tile catalog and adjacency rules consumed by the generator.
//!
//! A [`TileSet`] owns immutable [`Tile`] definitions plus the
//! [`AdjacencyRule`] table stating which tiles may sit next to which, per
//! axis. Rules are directed (orientation matters) and registered so that a
//! placement can be checked from either side of a pair via [`TileSet::allows`].
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::Direction;

pub mod terrain;

pub use terrain::{default_level_weights, TerrainTileSetConfig, DEFAULT_RAMP_WEIGHT};

/// Index of a tile within its [`TileSet`].
pub type TileId = usize;

/// Orientation of a tile: flat, or a ramp ascending toward one compass
/// direction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Flat,
    Ramp(Direction),
}

impl Orientation {
    pub fn is_flat(self) -> bool {
        matches!(self, Orientation::Flat)
    }

    pub fn is_ramp(self) -> bool {
        !self.is_flat()
    }

    /// Direction of ascent for ramps, `None` for flat tiles.
    pub fn ascent(self) -> Option<Direction> {
        match self {
            Orientation::Flat => None,
            Orientation::Ramp(direction) => Some(direction),
        }
    }

    /// Numeric code used by the persisted map layout: 0 flat, 1..=4 ramp
    /// north/east/south/west.
    pub fn code(self) -> u32 {
        match self {
            Orientation::Flat => 0,
            Orientation::Ramp(Direction::North) => 1,
            Orientation::Ramp(Direction::East) => 2,
            Orientation::Ramp(Direction::South) => 3,
            Orientation::Ramp(Direction::West) => 4,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Orientation::Flat),
            1 => Some(Orientation::Ramp(Direction::North)),
            2 => Some(Orientation::Ramp(Direction::East)),
            3 => Some(Orientation::Ramp(Direction::South)),
            4 => Some(Orientation::Ramp(Direction::West)),
            _ => None,
        }
    }

    /// Quarter-turn clockwise; flat tiles are rotation-invariant.
    pub fn rotated_cw(self) -> Self {
        match self {
            Orientation::Flat => Orientation::Flat,
            Orientation::Ramp(direction) => Orientation::Ramp(direction.rotated_cw()),
        }
    }
}

/// Symmetry class of a tile under rotation, shrinking the number of distinct
/// rotated variants that exist.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// Invariant under every rotation (one variant).
    Full,
    /// Invariant under half-turns (two variants).
    Line,
    /// Reflection symmetry only (four variants).
    Corner,
    /// No symmetry (four variants).
    Asymmetric,
}

impl Symmetry {
    /// Number of distinct rotated variants of a tile in this class.
    pub fn distinct_orientations(self) -> usize {
        match self {
            Symmetry::Full => 1,
            Symmetry::Line => 2,
            Symmetry::Corner | Symmetry::Asymmetric => 4,
        }
    }
}

/// An immutable tile definition.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Tile {
    pub name: String,
    pub height: u32,
    pub orientation: Orientation,
    pub symmetry: Symmetry,
    /// Relative sampling likelihood; must be positive and finite.
    pub weight: f32,
}

impl Tile {
    pub fn new(
        name: impl Into<String>,
        height: u32,
        orientation: Orientation,
        symmetry: Symmetry,
        weight: f32,
    ) -> Self {
        Self {
            name: name.into(),
            height,
            orientation,
            symmetry,
            weight,
        }
    }

    /// A flat tile at `height`.
    pub fn flat(name: impl Into<String>, height: u32, weight: f32) -> Self {
        Self::new(name, height, Orientation::Flat, Symmetry::Full, weight)
    }

    /// A ramp at `height`, ascending toward `ascent` onto `height + 1`.
    pub fn ramp(name: impl Into<String>, height: u32, ascent: Direction, weight: f32) -> Self {
        Self::new(
            name,
            height,
            Orientation::Ramp(ascent),
            Symmetry::Corner,
            weight,
        )
    }

    pub fn is_ramp(&self) -> bool {
        self.orientation.is_ramp()
    }
}

/// Axis along which an [`AdjacencyRule`] applies. The right tile sits on the
/// positive side of the left tile: east for [`Axis::X`], south for [`Axis::Y`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// States that `right` may sit immediately on the positive side of `left`
/// along `axis`. Directed: registering (a, b) does not register (b, a).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdjacencyRule {
    pub left: TileId,
    pub right: TileId,
    pub axis: Axis,
}

impl AdjacencyRule {
    pub fn new(left: TileId, right: TileId, axis: Axis) -> Self {
        Self { left, right, axis }
    }
}

/// Immutable-once-built catalog of tiles plus the adjacency rule table.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct TileSet {
    tiles: Vec<Tile>,
    rules: Vec<AdjacencyRule>,
    allowed: HashSet<(Direction, TileId, TileId)>,
}

impl TileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tile, returning its id. Names must be unique within the set.
    pub fn insert(&mut self, tile: Tile) -> Result<TileId> {
        if self.tiles.iter().any(|existing| existing.name == tile.name) {
            return Err(Error::InvalidConfig(format!(
                "duplicate tile name '{}'",
                tile.name
            )));
        }
        self.tiles.push(tile);
        Ok(self.tiles.len() - 1)
    }

    /// Adds every distinct rotated variant of `prototype`, clockwise from its
    /// own orientation, suffixing names with the ascent direction. Returns the
    /// new ids in rotation order.
    pub fn insert_rotations(&mut self, prototype: Tile) -> Result<Vec<TileId>> {
        let count = prototype.symmetry.distinct_orientations();
        if count == 1 {
            return Ok(vec![self.insert(prototype)?]);
        }
        let Some(mut ascent) = prototype.orientation.ascent() else {
            return Err(Error::InvalidConfig(format!(
                "tile '{}' has multiple rotations but no ascent direction",
                prototype.name
            )));
        };

        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let suffix = match ascent {
                Direction::North => 'n',
                Direction::East => 'e',
                Direction::South => 's',
                Direction::West => 'w',
            };
            let mut variant = prototype.clone();
            variant.name = format!("{}_{suffix}", prototype.name);
            variant.orientation = Orientation::Ramp(ascent);
            ids.push(self.insert(variant)?);
            ascent = ascent.rotated_cw();
        }
        Ok(ids)
    }

    /// Registers a rule, making the pair placeable from either side.
    pub fn add_rule(&mut self, rule: AdjacencyRule) -> Result<()> {
        let count = self.tiles.len();
        if rule.left >= count || rule.right >= count {
            return Err(Error::InvalidConfig(format!(
                "rule references tile id out of range ({} tiles)",
                count
            )));
        }
        let (forward, backward) = match rule.axis {
            Axis::X => (Direction::East, Direction::West),
            Axis::Y => (Direction::South, Direction::North),
        };
        self.allowed.insert((forward, rule.left, rule.right));
        self.allowed.insert((backward, rule.right, rule.left));
        self.rules.push(rule);
        Ok(())
    }

    /// Whether `neighbor` may sit in `direction` from `tile`.
    pub fn allows(&self, direction: Direction, tile: TileId, neighbor: TileId) -> bool {
        self.allowed.contains(&(direction, tile, neighbor))
    }

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id]
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn rules(&self) -> &[AdjacencyRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// First tile matching a materialized cell's height and orientation.
    pub fn tile_matching(&self, height: u32, orientation: Orientation) -> Option<TileId> {
        self.tiles
            .iter()
            .position(|tile| tile.height == height && tile.orientation == orientation)
    }

    /// Rejects sets the generator cannot sample from: no tiles, or
    /// non-positive / non-finite weights.
    pub fn validate(&self) -> Result<()> {
        if self.tiles.is_empty() {
            return Err(Error::InvalidConfig("tile set is empty".into()));
        }
        for tile in &self.tiles {
            if !tile.weight.is_finite() || tile.weight <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "tile '{}' has invalid weight {}",
                    tile.name, tile.weight
                )));
            }
        }
        Ok(())
    }
}
