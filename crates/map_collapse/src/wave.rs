//! Constrained grid generation over a tile set.
//!
//! Keeps a per-cell set of tile candidates, repeatedly collapses the cell
//! with the fewest candidates to a weighted-random choice, and propagates the
//! restriction to neighbors until the grid is fully decided or a cell runs
//! out of candidates. Contradictions discard the partial grid and retry with
//! fresh randomness, up to a bound; a grid is only ever returned when every
//! side-adjacent pair satisfies a registered adjacency rule.
use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::grid::{Cell, Direction, Grid};
use crate::rng::{rand01, resolve_seed, seed_for_attempt};
use crate::tileset::{TileId, TileSet};

/// Default bound on generation attempts before reporting failure.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Configuration for generating a grid.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub width: u32,
    pub height: u32,
    /// Wrap edges so opposite borders must also satisfy adjacency rules.
    pub periodic: bool,
    pub max_attempts: u32,
    /// Seed for the attempt streams; drawn from entropy (and reported in the
    /// result) when absent.
    pub seed: Option<u64>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            periodic: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl GenerateConfig {
    /// Creates a new [`GenerateConfig`] with the specified dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
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

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(
                "grid dimensions must be > 0".into(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be > 0".into()));
        }
        Ok(())
    }
}

/// A successfully generated grid plus the reproducibility data for the run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct Generated {
    pub grid: Grid,
    /// Base seed of the run; echoes the configured seed or reports the
    /// entropy-drawn one.
    pub seed: u64,
    /// 1-based attempt that succeeded.
    pub attempts: u32,
}

/// Generates a grid satisfying every adjacency rule of `tiles`, retrying on
/// contradiction up to the configured bound.
pub fn generate(config: &GenerateConfig, tiles: &TileSet) -> Result<Generated> {
    config.validate()?;
    tiles.validate()?;

    let seed = resolve_seed(config.seed);
    let mut wave = Wave::new(config, tiles);

    for attempt in 1..=config.max_attempts {
        let mut rng = StdRng::seed_from_u64(seed_for_attempt(seed, attempt));
        match wave.collapse(&mut rng) {
            Some(assignment) => {
                info!(
                    "Generated {}x{} grid on attempt {attempt} (seed {seed}).",
                    config.width, config.height
                );
                let grid = materialize(config, tiles, &assignment)?;
                return Ok(Generated {
                    grid,
                    seed,
                    attempts: attempt,
                });
            }
            None => {
                debug!("Attempt {attempt} hit a contradiction; retrying.");
                wave.reset();
            }
        }
    }

    Err(Error::Generation {
        attempts: config.max_attempts,
    })
}

fn materialize(config: &GenerateConfig, tiles: &TileSet, assignment: &[TileId]) -> Result<Grid> {
    let cells = assignment
        .iter()
        .map(|&id| {
            let tile = tiles.tile(id);
            Cell {
                height: tile.height,
                orientation: tile.orientation,
            }
        })
        .collect();
    Grid::new(config.width, config.height, cells)
}

/// Candidate-set state for one generation attempt.
struct Wave {
    width: usize,
    height: usize,
    periodic: bool,
    tile_count: usize,
    weights: Vec<f32>,
    /// Dense rule table: `compat[(dir * n + tile) * n + neighbor]`.
    compat: Vec<bool>,
    /// `possible[cell * n + tile]`.
    possible: Vec<bool>,
    remaining: Vec<u32>,
}

impl Wave {
    fn new(config: &GenerateConfig, tiles: &TileSet) -> Self {
        let tile_count = tiles.len();
        let cell_count = (config.width as usize) * (config.height as usize);

        let mut compat = vec![false; 4 * tile_count * tile_count];
        for direction in Direction::ALL {
            for tile in 0..tile_count {
                for neighbor in 0..tile_count {
                    if tiles.allows(direction, tile, neighbor) {
                        compat[(direction.index() * tile_count + tile) * tile_count + neighbor] =
                            true;
                    }
                }
            }
        }

        Self {
            width: config.width as usize,
            height: config.height as usize,
            periodic: config.periodic,
            tile_count,
            weights: tiles.tiles().iter().map(|tile| tile.weight).collect(),
            compat,
            possible: vec![true; cell_count * tile_count],
            remaining: vec![tile_count as u32; cell_count],
        }
    }

    fn reset(&mut self) {
        self.possible.fill(true);
        self.remaining.fill(self.tile_count as u32);
    }

    /// Runs one attempt to a full assignment; `None` on contradiction.
    fn collapse(&mut self, rng: &mut dyn Rng) -> Option<Vec<TileId>> {
        // Establish arc consistency before the first choice so tiles with no
        // usable neighbors are culled up front.
        let mut queue: VecDeque<usize> = (0..self.remaining.len()).collect();
        if !self.propagate(&mut queue) {
            return None;
        }

        let mut tied = Vec::new();
        loop {
            let Some(cell) = self.pick_cell(&mut tied, rng) else {
                break;
            };
            let tile = self.pick_tile(cell, rng)?;

            for candidate in 0..self.tile_count {
                self.possible[cell * self.tile_count + candidate] = candidate == tile;
            }
            self.remaining[cell] = 1;

            queue.clear();
            queue.push_back(cell);
            if !self.propagate(&mut queue) {
                return None;
            }
        }

        Some(
            (0..self.remaining.len())
                .map(|cell| {
                    (0..self.tile_count)
                        .find(|&tile| self.possible[cell * self.tile_count + tile])
                        .unwrap_or(0)
                })
                .collect(),
        )
    }

    /// The undecided cell with the fewest candidates, ties broken by a
    /// seeded uniform draw. `None` once every cell is decided.
    fn pick_cell(&self, tied: &mut Vec<usize>, rng: &mut dyn Rng) -> Option<usize> {
        let mut best = u32::MAX;
        tied.clear();
        for (cell, &count) in self.remaining.iter().enumerate() {
            if count <= 1 {
                continue;
            }
            if count < best {
                best = count;
                tied.clear();
            }
            if count == best {
                tied.push(cell);
            }
        }
        if tied.is_empty() {
            return None;
        }
        let roll = (rand01(rng) * tied.len() as f32) as usize;
        Some(tied[roll.min(tied.len() - 1)])
    }

    /// Weighted-random candidate for `cell`, proportional to tile weight
    /// among the remaining candidates.
    fn pick_tile(&self, cell: usize, rng: &mut dyn Rng) -> Option<TileId> {
        let base = cell * self.tile_count;
        let total: f32 = (0..self.tile_count)
            .filter(|&tile| self.possible[base + tile])
            .map(|tile| self.weights[tile])
            .sum();
        if total <= 0.0 {
            return None;
        }

        let mut roll = rand01(rng) * total;
        let mut last = None;
        for tile in 0..self.tile_count {
            if !self.possible[base + tile] {
                continue;
            }
            last = Some(tile);
            roll -= self.weights[tile];
            if roll <= 0.0 {
                return Some(tile);
            }
        }
        last
    }

    /// Removes unsupported candidates outward from the queued cells until
    /// stable. Returns false when some cell ends up with no candidates.
    fn propagate(&mut self, queue: &mut VecDeque<usize>) -> bool {
        while let Some(cell) = queue.pop_front() {
            let (x, y) = (cell % self.width, cell / self.width);
            for direction in Direction::ALL {
                let Some(neighbor) = self.neighbor_index(x, y, direction) else {
                    continue;
                };
                let mut shrunk = false;
                for tile in 0..self.tile_count {
                    if !self.possible[neighbor * self.tile_count + tile] {
                        continue;
                    }
                    if !self.supported(cell, direction, tile) {
                        self.possible[neighbor * self.tile_count + tile] = false;
                        self.remaining[neighbor] -= 1;
                        shrunk = true;
                    }
                }
                if shrunk {
                    if self.remaining[neighbor] == 0 {
                        return false;
                    }
                    queue.push_back(neighbor);
                }
            }
        }
        true
    }

    /// Whether any candidate of `cell` allows `tile` in `direction`.
    fn supported(&self, cell: usize, direction: Direction, tile: TileId) -> bool {
        let base = cell * self.tile_count;
        let row = direction.index() * self.tile_count;
        (0..self.tile_count).any(|candidate| {
            self.possible[base + candidate]
                && self.compat[(row + candidate) * self.tile_count + tile]
        })
    }

    fn neighbor_index(&self, x: usize, y: usize, direction: Direction) -> Option<usize> {
        let (dx, dy) = direction.offset();
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if self.periodic {
            let nx = nx.rem_euclid(self.width as i64) as usize;
            let ny = ny.rem_euclid(self.height as i64) as usize;
            Some(ny * self.width + nx)
        } else if nx >= 0 && nx < self.width as i64 && ny >= 0 && ny < self.height as i64 {
            Some((ny as usize) * self.width + nx as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::{terrain::TerrainTileSetConfig, Tile};

    /// Asserts the no-violation invariant: every side-adjacent pair (plus
    /// wraparound pairs for periodic grids) satisfies a registered rule.
    fn assert_no_violations(grid: &Grid, tiles: &TileSet, periodic: bool) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let cell = grid.get(x, y);
                let id = tiles
                    .tile_matching(cell.height, cell.orientation)
                    .expect("cell matches a tile");
                for direction in [Direction::East, Direction::South] {
                    let Some((nx, ny)) = grid.neighbor(x, y, direction, periodic) else {
                        continue;
                    };
                    let other = grid.get(nx, ny);
                    let other_id = tiles
                        .tile_matching(other.height, other.orientation)
                        .expect("neighbor matches a tile");
                    assert!(
                        tiles.allows(direction, id, other_id),
                        "rule violated at ({x},{y}) toward {direction:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn rejects_zero_dimensions() {
        let tiles = TerrainTileSetConfig::new(1).build().unwrap();
        let result = generate(&GenerateConfig::new(0, 4), &tiles);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_empty_tile_set() {
        let result = generate(&GenerateConfig::new(4, 4).with_seed(1), &TileSet::new());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn single_tile_fills_the_grid() {
        let tiles = TerrainTileSetConfig::new(1).build().unwrap();
        let config = GenerateConfig::new(5, 3).with_seed(7);
        let generated = generate(&config, &tiles).unwrap();
        assert_eq!(generated.grid.len(), 15);
        assert!(generated.grid.cells().iter().all(|c| *c == Cell::flat(0)));
        assert_eq!(generated.seed, 7);
    }

    #[test]
    fn generated_grids_satisfy_all_rules() {
        let tiles = TerrainTileSetConfig::new(2).build().unwrap();
        let config = GenerateConfig::new(8, 8).with_seed(42).with_max_attempts(20);
        let generated = generate(&config, &tiles).unwrap();
        assert_no_violations(&generated.grid, &tiles, false);
    }

    #[test]
    fn periodic_grids_satisfy_wraparound_rules() {
        let tiles = TerrainTileSetConfig::new(2).build().unwrap();
        let config = GenerateConfig::new(6, 6)
            .with_seed(3)
            .with_periodic(true)
            .with_max_attempts(20);
        let generated = generate(&config, &tiles).unwrap();
        assert_no_violations(&generated.grid, &tiles, true);
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let tiles = TerrainTileSetConfig::new(3).build().unwrap();
        let config = GenerateConfig::new(8, 8).with_seed(42).with_max_attempts(20);
        let a = generate(&config, &tiles).unwrap();
        let b = generate(&config, &tiles).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.attempts, b.attempts);
    }

    #[test]
    fn missing_seed_is_reported() {
        let tiles = TerrainTileSetConfig::new(1).build().unwrap();
        let config = GenerateConfig::new(3, 3);
        let generated = generate(&config, &tiles).unwrap();
        let replay = generate(
            &GenerateConfig::new(3, 3).with_seed(generated.seed),
            &tiles,
        )
        .unwrap();
        assert_eq!(generated.grid, replay.grid);
    }

    #[test]
    fn unsatisfiable_rules_exhaust_attempts() {
        // Two flat tiles with no registered neighbor rule at all: any choice
        // wipes out every neighbor.
        let mut tiles = TileSet::new();
        tiles.insert(Tile::flat("a", 0, 1.0)).unwrap();
        tiles.insert(Tile::flat("b", 1, 1.0)).unwrap();

        let config = GenerateConfig::new(3, 3).with_seed(5).with_max_attempts(4);
        let result = generate(&config, &tiles);
        assert!(matches!(result, Err(Error::Generation { attempts: 4 })));
    }

    #[test]
    fn lone_cell_needs_no_rules() {
        let mut tiles = TileSet::new();
        tiles.insert(Tile::flat("a", 0, 1.0)).unwrap();
        let config = GenerateConfig::new(1, 1).with_seed(1);
        let generated = generate(&config, &tiles).unwrap();
        assert_eq!(generated.grid.cell(0), Cell::flat(0));
    }
}
