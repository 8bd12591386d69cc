//! Grid value types for materialized maps.
//!
//! A [`Grid`] is a width x height, row-major array of [`Cell`]s, each holding a
//! height level and an [`Orientation`]. Coordinates grow east (+x) and south
//! (+y); row 0 is the northern edge. Grids come out of the generator, out of
//! [`Grid::from_layers`] for maps persisted by an outer layer, or out of
//! [`Grid::crop_sample`] when re-sampling an existing map.
use glam::UVec2;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rng::rand01;
use crate::tileset::Orientation;

/// A side-adjacency direction on the grid. North is toward row 0.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Cell offset of this direction as (dx, dy).
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Quarter-turn clockwise.
    pub fn rotated_cw(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

/// One grid cell: a height level plus the tile orientation occupying it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub height: u32,
    pub orientation: Orientation,
}

impl Cell {
    pub fn flat(height: u32) -> Self {
        Self {
            height,
            orientation: Orientation::Flat,
        }
    }

    /// A ramp cell at `height`, ascending toward `ascent`.
    pub fn ramp(height: u32, ascent: Direction) -> Self {
        Self {
            height,
            orientation: Orientation::Ramp(ascent),
        }
    }

    pub fn is_flat(&self) -> bool {
        self.orientation.is_flat()
    }
}

/// A materialized width x height map.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from row-major cells. The cell count must match the
    /// dimensions.
    pub fn new(width: u32, height: u32, cells: Vec<Cell>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(
                "grid dimensions must be > 0".into(),
            ));
        }
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(Error::InvalidConfig(format!(
                "expected {expected} cells for a {width}x{height} grid, got {}",
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid from the persisted benchmark-map layout: one
    /// `[height, orientation]` pair per cell in row-major order, with
    /// orientation codes 0 (flat) and 1..=4 (ramp north/east/south/west).
    pub fn from_layers(width: u32, height: u32, layers: &[[u32; 2]]) -> Result<Self> {
        let cells = layers
            .iter()
            .map(|&[level, code]| {
                let orientation = Orientation::from_code(code).ok_or_else(|| {
                    Error::InvalidConfig(format!("invalid orientation code {code}"))
                })?;
                Ok(Cell {
                    height: level,
                    orientation,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(width, height, cells)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Grid dimensions as (width, height).
    pub fn dims(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Total cell count.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index for a coordinate.
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Coordinate for a flat index.
    pub fn coords(&self, index: usize) -> UVec2 {
        UVec2::new(
            (index % self.width as usize) as u32,
            (index / self.width as usize) as u32,
        )
    }

    pub fn get(&self, x: u32, y: u32) -> Cell {
        self.cells[self.index(x, y)]
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The side-adjacent coordinate in `direction`, wrapping across edges when
    /// `periodic` is set, `None` when it would leave a bounded grid.
    pub fn neighbor(
        &self,
        x: u32,
        y: u32,
        direction: Direction,
        periodic: bool,
    ) -> Option<(u32, u32)> {
        let (dx, dy) = direction.offset();
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if periodic {
            Some((
                nx.rem_euclid(self.width as i64) as u32,
                ny.rem_euclid(self.height as i64) as u32,
            ))
        } else if nx >= 0 && nx < self.width as i64 && ny >= 0 && ny < self.height as i64 {
            Some((nx as u32, ny as u32))
        } else {
            None
        }
    }

    /// Cuts a `width` x `height` window out of this grid at a random offset,
    /// the "sample from an existing map" mode. With `wrap` the window may
    /// cross the source edges (modular indexing); without it the target must
    /// fit inside the source.
    pub fn crop_sample(
        &self,
        width: u32,
        height: u32,
        wrap: bool,
        rng: &mut dyn Rng,
    ) -> Result<Grid> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(
                "crop dimensions must be > 0".into(),
            ));
        }
        if !wrap && (width > self.width || height > self.height) {
            return Err(Error::InvalidConfig(format!(
                "crop {width}x{height} exceeds source {}x{}",
                self.width, self.height
            )));
        }

        let range_x = if wrap { self.width } else { self.width - width + 1 };
        let range_y = if wrap {
            self.height
        } else {
            self.height - height + 1
        };
        let off_x = ((rand01(rng) * range_x as f32) as u32).min(range_x - 1);
        let off_y = ((rand01(rng) * range_y as f32) as u32).min(range_y - 1);

        let mut cells = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                let sx = (off_x + x) % self.width;
                let sy = (off_y + y) % self.height;
                cells.push(self.get(sx, sy));
            }
        }
        Grid::new(width, height, cells)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn checkerboard(width: u32, height: u32) -> Grid {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::flat((x + y) % 2)))
            .collect();
        Grid::new(width, height, cells).unwrap()
    }

    #[test]
    fn index_coords_roundtrip() {
        let grid = checkerboard(5, 3);
        for i in 0..grid.len() {
            let pos = grid.coords(i);
            assert_eq!(grid.index(pos.x, pos.y), i);
        }
    }

    #[test]
    fn new_rejects_mismatched_cell_count() {
        let result = Grid::new(2, 2, vec![Cell::flat(0); 3]);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            Grid::new(0, 2, Vec::new()),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn from_layers_decodes_orientation_codes() {
        let grid = Grid::from_layers(2, 1, &[[3, 0], [1, 2]]).unwrap();
        assert_eq!(grid.get(0, 0), Cell::flat(3));
        assert_eq!(grid.get(1, 0), Cell::ramp(1, Direction::East));
    }

    #[test]
    fn from_layers_rejects_unknown_orientation_code() {
        let result = Grid::from_layers(1, 1, &[[0, 9]]);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn bounded_neighbors_stop_at_edges() {
        let grid = checkerboard(3, 3);
        assert_eq!(grid.neighbor(0, 0, Direction::North, false), None);
        assert_eq!(grid.neighbor(0, 0, Direction::West, false), None);
        assert_eq!(grid.neighbor(0, 0, Direction::East, false), Some((1, 0)));
        assert_eq!(grid.neighbor(0, 0, Direction::South, false), Some((0, 1)));
    }

    #[test]
    fn periodic_neighbors_wrap() {
        let grid = checkerboard(3, 3);
        assert_eq!(grid.neighbor(0, 0, Direction::North, true), Some((0, 2)));
        assert_eq!(grid.neighbor(2, 1, Direction::East, true), Some((0, 1)));
    }

    #[test]
    fn crop_sample_is_a_window_of_the_source() {
        let source = checkerboard(6, 6);
        let mut rng = StdRng::seed_from_u64(9);
        let crop = source.crop_sample(3, 3, false, &mut rng).unwrap();
        assert_eq!(crop.dims(), UVec2::new(3, 3));

        let mut found = false;
        'outer: for off_y in 0..4 {
            for off_x in 0..4 {
                let matches = (0..3).all(|y| {
                    (0..3).all(|x| crop.get(x, y) == source.get(off_x + x, off_y + y))
                });
                if matches {
                    found = true;
                    break 'outer;
                }
            }
        }
        assert!(found, "crop does not match any source window");
    }

    #[test]
    fn crop_sample_is_deterministic_per_seed() {
        let source = checkerboard(8, 8);
        let mut rng_a = StdRng::seed_from_u64(11);
        let mut rng_b = StdRng::seed_from_u64(11);
        let a = source.crop_sample(4, 4, false, &mut rng_a).unwrap();
        let b = source.crop_sample(4, 4, false, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn crop_sample_rejects_oversized_target_without_wrap() {
        let source = checkerboard(4, 4);
        let mut rng = StdRng::seed_from_u64(1);
        let result = source.crop_sample(6, 6, false, &mut rng);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn crop_sample_wraps_when_requested() {
        let source = checkerboard(4, 4);
        let mut rng = StdRng::seed_from_u64(1);
        let crop = source.crop_sample(6, 6, true, &mut rng).unwrap();
        assert_eq!(crop.len(), 36);
        // Wrapped windows preserve the checkerboard parity structure.
        for y in 0..6 {
            for x in 0..5 {
                assert_ne!(crop.get(x, y).height, crop.get(x + 1, y).height);
            }
        }
    }
}
