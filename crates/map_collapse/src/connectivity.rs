//! Traversability analysis over a materialized grid.
//!
//! Builds an adjacency structure from side neighbors only (no diagonals):
//! same-height flat pairs connect, a flat cell connects to a same-height ramp
//! whose base faces it, and a ramp connects to the one-level-higher cell its
//! top faces. Connected components treat every discovered edge as enabling
//! mutual reachability. The playable area is the flat subset of the largest
//! component; its ratio gates map usability and bounds placement sampling.
use std::collections::VecDeque;

use glam::UVec2;
use tracing::debug;

use crate::grid::{Direction, Grid};

/// The largest mutually reachable region of a grid, restricted to flat cells
/// for placement purposes.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct PlayableArea {
    pub width: u32,
    pub height: u32,
    /// Flat-index cells of the area, ascending.
    pub cells: Vec<u32>,
    /// Per-cell membership mask, `width * height` entries.
    pub mask: Vec<bool>,
    /// Size of the owning component (ramps included) over total cell count.
    pub ratio: f32,
}

impl PlayableArea {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    /// Coordinates of the playable cells.
    pub fn positions(&self) -> impl Iterator<Item = UVec2> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .map(move |&index| UVec2::new(index % width, index / width))
    }

    fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: Vec::new(),
            mask: vec![false; (width as usize) * (height as usize)],
            ratio: 0.0,
        }
    }
}

/// Result of analyzing a grid: every connected component plus the playable
/// area derived from the largest one.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct ConnectivityReport {
    /// Cell indices per component, in discovery order.
    pub components: Vec<Vec<u32>>,
    pub playable: PlayableArea,
}

/// Analyzes reachability over `grid` and extracts the playable area.
pub fn analyze(grid: &Grid) -> ConnectivityReport {
    let edges = build_edges(grid);
    let components = components(&edges);
    debug!(
        "Connectivity: {} components over {} cells.",
        components.len(),
        grid.len()
    );

    let playable = playable_area(grid, &components);
    ConnectivityReport {
        components,
        playable,
    }
}

/// Adjacency lists keyed by flat cell index.
fn build_edges(grid: &Grid) -> Vec<Vec<u32>> {
    let mut edges: Vec<Vec<u32>> = vec![Vec::new(); grid.len()];
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let index = grid.index(x, y);
            let cell = grid.get(x, y);
            for direction in Direction::ALL {
                let Some((nx, ny)) = grid.neighbor(x, y, direction, false) else {
                    continue;
                };
                let neighbor = grid.get(nx, ny);
                let connected = match (cell.orientation.ascent(), neighbor.orientation.ascent()) {
                    // Flat pairs walk freely on one level; scan east/south
                    // only so each pair is discovered once.
                    (None, None) => {
                        matches!(direction, Direction::East | Direction::South)
                            && cell.height == neighbor.height
                    }
                    // A ramp is entered from the flat its base faces.
                    (None, Some(ascent)) => {
                        ascent == direction && neighbor.height == cell.height
                    }
                    // A ramp exits onto the one-level-higher cell its top
                    // faces.
                    (Some(ascent), _) => {
                        ascent == direction && neighbor.height == cell.height + 1
                    }
                };
                if connected {
                    let neighbor_index = grid.index(nx, ny);
                    edges[index].push(neighbor_index as u32);
                    edges[neighbor_index].push(index as u32);
                }
            }
        }
    }
    edges
}

/// Connected components by iterative breadth-first traversal.
fn components(edges: &[Vec<u32>]) -> Vec<Vec<u32>> {
    let mut visited = vec![false; edges.len()];
    let mut result = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..edges.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start as u32);
        let mut component = Vec::new();
        while let Some(node) = queue.pop_front() {
            component.push(node);
            for &next in &edges[node as usize] {
                if !visited[next as usize] {
                    visited[next as usize] = true;
                    queue.push_back(next);
                }
            }
        }
        component.sort_unstable();
        result.push(component);
    }
    result
}

fn playable_area(grid: &Grid, components: &[Vec<u32>]) -> PlayableArea {
    let width = grid.width();
    let height = grid.height();

    let has_flat = grid.cells().iter().any(|cell| cell.is_flat());
    if !has_flat {
        return PlayableArea::empty(width, height);
    }

    // Largest component by full size, ramps included; first wins ties.
    let mut largest: &[u32] = &[];
    for component in components {
        if component.len() > largest.len() {
            largest = component;
        }
    }

    let cells: Vec<u32> = largest
        .iter()
        .copied()
        .filter(|&index| grid.cell(index as usize).is_flat())
        .collect();
    let mut mask = vec![false; grid.len()];
    for &index in &cells {
        mask[index as usize] = true;
    }

    PlayableArea {
        width,
        height,
        cells,
        mask,
        ratio: largest.len() as f32 / grid.len() as f32,
    }
}
