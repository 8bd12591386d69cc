//! Terminal rendering helpers shared by the example binaries.
use map_collapse::connectivity::PlayableArea;
use map_collapse::grid::{Direction, Grid};
use map_collapse::tileset::Orientation;

/// Installs a formatted tracing subscriber honoring `RUST_LOG`, defaulting to
/// `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn cell_char(height: u32, orientation: Orientation) -> char {
    match orientation.ascent() {
        None => char::from_digit(height.min(9), 10).unwrap_or('9'),
        Some(Direction::North) => '^',
        Some(Direction::East) => '>',
        Some(Direction::South) => 'v',
        Some(Direction::West) => '<',
    }
}

/// One row per grid row: height digits for flat cells, arrows for ramps.
pub fn render_grid(grid: &Grid) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = grid.get(x, y);
            out.push(cell_char(cell.height, cell.orientation));
        }
        out.push('\n');
    }
    out
}

/// Like [`render_grid`], but playable cells show as `.` and unreachable flat
/// cells as `#`.
pub fn render_playable(grid: &Grid, playable: &PlayableArea) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = grid.get(x, y);
            let index = grid.index(x, y);
            let glyph = if playable.contains(index) {
                '.'
            } else if cell.is_flat() {
                '#'
            } else {
                cell_char(cell.height, cell.orientation)
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Renders the grid with marker characters overlaid at the given coordinates.
pub fn render_with_markers(grid: &Grid, markers: &[(glam::UVec2, char)]) -> String {
    let mut rows: Vec<Vec<char>> = render_grid(grid)
        .lines()
        .map(|line| line.chars().collect())
        .collect();
    for &(position, glyph) in markers {
        if position.y < grid.height() && position.x < grid.width() {
            rows[position.y as usize][position.x as usize] = glyph;
        }
    }
    let mut out = String::new();
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}
