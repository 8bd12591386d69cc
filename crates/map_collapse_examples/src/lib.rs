#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_grid, render_playable, render_with_markers};
