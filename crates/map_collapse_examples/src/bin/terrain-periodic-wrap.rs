use map_collapse::prelude::*;
use map_collapse_examples::{init_tracing, render_grid};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let tiles = TerrainTileSetConfig::new(2).with_double_ramp(false).build()?;

    // Periodic generation: opposite edges also satisfy the adjacency rules,
    // so the map tiles seamlessly.
    let config = GenerateConfig::new(12, 12)
        .with_periodic(true)
        .with_seed(7)
        .with_max_attempts(20);
    let generated = generate(&config, &tiles)?;

    println!("Tileable map (wraps at every edge):");
    println!("{}", render_grid(&generated.grid));

    // Show the wrap by printing the map twice side by side.
    let rendered = render_grid(&generated.grid);
    let doubled: String = rendered
        .lines()
        .map(|line| format!("{line}{line}\n"))
        .collect();
    println!("Tiled twice horizontally:");
    println!("{doubled}");

    Ok(())
}
