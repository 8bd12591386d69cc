use map_collapse::prelude::*;
use map_collapse_examples::{init_tracing, render_grid};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Three height levels: flats per level plus ramps between them.
    let tiles = TerrainTileSetConfig::new(3).build()?;

    let config = GenerateConfig::new(16, 16)
        .with_seed(2025)
        .with_max_attempts(20);
    let generated = generate(&config, &tiles)?;

    println!(
        "Generated {}x{} in {} attempt(s), seed {}:",
        generated.grid.width(),
        generated.grid.height(),
        generated.attempts,
        generated.seed
    );
    println!("{}", render_grid(&generated.grid));

    Ok(())
}
