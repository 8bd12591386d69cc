use map_collapse::prelude::*;
use map_collapse_examples::{init_tracing, render_grid, render_playable};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let tiles = TerrainTileSetConfig::new(4).build()?;
    let config = GenerateConfig::new(20, 20)
        .with_seed(99)
        .with_max_attempts(30);
    let generated = generate(&config, &tiles)?;

    let report = analyze(&generated.grid);
    println!("Terrain:");
    println!("{}", render_grid(&generated.grid));
    println!(
        "{} component(s); playable ratio {:.3} ({} cells).",
        report.components.len(),
        report.playable.ratio,
        report.playable.len()
    );
    println!("Playable area ('.' reachable, '#' cut off):");
    println!("{}", render_playable(&generated.grid, &report.playable));

    Ok(())
}
