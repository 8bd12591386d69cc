use map_collapse::prelude::*;
use map_collapse_examples::{init_tracing, render_grid};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Materialize one large map, then re-sample smaller maps out of it
    // instead of re-running generation. This is how stored benchmark maps
    // get varied across episodes.
    let tiles = TerrainTileSetConfig::new(3).build()?;
    let source = generate(
        &GenerateConfig::new(24, 24).with_seed(1234).with_max_attempts(30),
        &tiles,
    )?;

    println!("Source map:");
    println!("{}", render_grid(&source.grid));

    for round in 0..3u64 {
        let runner = MapRunner::try_new(MapConfig::new(8, 8).with_seed(5 + round), &tiles)?;
        let sampled = runner.run_from_sample(&source.grid)?;
        println!(
            "Crop {round} (ratio {:.3}):",
            sampled.report.playable.ratio
        );
        println!("{}", render_grid(&sampled.grid));
    }

    Ok(())
}
