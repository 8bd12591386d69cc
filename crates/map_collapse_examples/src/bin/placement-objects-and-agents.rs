use glam::UVec2;
use map_collapse::prelude::*;
use map_collapse_examples::{init_tracing, render_with_markers};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let tiles = TerrainTileSetConfig::new(3).build()?;
    let config = MapConfig::new(14, 14).with_seed(4242).with_max_attempts(30);
    let runner = MapRunner::try_new(config, &tiles)?;
    let map = runner.run()?;

    // One pass samples objects and agents together, so no two of them share
    // a cell. Swap in UniformPlacement for even spread.
    let mut rng = StdRng::seed_from_u64(map.seed);
    let placements = map.place(6, 2, &CenterWeightedPlacement::new(1.5), &mut rng)?;

    let mut markers: Vec<(UVec2, char)> = Vec::new();
    markers.extend(placements.objects.iter().map(|&p| (UVec2::from(p), 'O')));
    markers.extend(placements.agents.iter().map(|&p| (UVec2::from(p), 'A')));

    println!(
        "Playable ratio {:.3}; placed {} objects and {} agents:",
        map.report.playable.ratio,
        placements.objects.len(),
        placements.agents.len()
    );
    println!("{}", render_with_markers(&map.grid, &markers));

    Ok(())
}
