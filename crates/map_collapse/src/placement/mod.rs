//! Placement sampling over the playable area.
//!
//! This module defines the distribution trait and the without-replacement
//! sampler used to pick distinct object/agent positions from a
//! [`PlayableArea`]. Distributions weight playable cells only; ramps and
//! unreachable cells are never candidates.
use mint::Vector2;
use rand::Rng;
use tracing::debug;

pub mod center_weighted;
pub mod uniform;

pub use center_weighted::CenterWeightedPlacement;
pub use uniform::UniformPlacement;

use crate::connectivity::PlayableArea;
use crate::error::{Error, Result};
use crate::rng::rand01;

/// Trait for weighting playable cells during placement.
pub trait PlacementDistribution: Send + Sync {
    /// Relative weight of a playable cell. Non-positive weights exclude the
    /// cell from sampling.
    fn weight(&self, position: Vector2<u32>, dims: Vector2<u32>) -> f32;
}

/// Draws `count` distinct positions from the playable area, with probability
/// proportional to the distribution's weight and without replacement.
///
/// Fails with [`Error::InsufficientArea`] when fewer than `count` cells carry
/// positive weight.
pub fn sample_positions(
    area: &PlayableArea,
    count: usize,
    distribution: &dyn PlacementDistribution,
    rng: &mut dyn Rng,
) -> Result<Vec<Vector2<u32>>> {
    let dims = Vector2 {
        x: area.width,
        y: area.height,
    };
    let positions: Vec<Vector2<u32>> = area.positions().map(Into::into).collect();
    let mut weights: Vec<f32> = positions
        .iter()
        .map(|&position| {
            let weight = distribution.weight(position, dims);
            if weight.is_finite() && weight > 0.0 {
                weight
            } else {
                0.0
            }
        })
        .collect();

    let available = weights.iter().filter(|w| **w > 0.0).count();
    if count > available {
        return Err(Error::InsufficientArea {
            requested: count,
            available,
        });
    }

    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        let total: f32 = weights.iter().sum();
        let mut roll = rand01(rng) * total;
        let mut picked = None;
        for (index, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            picked = Some(index);
            roll -= weight;
            if roll <= 0.0 {
                break;
            }
        }
        // `available >= count` guarantees a positive-weight cell remains.
        let Some(index) = picked else {
            return Err(Error::Other("placement weights exhausted".into()));
        };
        weights[index] = 0.0;
        chosen.push(positions[index]);
    }

    debug!("Placed {count} positions over {available} candidate cells.");
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use glam::UVec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::connectivity::analyze;
    use crate::grid::{Cell, Grid};

    fn playable_square(side: u32) -> PlayableArea {
        let grid = Grid::new(
            side,
            side,
            vec![Cell::flat(0); (side * side) as usize],
        )
        .unwrap();
        analyze(&grid).playable
    }

    #[test]
    fn samples_are_distinct_and_inside_the_area() {
        let area = playable_square(4);
        let mut rng = StdRng::seed_from_u64(42);
        let picks = sample_positions(&area, 10, &UniformPlacement, &mut rng).unwrap();
        assert_eq!(picks.len(), 10);

        let mut seen = std::collections::HashSet::new();
        for pick in &picks {
            assert!(seen.insert((pick.x, pick.y)), "duplicate position");
            assert!(area.contains((pick.y * area.width + pick.x) as usize));
        }
    }

    #[test]
    fn requesting_more_than_available_fails() {
        let area = playable_square(2);
        let mut rng = StdRng::seed_from_u64(1);
        let result = sample_positions(&area, 5, &UniformPlacement, &mut rng);
        assert!(matches!(
            result,
            Err(Error::InsufficientArea {
                requested: 5,
                available: 4
            })
        ));
    }

    #[test]
    fn exhaustive_draw_returns_every_cell() {
        let area = playable_square(3);
        let mut rng = StdRng::seed_from_u64(3);
        let picks = sample_positions(&area, 9, &UniformPlacement, &mut rng).unwrap();
        let mut coords: Vec<_> = picks.iter().map(|p| (p.x, p.y)).collect();
        coords.sort_unstable();
        coords.dedup();
        assert_eq!(coords.len(), 9);
    }

    #[test]
    fn sampling_is_deterministic_per_seed() {
        let area = playable_square(5);
        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);
        let a = sample_positions(&area, 6, &UniformPlacement, &mut rng_a).unwrap();
        let b = sample_positions(&area, 6, &UniformPlacement, &mut rng_b).unwrap();
        assert_eq!(
            a.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>(),
            b.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn zero_weight_cells_are_never_drawn() {
        struct CornerOnly;

        impl PlacementDistribution for CornerOnly {
            fn weight(&self, position: Vector2<u32>, _dims: Vector2<u32>) -> f32 {
                if position.x == 0 && position.y == 0 {
                    1.0
                } else {
                    0.0
                }
            }
        }

        let area = playable_square(3);
        let mut rng = StdRng::seed_from_u64(8);
        let picks = sample_positions(&area, 1, &CornerOnly, &mut rng).unwrap();
        assert_eq!(UVec2::from(picks[0]), UVec2::ZERO);

        let too_many = sample_positions(&area, 2, &CornerOnly, &mut rng);
        assert!(matches!(
            too_many,
            Err(Error::InsufficientArea {
                requested: 2,
                available: 1
            })
        ));
    }
}
