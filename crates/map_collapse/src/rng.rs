//! Seed derivation and randomness helpers shared across the crate.
use rand::Rng;
use tracing::info;

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Creates a deterministic seed for a retry attempt from a base seed.
///
/// Distinct attempts get decorrelated streams even for neighboring base seeds.
pub(crate) fn seed_for_attempt(base_seed: u64, attempt: u32) -> u64 {
    let mixed = base_seed ^ (attempt as u64).wrapping_mul(0x9E3779B97F4A7C15);
    mix_u64(mixed)
}

/// Uses the supplied seed, or draws one from the process entropy source and
/// logs it so the run can be reproduced.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => seed,
        None => {
            let seed = rand::rng().next_u64();
            info!("No seed supplied; using entropy seed {seed}.");
            seed
        }
    }
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}
