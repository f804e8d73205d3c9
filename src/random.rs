//! Seeded random sources.
//!
//! Every ant gets its own generator whose seed is derived from the run's
//! master seed, the iteration index, and the ant index. The derived stream
//! does not depend on which thread builds the ant, so sequential and
//! parallel runs with the same master seed produce identical tours.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Golden-ratio increment used to spread stream indices.
const STREAM_INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derives the seed for one ant in one iteration.
pub fn ant_seed(master: u64, iteration: usize, ant: usize) -> u64 {
    let stream = (iteration as u64)
        .wrapping_mul(STREAM_INCREMENT)
        .wrapping_add(ant as u64);
    mix(master ^ mix(stream.wrapping_add(STREAM_INCREMENT)))
}

/// SplitMix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
