//! Seeded operand generation
//!
//! Operands are filled with uniformly drawn small integers so that every
//! value (and every product in the accumulation) is exactly representable in
//! storage precision. The RNG is ChaCha-seeded so a run is reproducible from
//! its seed and both the device path and the reference path observe the
//! identical input values.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::precision::Element;

/// Build the run RNG from a seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Fill `data` with integers drawn uniformly from `[lo, hi]`, stored in
/// storage precision.
pub fn fill_uniform_int<E: Element>(data: &mut [E], lo: i32, hi: i32, rng: &mut ChaCha8Rng) {
    for slot in data.iter_mut() {
        let value = rng.gen_range(lo..=hi);
        *slot = E::narrow(value as f32);
    }
}
