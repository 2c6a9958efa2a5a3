//! Injected randomness for the table.
//!
//! Every draw a spin needs goes through [`FairRng`], so a seeded generator
//! replays the exact same winning pocket, offset and duration.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// A fair uniform generator.
pub trait FairRng {
    /// Uniform integer in `[0, n)`.
    fn index_below(&mut self, n: usize) -> usize;

    /// Uniform float in the closed interval `[low, high]`.
    fn between(&mut self, low: f64, high: f64) -> f64;

    /// Uniform float in the half-open interval `[low, high)`.
    fn below(&mut self, low: f64, high: f64) -> f64;
}

impl<R: Rng + ?Sized> FairRng for R {
    fn index_below(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }

    fn between(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..=high)
    }

    fn below(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..high)
    }
}

/// Table generator: fixed seed for replay, OS entropy otherwise.
pub fn table_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}
