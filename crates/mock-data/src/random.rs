//! Injectable source of pseudo-random values.
//!
//! The generator never touches a global RNG. It draws from a
//! [`RandomStream`], so tests can substitute a fixed stream and the default
//! [`SeededStream`] makes output a pure function of the seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of bounded random values
pub trait RandomStream {
    /// Uniform integer in `[low, high]`
    fn int_in(&mut self, low: i64, high: i64) -> i64;

    /// Uniform float in `[low, high]`
    fn float_in(&mut self, low: f64, high: f64) -> f64;

    /// Uniform index in `[0, len)`; `len` must be non-zero
    fn index(&mut self, len: usize) -> usize {
        self.int_in(0, len as i64 - 1) as usize
    }
}

/// ChaCha8-backed stream seeded from a signed seed.
///
/// Negative seeds are accepted; the bit pattern is reused as the u64 seed.
#[derive(Debug, Clone)]
pub struct SeededStream {
    rng: ChaCha8Rng,
}

impl SeededStream {
    pub fn new(seed: i64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
        }
    }
}

impl RandomStream for SeededStream {
    fn int_in(&mut self, low: i64, high: i64) -> i64 {
        self.rng.random_range(low..=high)
    }

    fn float_in(&mut self, low: f64, high: f64) -> f64 {
        self.rng.random_range(low..=high)
    }
}
