use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::CoreError;

/// A source of uniform draws in `[0, 1)`.
///
/// The simulator takes one of these instead of reaching for ambient
/// randomness, so a seeded or scripted source makes projections reproducible.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

/// Seedable pseudo-random source backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Same seed, same sequence.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy.
    pub fn from_entropy() -> Result<Self, CoreError> {
        let mut seed = [0u8; 8];
        getrandom::getrandom(&mut seed)?;
        Ok(Self::new(u64::from_le_bytes(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Zero draws tolerated before falling back to the smallest positive value.
const MAX_ZERO_DRAWS: usize = 64;

/// Draw a uniform in `(0, 1]`, rejecting zero.
///
/// Out-of-range values from a foreign source are clamped into range.
fn positive_uniform(source: &mut dyn RandomSource) -> f64 {
    for _ in 0..MAX_ZERO_DRAWS {
        let u = source.next_uniform();
        if u.is_finite() && u > 0.0 {
            return u.min(1.0);
        }
    }
    f64::MIN_POSITIVE
}

/// Standard-normal sample via the Box–Muller transform:
/// `z = sqrt(-2 ln u) * cos(2π v)` for `u, v` in `(0, 1]`.
pub fn standard_normal(source: &mut dyn RandomSource) -> f64 {
    let u = positive_uniform(source);
    let v = positive_uniform(source);
    (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos()
}
