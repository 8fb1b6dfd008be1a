//! Deterministic PRNG based on the xorshift64* algorithm.
//!
//! Particle fields are reseeded wholesale on every resize, so the generator
//! has to be cheap and self-contained. Same seed always produces the same
//! field across platforms (pure integer arithmetic in the core algorithm).

use serde::{Deserialize, Serialize};

/// Xorshift64* deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift triple (12, 25, 27) followed by a multiply by
/// `0x2545F4914F6CDD1D` to scramble the output. Seed of 0 is automatically
/// replaced with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64Star {
    state: u64,
}

impl Xorshift64Star {
    /// Fallback seed used when the caller provides 0, which is a fixed point
    /// of the xorshift state update.
    const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Output multiplier for xorshift64*.
    const MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

    /// Creates a new PRNG with the given seed.
    ///
    /// If `seed` is 0, uses `0x9E3779B97F4A7C15` as a fallback to avoid the
    /// xorshift all-zeros fixed point.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(Self::MULTIPLIER)
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for full
    /// mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}
