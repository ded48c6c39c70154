//! Deterministic seeded random number generator.
//!
//! Uses the xorshift32 algorithm. Every layout and terrain seed of a run is
//! drawn from one of these, so a single `u32` reproduces a whole session.

use serde::{Deserialize, Serialize};

/// Deterministic seeded random number generator using xorshift32 algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Creates a new RNG with the given seed.
    /// Seed of 0 is treated as 1 to avoid degenerate sequence.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Returns the raw u32 value from the RNG.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a random float between 0 (inclusive) and 1 (exclusive).
    pub fn next(&mut self) -> f32 {
        // top 24 bits keep the result strictly below 1.0 in f32
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a random integer from 0 (inclusive) to max (exclusive).
    pub fn next_int(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Returns a random float in the range [min, max).
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }

    /// Returns true with the given probability.
    pub fn next_bool(&mut self, probability: f32) -> bool {
        self.next() < probability
    }

    /// Draw `count` distinct indices from `0..len`, uniformly and without
    /// replacement, in draw order. Partial Fisher-Yates: never retries.
    ///
    /// Returns fewer than `count` only when `count > len`.
    pub fn sample_distinct(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let take = count.min(len);
        for i in 0..take {
            let j = i + self.next_int((len - i) as u32) as usize;
            pool.swap(i, j);
        }
        pool.truncate(take);
        pool
    }

    /// Returns the current internal state.
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(1)
    }
}
