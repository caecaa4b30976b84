//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests a seeded or scripted
//! implementation is injected so generated catalogs are repeatable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Generate a random (version 4 layout) UUID from RNG output.
    fn next_uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        for chunk in bytes.chunks_mut(4) {
            chunk.copy_from_slice(&self.next_u32_range(0, u32::MAX).to_be_bytes());
        }
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    /// Flip a fair coin.
    fn next_bool(&mut self) -> bool {
        self.next_u32_range(0, 1) == 1
    }
}

/// Production RNG backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRng(StdRng);

impl SeededRng {
    /// Creates an RNG whose output is fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl DeterministicRng for SeededRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Returns an index in `0..len`, or `None` when `len` is zero.
pub fn pick_index(rng: &mut dyn DeterministicRng, len: usize) -> Option<usize> {
    let last = u32::try_from(len.checked_sub(1)?).unwrap_or(u32::MAX);
    Some(rng.next_u32_range(0, last) as usize)
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T>(rng: &mut dyn DeterministicRng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let bound = u32::try_from(i).unwrap_or(u32::MAX);
        let j = rng.next_u32_range(0, bound) as usize;
        items.swap(i, j.min(i));
    }
}
