//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! Setup (package routes, vehicle start points) draws from one root
//! `SimRng`.  Every vehicle then gets its own child RNG derived from the root:
//!
//!   child_seed = root.next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive offsets uniformly across the seed space.  Child
//! RNGs are owned by their vehicle thread, so no synchronisation is needed.
//! Thread interleaving still varies between runs; only the inputs repeat.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation RNG wrapper around `SmallRng`.
///
/// `!Sync` by construction - each actor thread must hold its own instance
/// (see [`child`](Self::child)).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Used when the configuration carries no seed.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Derive a child `SimRng` with a different seed offset - used to give
    /// each vehicle an independent stream.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    /// Panics if `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    /// Draw an index in `0..len` different from `avoid`, by redrawing until
    /// the two differ.
    ///
    /// # Panics
    /// Panics if `len < 2` (no distinct value exists).
    pub fn index_other_than(&mut self, len: usize, avoid: usize) -> usize {
        assert!(len >= 2, "index_other_than needs at least two candidates");
        loop {
            let candidate = self.index(len);
            if candidate != avoid {
                return candidate;
            }
        }
    }
}
