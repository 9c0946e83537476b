//! Shuffle randomness for deck construction.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical shuffles
//! - **Forkable**: Each round gets its own stream, so a round can be replayed
//!   from the seed logged at its start
//! - **Entropy seeding**: Seeds from the OS cryptographic RNG when it is
//!   available, falling back to a clock-derived seed
//!
//! ```
//! use memory_match::core::DeckRng;
//!
//! let mut rng = DeckRng::new(42);
//! let mut round_rng = rng.fork();
//!
//! let mut cards = vec![1, 1, 2, 2, 3, 3];
//! round_rng.shuffle(&mut cards);
//! cards.sort();
//! assert_eq!(cards, vec![1, 1, 2, 2, 3, 3]);
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used for shuffling decks.
///
/// Uses ChaCha8, which keeps cryptographic-quality output while staying fast.
#[derive(Clone, Debug)]
pub struct DeckRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl DeckRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the operating system's entropy source.
    ///
    /// Falls back to a seed derived from the system clock if the OS source
    /// is unavailable.
    #[must_use]
    pub fn from_entropy() -> Self {
        let mut bytes = [0u8; 8];
        let seed = match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes),
            Err(err) => {
                tracing::warn!(error = %err, "OS entropy unavailable, seeding shuffle from clock");
                clock_seed()
            }
        };
        Self::new(seed)
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Uniform index in `0..=upper`.
    pub fn index_inclusive(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..=upper)
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = DeckRng::new(42);
        let mut rng2 = DeckRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.index_inclusive(999), rng2.index_inclusive(999));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DeckRng::new(1);
        let mut rng2 = DeckRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.index_inclusive(999)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.index_inclusive(999)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = DeckRng::new(42);
        let mut rng2 = DeckRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();
        assert_eq!(forked1.seed(), forked2.seed());

        // Successive forks differ
        let forked3 = rng1.fork();
        assert_ne!(forked1.seed(), forked3.seed());
    }

    #[test]
    fn test_index_inclusive_bounds() {
        let mut rng = DeckRng::new(7);
        for _ in 0..200 {
            assert!(rng.index_inclusive(3) <= 3);
        }
        assert_eq!(rng.index_inclusive(0), 0);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = DeckRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Same elements, different order (very likely)
        assert_ne!(data, original);
        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_is_reproducible() {
        let mut rng1 = DeckRng::new(42);
        let mut rng2 = DeckRng::new(42);
        let mut a: Vec<u32> = (0..30).collect();
        let mut b = a.clone();

        rng1.shuffle(&mut a);
        rng2.shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_small_slices() {
        let mut rng = DeckRng::new(3);
        let mut empty: Vec<u8> = vec![];
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec![9];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![9]);
    }

    #[test]
    fn test_from_entropy_produces_usable_rng() {
        let mut rng = DeckRng::from_entropy();
        let mut data = vec![1, 2, 3];
        rng.shuffle(&mut data);
        data.sort();
        assert_eq!(data, vec![1, 2, 3]);
    }
}
