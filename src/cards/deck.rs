//! Deck construction.
//!
//! A deck for N pairs holds 2N cards in which every key appears exactly
//! twice. The base keys come from the image pool: duplicates are dropped,
//! the pool is truncated to N, and short pools are padded with placeholder
//! keys. The doubled list is then shuffled.
//!
//! ```
//! use memory_match::cards::{DeckBuilder, ImageKey};
//! use memory_match::core::DeckRng;
//!
//! let pool = vec![ImageKey::file("a.png"), ImageKey::file("b.png")];
//! let deck = DeckBuilder::new(3).build(&pool, &mut DeckRng::new(1));
//!
//! assert_eq!(deck.len(), 6);
//! assert!(deck.is_well_formed());
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::card::{Card, ImageKey};
use crate::core::{ConfigError, DeckRng, DifficultyProfile};

/// Builds shuffled, paired decks of a fixed size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckBuilder {
    pair_count: usize,
}

impl DeckBuilder {
    /// Builder for `pair_count` pairs.
    #[must_use]
    pub const fn new(pair_count: usize) -> Self {
        Self { pair_count }
    }

    /// Builder sized to a profile's grid. Fails for empty or odd grids.
    pub fn for_profile(profile: &DifficultyProfile) -> Result<Self, ConfigError> {
        Ok(Self::new(profile.pair_count()?))
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Exactly `pair_count` distinct keys drawn from `pool`.
    ///
    /// Pool order is preserved. Missing slots are filled with the lowest
    /// placeholder indices the pool does not already use.
    #[must_use]
    pub fn base_keys(&self, pool: &[ImageKey]) -> Vec<ImageKey> {
        let mut seen = FxHashSet::default();
        let mut keys: Vec<ImageKey> = pool
            .iter()
            .filter(|key| seen.insert(*key))
            .take(self.pair_count)
            .cloned()
            .collect();

        let mut next_placeholder = 0u32;
        while keys.len() < self.pair_count {
            let candidate = ImageKey::Placeholder(next_placeholder);
            next_placeholder += 1;
            if !seen.contains(&candidate) {
                keys.push(candidate);
            }
        }

        keys
    }

    /// Build a shuffled deck from `pool`.
    #[must_use]
    pub fn build(&self, pool: &[ImageKey], rng: &mut DeckRng) -> Deck {
        let base = self.base_keys(pool);
        let mut keys: Vec<ImageKey> = base.iter().chain(base.iter()).cloned().collect();
        rng.shuffle(&mut keys);

        let cards = keys
            .into_iter()
            .enumerate()
            .map(|(position, key)| Card::new(key, position))
            .collect();

        let deck = Deck { cards };
        tracing::debug!(
            pairs = self.pair_count,
            placeholders = base.iter().filter(|k| k.is_placeholder()).count(),
            "deck built"
        );
        deck
    }
}

/// An ordered, paired sequence of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Keys in board order.
    pub fn keys(&self) -> impl Iterator<Item = &ImageKey> + '_ {
        self.cards.iter().map(|c| &c.key)
    }

    /// Occurrences of each key.
    #[must_use]
    pub fn key_counts(&self) -> FxHashMap<&ImageKey, usize> {
        let mut counts = FxHashMap::default();
        for key in self.keys() {
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    /// Every key appears exactly twice and positions match indices.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.key_counts().values().all(|&n| n == 2)
            && self.cards.iter().enumerate().all(|(i, c)| c.position == i)
    }

    pub(crate) fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<ImageKey> {
        names.iter().map(|n| ImageKey::file(*n)).collect()
    }

    #[test]
    fn test_base_keys_pads_with_placeholders() {
        let builder = DeckBuilder::new(4);
        let keys = builder.base_keys(&files(&["a", "b"]));

        assert_eq!(
            keys,
            vec![
                ImageKey::file("a"),
                ImageKey::file("b"),
                ImageKey::Placeholder(0),
                ImageKey::Placeholder(1),
            ]
        );
    }

    #[test]
    fn test_base_keys_truncates() {
        let builder = DeckBuilder::new(2);
        let keys = builder.base_keys(&files(&["a", "b", "c", "d"]));
        assert_eq!(keys, files(&["a", "b"]));
    }

    #[test]
    fn test_base_keys_drops_duplicates() {
        let builder = DeckBuilder::new(3);
        let keys = builder.base_keys(&files(&["a", "a", "b"]));
        assert_eq!(keys, vec![ImageKey::file("a"), ImageKey::file("b"), ImageKey::Placeholder(0)]);
    }

    #[test]
    fn test_base_keys_skips_placeholders_already_in_pool() {
        let builder = DeckBuilder::new(3);
        let pool = vec![ImageKey::Placeholder(0), ImageKey::file("a")];
        let keys = builder.base_keys(&pool);
        assert_eq!(keys, vec![ImageKey::Placeholder(0), ImageKey::file("a"), ImageKey::Placeholder(1)]);
    }

    #[test]
    fn test_build_is_paired() {
        let deck = DeckBuilder::new(6).build(&files(&["a", "b", "c"]), &mut DeckRng::new(42));

        assert_eq!(deck.len(), 12);
        assert_eq!(deck.pair_count(), 6);
        assert!(deck.is_well_formed());
        assert_eq!(deck.key_counts().len(), 6);
    }

    #[test]
    fn test_build_zero_pairs() {
        let deck = DeckBuilder::new(0).build(&files(&["a"]), &mut DeckRng::new(1));
        assert!(deck.is_empty());
        assert!(deck.is_well_formed());
    }

    #[test]
    fn test_build_is_deterministic_per_seed() {
        let pool = files(&["a", "b", "c", "d"]);
        let deck1 = DeckBuilder::new(4).build(&pool, &mut DeckRng::new(9));
        let deck2 = DeckBuilder::new(4).build(&pool, &mut DeckRng::new(9));
        assert_eq!(deck1, deck2);
    }

    #[test]
    fn test_for_profile() {
        let builder = DeckBuilder::for_profile(&DifficultyProfile::new(4, 3, 45)).unwrap();
        assert_eq!(builder.pair_count(), 6);

        let odd = DeckBuilder::for_profile(&DifficultyProfile::new(5, 3, 45));
        assert!(matches!(odd, Err(ConfigError::OddGrid { .. })));
    }
}
