//! Deck construction tests.
//!
//! These tests verify the pairing guarantees of the deck builder:
//! - Every deck for N pairs has 2N cards
//! - Every key appears exactly twice
//! - The shuffle only reorders the doubled base keys

use std::collections::BTreeMap;

use proptest::prelude::*;

use memory_match::cards::{DeckBuilder, ImageKey};
use memory_match::core::{DeckRng, Difficulty};

fn multiset<'a>(keys: impl Iterator<Item = &'a ImageKey>) -> BTreeMap<ImageKey, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key.clone()).or_insert(0) += 1;
    }
    counts
}

fn pool_strategy() -> impl Strategy<Value = Vec<ImageKey>> {
    prop::collection::vec(
        prop_oneof![
            (0u8..20).prop_map(|i| ImageKey::file(format!("img{i}.png"))),
            (0u32..5).prop_map(ImageKey::Placeholder),
        ],
        0..30,
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_deck_has_two_of_each_key(pairs in 1usize..40, pool in pool_strategy(), seed in any::<u64>()) {
        let deck = DeckBuilder::new(pairs).build(&pool, &mut DeckRng::new(seed));

        prop_assert_eq!(deck.len(), 2 * pairs);
        prop_assert!(deck.is_well_formed());
        let counts = deck.key_counts();
        prop_assert_eq!(counts.len(), pairs);
        prop_assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn prop_shuffle_is_permutation_of_doubled_base(pairs in 1usize..40, pool in pool_strategy(), seed in any::<u64>()) {
        let builder = DeckBuilder::new(pairs);
        let base = builder.base_keys(&pool);
        let deck = builder.build(&pool, &mut DeckRng::new(seed));

        let expected = multiset(base.iter().chain(base.iter()));
        let actual = multiset(deck.keys());
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn prop_pool_keys_used_before_placeholders(pairs in 1usize..20, names in prop::collection::btree_set(0u8..50, 0..30)) {
        let pool: Vec<ImageKey> = names.iter().map(|i| ImageKey::file(format!("img{i}.png"))).collect();
        let base = DeckBuilder::new(pairs).base_keys(&pool);

        let used = pool.len().min(pairs);
        prop_assert_eq!(&base[..used], &pool[..used]);
        prop_assert!(base[used..].iter().all(ImageKey::is_placeholder));
    }
}

// =============================================================================
// Examples
// =============================================================================

/// The default kiosk pool has six images; medium needs ten pairs.
#[test]
fn test_medium_pads_default_pool() {
    let pool: Vec<ImageKey> = (1..=6).map(|i| ImageKey::file(format!("img{i}.png"))).collect();
    let pairs = Difficulty::Medium.profile().pair_count().unwrap();
    let deck = DeckBuilder::new(pairs).build(&pool, &mut DeckRng::new(42));

    assert_eq!(deck.len(), 20);
    let counts = deck.key_counts();
    for i in 0..4 {
        assert_eq!(counts.get(&ImageKey::Placeholder(i)), Some(&2));
    }
    for key in &pool {
        assert_eq!(counts.get(key), Some(&2));
    }
}

/// Easy uses only the first six images and no placeholders.
#[test]
fn test_easy_uses_pool_only() {
    let pool: Vec<ImageKey> = (1..=10).map(|i| ImageKey::file(format!("img{i}.png"))).collect();
    let pairs = Difficulty::Easy.profile().pair_count().unwrap();
    let deck = DeckBuilder::new(pairs).build(&pool, &mut DeckRng::new(42));

    assert_eq!(deck.len(), 12);
    assert!(deck.keys().all(|k| !k.is_placeholder()));
    assert!(deck.keys().all(|k| pool[..6].contains(k)));
}

/// Different seeds deal different boards.
#[test]
fn test_seeds_change_layout() {
    let pool: Vec<ImageKey> = (1..=15).map(|i| ImageKey::file(format!("img{i}.png"))).collect();
    let builder = DeckBuilder::new(15);

    let deck1 = builder.build(&pool, &mut DeckRng::new(1));
    let deck2 = builder.build(&pool, &mut DeckRng::new(2));

    assert_ne!(deck1, deck2);
    assert_eq!(multiset(deck1.keys()), multiset(deck2.keys()));
}

/// Card positions follow board order.
#[test]
fn test_positions_are_board_order() {
    let deck = DeckBuilder::new(5).build(&[], &mut DeckRng::new(3));
    for (i, card) in deck.cards().iter().enumerate() {
        assert_eq!(card.position, i);
        assert!(card.is_selectable());
    }
}
