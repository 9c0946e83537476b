//! Card system: image keys, cards and decks.
//!
//! ## Key Types
//!
//! - `ImageKey`: Identifier of a card face; equal keys form a pair
//! - `Card`: One board slot with its key, position and visibility
//! - `DeckBuilder`: Builds shuffled decks in which each key appears twice
//! - `Deck`: The built, ordered sequence of cards for one round

pub mod card;
pub mod deck;

pub use card::{Card, ImageKey, Visibility, PLACEHOLDER_PREFIX};
pub use deck::{Deck, DeckBuilder};
