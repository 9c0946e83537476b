//! Cards on the board.
//!
//! An `ImageKey` names the picture on a card's face and is what pairs are
//! matched on. A `Card` is one slot on the board: its key, its position and
//! whether it is currently hidden, revealed or matched.

use serde::{Deserialize, Serialize};

/// Prefix used when a placeholder key is written as a string.
pub const PLACEHOLDER_PREFIX: &str = "__auto";

/// Identifier of a card face.
///
/// Two cards form a pair exactly when their keys are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImageKey {
    /// A real image file, named relative to the image directory.
    File(String),
    /// Synthetic face generated when real images run out or fail to load.
    Placeholder(u32),
}

impl ImageKey {
    /// Key for an image file.
    pub fn file(name: impl Into<String>) -> Self {
        ImageKey::File(name.into())
    }

    /// Parse a key from its string form; `__auto3` becomes `Placeholder(3)`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.strip_prefix(PLACEHOLDER_PREFIX)
            .and_then(|idx| idx.parse().ok())
            .map_or_else(|| ImageKey::File(raw.to_string()), ImageKey::Placeholder)
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageKey::Placeholder(_))
    }
}

impl std::fmt::Display for ImageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKey::File(name) => f.write_str(name),
            ImageKey::Placeholder(idx) => write!(f, "{PLACEHOLDER_PREFIX}{idx}"),
        }
    }
}

/// Visibility of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Face down.
    #[default]
    Hidden,
    /// Face up while waiting for a match decision.
    Revealed,
    /// Face up for the rest of the round.
    Matched,
}

/// One card slot on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub key: ImageKey,
    /// Index on the board, row-major.
    pub position: usize,
    pub visibility: Visibility,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(key: ImageKey, position: usize) -> Self {
        Self { key, position, visibility: Visibility::Hidden }
    }

    /// Can this card be picked by the player?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.visibility == Visibility::Hidden
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.visibility == Visibility::Matched
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.visibility != Visibility::Hidden
    }

    /// Accessibility label for the card's current state.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self.visibility {
            Visibility::Hidden => "Hidden card",
            Visibility::Revealed => "Revealed card",
            Visibility::Matched => "Matched card",
        }
    }

    pub(crate) fn reveal(&mut self) {
        self.visibility = Visibility::Revealed;
    }

    pub(crate) fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.visibility = Visibility::Matched;
    }
}
