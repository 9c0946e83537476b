//! Match engine: the reveal/compare state machine for one round.
//!
//! ```text
//!            select              select (same key)
//!   Idle ─────────────▶ OneRevealed ───────────────▶ Idle / Complete
//!    ▲                      │
//!    │ hide_mismatch        │ select (different key)
//!    └──────────────── Locked ◀┘
//! ```
//!
//! Selections that cannot be acted on (locked board, face-up card, finished
//! round) are ignored and reported with an `IgnoreReason`; they are dropped,
//! not queued.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck, ImageKey};

/// Where the engine is between selections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No card face up awaiting comparison.
    #[default]
    Idle,
    /// One card face up.
    OneRevealed { first: usize },
    /// Two different cards face up until the mismatch delay elapses.
    Locked { first: usize, second: usize },
    /// Every pair found.
    Complete,
}

/// Why a selection was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// A mismatched pair is still on display.
    Locked,
    /// The card is already face up, including a repeat pick of the first card.
    AlreadyRevealed,
    AlreadyMatched,
    /// No card at that position.
    OutOfRange,
    RoundComplete,
}

/// Result of a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored(IgnoreReason),
    /// First card of an attempt turned face up.
    Revealed { position: usize },
    /// Pair found. `complete` is set when it was the last one.
    Matched {
        first: usize,
        second: usize,
        key: ImageKey,
        pairs_found: usize,
        complete: bool,
    },
    /// Keys differ; both stay face up and input is locked until
    /// `RoundState::hide_mismatch`.
    Mismatched { first: usize, second: usize },
}

impl SelectOutcome {
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, SelectOutcome::Ignored(_))
    }
}

/// Board and match progress for one round.
///
/// Owns the cards dealt for the round; a new round gets a new value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    cards: Vec<Card>,
    phase: MatchPhase,
    pairs_found: usize,
    total_pairs: usize,
}

impl RoundState {
    /// Start matching on a freshly built deck.
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        let total_pairs = deck.pair_count();
        let phase = if total_pairs == 0 { MatchPhase::Complete } else { MatchPhase::Idle };
        Self {
            cards: deck.into_cards(),
            phase,
            pairs_found: 0,
            total_pairs,
        }
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    #[must_use]
    pub fn pairs_found(&self) -> usize {
        self.pairs_found
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    /// First card of the current attempt, if any.
    #[must_use]
    pub fn revealed_first(&self) -> Option<usize> {
        match self.phase {
            MatchPhase::OneRevealed { first } | MatchPhase::Locked { first, .. } => Some(first),
            _ => None,
        }
    }

    /// Second card of a mismatched attempt on display.
    #[must_use]
    pub fn revealed_second(&self) -> Option<usize> {
        match self.phase {
            MatchPhase::Locked { second, .. } => Some(second),
            _ => None,
        }
    }

    /// True only while a mismatch is on display.
    #[must_use]
    pub fn input_locked(&self) -> bool {
        matches!(self.phase, MatchPhase::Locked { .. })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == MatchPhase::Complete
    }

    /// Status line, e.g. `3/6 pairs`.
    #[must_use]
    pub fn pairs_status(&self) -> String {
        format!("{}/{} pairs", self.pairs_found, self.total_pairs)
    }

    /// Handle the player picking the card at `position`.
    pub fn select(&mut self, position: usize) -> SelectOutcome {
        match self.phase {
            MatchPhase::Locked { .. } => return SelectOutcome::Ignored(IgnoreReason::Locked),
            MatchPhase::Complete => return SelectOutcome::Ignored(IgnoreReason::RoundComplete),
            _ => {}
        }

        let Some(card) = self.cards.get(position) else {
            return SelectOutcome::Ignored(IgnoreReason::OutOfRange);
        };
        if card.is_matched() {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyMatched);
        }
        if card.is_face_up() {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyRevealed);
        }

        self.cards[position].reveal();

        let first = match self.phase {
            MatchPhase::OneRevealed { first } => first,
            _ => {
                self.phase = MatchPhase::OneRevealed { first: position };
                return SelectOutcome::Revealed { position };
            }
        };

        if self.cards[first].key == self.cards[position].key {
            self.cards[first].mark_matched();
            self.cards[position].mark_matched();
            self.pairs_found += 1;

            let complete = self.pairs_found == self.total_pairs;
            self.phase = if complete { MatchPhase::Complete } else { MatchPhase::Idle };

            SelectOutcome::Matched {
                first,
                second: position,
                key: self.cards[position].key.clone(),
                pairs_found: self.pairs_found,
                complete,
            }
        } else {
            self.phase = MatchPhase::Locked { first, second: position };
            SelectOutcome::Mismatched { first, second: position }
        }
    }

    /// Turn a displayed mismatch face down and unlock input.
    ///
    /// Returns the hidden positions, or `None` if nothing was locked.
    pub fn hide_mismatch(&mut self) -> Option<(usize, usize)> {
        let MatchPhase::Locked { first, second } = self.phase else {
            return None;
        };
        self.cards[first].hide();
        self.cards[second].hide();
        self.phase = MatchPhase::Idle;
        Some((first, second))
    }
}
