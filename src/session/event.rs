//! Session inputs and outputs.
//!
//! `SessionEvent`s come from the player (buttons, card picks). `Notice`s go
//! back out so a front end can redraw without diffing session state.

use serde::{Deserialize, Serialize};

use super::summary::RoundSummary;
use crate::core::Difficulty;
use crate::engine::IgnoreReason;

/// Identifier of one dealt round, unique within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl RoundId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round({})", self.0)
    }
}

/// The screen on display. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Start,
    Round,
    End,
}

/// Player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Start button.
    StartRound,
    /// Play again from the end screen.
    Restart,
    /// Back to the start screen.
    ReturnHome,
    /// Give up; counts as a loss.
    EndRound,
    SelectDifficulty(Difficulty),
    /// Click or key activation on the card at this position.
    SelectCard(usize),
}

/// Something the session did in response to an event or wakeup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    ScreenChanged(Screen),
    DifficultyChanged(Difficulty),
    /// An image was missing and a placeholder took its place.
    AssetSubstituted { image: String },
    /// Nothing could be loaded; the round was not dealt.
    StartFailed { message: String },
    RoundStarted {
        round: RoundId,
        pairs: usize,
        time_budget_secs: u32,
        seed: u64,
    },
    CardRevealed { position: usize },
    PairMatched {
        first: usize,
        second: usize,
        pairs_found: usize,
        total_pairs: usize,
    },
    Mismatch { first: usize, second: usize },
    CardsHidden { first: usize, second: usize },
    SelectionIgnored { position: usize, reason: IgnoreReason },
    TimerTick { remaining_secs: u32 },
    RoundEnded(RoundSummary),
    /// The idle watchdog restarted play from the end screen.
    IdleRestart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_id() {
        let id = RoundId::new(3);
        assert_eq!(id.raw(), 3);
        assert_eq!(id.to_string(), "Round(3)");
        assert!(RoundId::new(2) < id);
    }

    #[test]
    fn test_event_serde() {
        let event = SessionEvent::SelectDifficulty(Difficulty::Hard);
        let json = serde_json::to_string(&event).unwrap();
        let back: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
