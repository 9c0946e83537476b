//! End-of-round results.

use serde::{Deserialize, Serialize};

use super::event::RoundId;
use crate::core::{Difficulty, DifficultyProfile};

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Every pair found in time.
    Won,
    /// The countdown reached zero first.
    TimeExpired,
    /// The player ended the round early.
    Abandoned,
}

impl RoundOutcome {
    #[must_use]
    pub fn is_win(self) -> bool {
        self == RoundOutcome::Won
    }

    /// Headline for the end screen.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            RoundOutcome::Won => "Congratulations! You completed the game!",
            RoundOutcome::TimeExpired | RoundOutcome::Abandoned => "Try again!",
        }
    }
}

/// What the end screen reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: RoundId,
    pub outcome: RoundOutcome,
    /// Built-in difficulty played; `None` for a custom grid.
    pub difficulty: Option<Difficulty>,
    /// Grid and time budget the round was dealt with.
    pub grid: DifficultyProfile,
    pub time_used_secs: u32,
    pub pairs_found: usize,
    pub total_pairs: usize,
}

impl RoundSummary {
    /// Difficulty label, or the grid shape for a custom grid.
    #[must_use]
    pub fn grid_label(&self) -> String {
        match self.difficulty {
            Some(difficulty) => difficulty.to_string(),
            None => format!("custom {}x{}", self.grid.columns, self.grid.rows),
        }
    }
}

impl std::fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Time used: {}s, Pairs found: {}/{}",
            self.time_used_secs, self.pairs_found, self.total_pairs
        )
    }
}
