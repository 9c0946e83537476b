//! Round mechanics: matching and the countdown.
//!
//! `RoundState` decides what each card selection does; `RoundTimer` counts
//! the round down. Neither knows about screens, events or wall-clock time,
//! which the session layer supplies.

pub mod matcher;
pub mod timer;

pub use matcher::{IgnoreReason, MatchPhase, RoundState, SelectOutcome};
pub use timer::{format_countdown, RoundTimer, Tick, TimerState, Urgency};
