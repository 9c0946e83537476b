//! Round countdown.
//!
//! The timer only counts; whoever owns it decides when a second has passed
//! and calls `tick`. Once expired or cancelled it ignores further ticks, so a
//! late tick from a previous schedule cannot move it.

use serde::{Deserialize, Serialize};

/// Lifecycle of a `RoundTimer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    /// Created but not started.
    Ready,
    Running,
    /// Stopped before reaching zero.
    Cancelled,
    /// Reached zero.
    Expired,
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Still running with this many seconds left.
    Remaining(u32),
    /// This tick reached zero.
    Expired,
    /// The timer was not running; nothing changed.
    Inactive,
}

/// How close the countdown is to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Urgency {
    Normal,
    /// 20 seconds or less.
    Warning,
    /// 10 seconds or less.
    Critical,
}

/// One-second countdown from a fixed budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimer {
    budget_secs: u32,
    remaining_secs: u32,
    state: TimerState,
}

impl RoundTimer {
    #[must_use]
    pub fn new(budget_secs: u32) -> Self {
        Self {
            budget_secs,
            remaining_secs: budget_secs,
            state: TimerState::Ready,
        }
    }

    /// Begin counting down. Has no effect unless the timer is `Ready`.
    pub fn start(&mut self) {
        if self.state == TimerState::Ready {
            self.state = TimerState::Running;
        }
    }

    /// Stop counting; the remaining time is kept for reporting.
    ///
    /// Returns `true` if the timer was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_running();
        if matches!(self.state, TimerState::Ready | TimerState::Running) {
            self.state = TimerState::Cancelled;
        }
        was_running
    }

    /// One second has passed.
    pub fn tick(&mut self) -> Tick {
        if !self.is_running() {
            return Tick::Inactive;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Expired;
            Tick::Expired
        } else {
            Tick::Remaining(self.remaining_secs)
        }
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    #[must_use]
    pub fn budget_secs(&self) -> u32 {
        self.budget_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Seconds used so far.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.budget_secs - self.remaining_secs
    }

    #[must_use]
    pub fn urgency(&self) -> Urgency {
        match self.remaining_secs {
            0..=10 => Urgency::Critical,
            11..=20 => Urgency::Warning,
            _ => Urgency::Normal,
        }
    }

    /// Display text, e.g. `Time: 07`.
    #[must_use]
    pub fn display(&self) -> String {
        format_countdown(self.remaining_secs)
    }
}

/// Zero-padded countdown text.
#[must_use]
pub fn format_countdown(secs: u32) -> String {
    format!("Time: {secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_only_while_running() {
        let mut timer = RoundTimer::new(3);
        assert_eq!(timer.tick(), Tick::Inactive);
        assert_eq!(timer.remaining_secs(), 3);

        timer.start();
        assert_eq!(timer.tick(), Tick::Remaining(2));
        assert_eq!(timer.tick(), Tick::Remaining(1));
        assert_eq!(timer.tick(), Tick::Expired);
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.remaining_secs(), 0);

        // Expired timers stay at zero
        assert_eq!(timer.tick(), Tick::Inactive);
        assert_eq!(timer.elapsed_secs(), 3);
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut timer = RoundTimer::new(45);
        timer.start();
        timer.tick();
        assert!(timer.cancel());
        assert_eq!(timer.tick(), Tick::Inactive);
        assert_eq!(timer.remaining_secs(), 44);
        assert_eq!(timer.elapsed_secs(), 1);

        // Second cancel is a no-op
        assert!(!timer.cancel());
        assert_eq!(timer.state(), TimerState::Cancelled);

        // Cancelled timers cannot be restarted
        timer.start();
        assert_eq!(timer.state(), TimerState::Cancelled);
    }

    #[test]
    fn test_cancel_after_expiry_keeps_expired() {
        let mut timer = RoundTimer::new(1);
        timer.start();
        assert_eq!(timer.tick(), Tick::Expired);
        assert!(!timer.cancel());
        assert_eq!(timer.state(), TimerState::Expired);
    }

    #[test]
    fn test_urgency() {
        let mut timer = RoundTimer::new(22);
        timer.start();
        assert_eq!(timer.urgency(), Urgency::Normal);
        timer.tick();
        assert_eq!(timer.urgency(), Urgency::Normal);
        timer.tick();
        assert_eq!(timer.urgency(), Urgency::Warning);
        for _ in 0..10 {
            timer.tick();
        }
        assert_eq!(timer.remaining_secs(), 10);
        assert_eq!(timer.urgency(), Urgency::Critical);
    }

    #[test]
    fn test_display() {
        assert_eq!(RoundTimer::new(60).display(), "Time: 60");
        assert_eq!(format_countdown(7), "Time: 07");
        assert_eq!(format_countdown(0), "Time: 00");
    }
}
