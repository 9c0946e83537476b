//! Virtual clock and pending wakeups.
//!
//! The session never sleeps. The host advances the clock and the scheduler
//! hands back every wakeup that fell due, earliest first; wakeups due at the
//! same instant fire in the order they were scheduled. Cancelled wakeups
//! never fire.

use std::time::Duration;

use super::event::RoundId;

/// Handle for cancelling a scheduled wakeup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a fired timer asks the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wakeup {
    /// One second of the round's countdown has passed.
    RoundTick { round: RoundId },
    /// A mismatched pair has been shown long enough.
    HideMismatch { round: RoundId },
    /// No input for the idle timeout.
    IdleCheck,
}

#[derive(Clone, Debug)]
struct Entry {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u64>,
    wakeup: Wakeup,
}

/// Timer queue on a virtual millisecond clock.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time since the scheduler was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms)
    }

    /// Fire `wakeup` once after `delay`.
    pub fn schedule_once(&mut self, delay: Duration, wakeup: Wakeup) -> TimerId {
        self.insert(to_ms(delay), None, wakeup)
    }

    /// Fire `wakeup` every `period`, first after one period.
    ///
    /// Periods shorter than a millisecond are rounded up to one.
    pub fn schedule_every(&mut self, period: Duration, wakeup: Wakeup) -> TimerId {
        let period_ms = to_ms(period).max(1);
        self.insert(period_ms, Some(period_ms), wakeup)
    }

    /// Drop a pending wakeup. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of pending wakeups.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Next wakeup due at or before `until`, moving the clock to its due time.
    ///
    /// Repeating wakeups are re-armed for their next period.
    pub fn pop_due(&mut self, until: Duration) -> Option<Wakeup> {
        let until_ms = to_ms(until);
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id))
            .map(|(i, _)| i)?;

        let Entry { due_ms, period_ms, wakeup, .. } = self.entries[idx];
        self.now_ms = self.now_ms.max(due_ms);

        match period_ms {
            Some(period) => self.entries[idx].due_ms = due_ms + period,
            None => {
                self.entries.swap_remove(idx);
            }
        }

        tracing::trace!(?wakeup, now_ms = self.now_ms, "wakeup fired");
        Some(wakeup)
    }

    /// Move the clock forward without firing anything. Never moves it back.
    pub fn advance_to(&mut self, time: Duration) {
        self.now_ms = self.now_ms.max(to_ms(time));
    }

    fn insert(&mut self, delay_ms: u64, period_ms: Option<u64>, wakeup: Wakeup) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due_ms: self.now_ms + delay_ms,
            period_ms,
            wakeup,
        });
        id
    }
}

fn to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUND: RoundId = RoundId::new(1);

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_once_fires_when_due() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_once(Duration::from_millis(950), Wakeup::HideMismatch { round: ROUND });

        assert_eq!(scheduler.pop_due(Duration::from_millis(949)), None);
        assert!(scheduler.is_pending(id));

        assert_eq!(
            scheduler.pop_due(secs(1)),
            Some(Wakeup::HideMismatch { round: ROUND })
        );
        assert_eq!(scheduler.now(), Duration::from_millis(950));
        assert!(!scheduler.is_pending(id));
        assert_eq!(scheduler.pop_due(secs(10)), None);
    }

    #[test]
    fn test_repeating_fires_each_period() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(secs(1), Wakeup::RoundTick { round: ROUND });

        let mut fired = 0;
        while scheduler.pop_due(secs(5)).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 5);
        assert_eq!(scheduler.now(), secs(5));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let tick = scheduler.schedule_every(secs(1), Wakeup::RoundTick { round: ROUND });

        assert!(scheduler.cancel(tick));
        assert!(!scheduler.cancel(tick));
        assert_eq!(scheduler.pop_due(secs(60)), None);
    }

    #[test]
    fn test_order_by_due_then_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(secs(2), Wakeup::IdleCheck);
        scheduler.schedule_every(secs(1), Wakeup::RoundTick { round: ROUND });
        scheduler.schedule_once(secs(1), Wakeup::HideMismatch { round: ROUND });

        let fired: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(secs(2))).collect();
        assert_eq!(
            fired,
            vec![
                Wakeup::RoundTick { round: ROUND },
                Wakeup::HideMismatch { round: ROUND },
                Wakeup::IdleCheck,
                Wakeup::RoundTick { round: ROUND },
            ]
        );
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(secs(10));
        scheduler.schedule_once(secs(1), Wakeup::IdleCheck);

        assert_eq!(scheduler.pop_due(secs(10)), None);
        assert_eq!(scheduler.pop_due(secs(11)), Some(Wakeup::IdleCheck));

        // The clock never runs backwards
        scheduler.advance_to(secs(3));
        assert_eq!(scheduler.now(), secs(11));
    }
}
