//! Session layer: round lifecycle, event queue and virtual clock.
//!
//! ## Key Types
//!
//! - `Session`: Owns config, current round, scheduler and event queue
//! - `SessionEvent`: Player input, consumed in arrival order
//! - `Notice`: What the session did, for a front end to render
//! - `Scheduler`: Virtual clock firing ticks, mismatch hides and idle checks
//! - `RoundSummary`: End-screen result
//!
//! ## Time
//!
//! The session never reads the wall clock. A host calls `Session::advance`
//! with the time that has passed; countdown ticks, the mismatch display delay
//! and the idle watchdog all fire from there. This keeps every timing rule
//! testable without sleeping.

pub mod event;
pub mod lifecycle;
pub mod scheduler;
pub mod summary;

pub use event::{Notice, RoundId, Screen, SessionEvent};
pub use scheduler::{Scheduler, TimerId, Wakeup};
pub use lifecycle::{LifecyclePhase, Session};
pub use summary::{RoundOutcome, RoundSummary};
