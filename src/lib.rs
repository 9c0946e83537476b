//! # memory-match
//!
//! A memory-matching card game engine for kiosk and offline display.
//!
//! ## Design Principles
//!
//! 1. **No Ambient State**: A `Session` owns everything about play. Two
//!    sessions never share anything.
//!
//! 2. **Events In, Notices Out**: Player input is queued and handled to
//!    completion in arrival order. Front ends render from the returned
//!    notices and never call into the engine from a callback.
//!
//! 3. **Virtual Time**: Countdown ticks, the mismatch display delay and the
//!    idle watchdog run on a clock the host advances, so every timing rule
//!    can be tested without sleeping.
//!
//! ## Modules
//!
//! - `core`: Configuration, difficulty profiles, errors, shuffle RNG
//! - `cards`: Image keys, cards and the deck builder
//! - `engine`: Match state machine and round countdown
//! - `assets`: Image name resolution and placeholder art
//! - `session`: Round lifecycle, event queue and scheduler
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use memory_match::assets::AssetManifest;
//! use memory_match::core::{Difficulty, GameConfig};
//! use memory_match::session::{LifecyclePhase, Session, SessionEvent};
//!
//! let config = GameConfig::default()
//!     .with_difficulty(Difficulty::Easy)
//!     .with_shuffle_seed(7);
//! let manifest: AssetManifest = (1..=6).map(|i| format!("img{i}.png")).collect();
//!
//! let mut session = Session::new(config, manifest).unwrap();
//! session.dispatch(SessionEvent::StartRound);
//! assert_eq!(session.phase(), LifecyclePhase::Active);
//!
//! // Nobody plays: the 45 second countdown runs out.
//! session.advance(Duration::from_secs(45));
//! assert_eq!(session.phase(), LifecyclePhase::Ended);
//! assert_eq!(
//!     session.last_summary().unwrap().to_string(),
//!     "Time used: 45s, Pairs found: 0/6"
//! );
//! ```

pub mod assets;
pub mod cards;
pub mod core;
pub mod engine;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    AssetError, ConfigError, DeckRng, Difficulty, DifficultyProfile, GameConfig, StartError,
};

pub use crate::cards::{Card, Deck, DeckBuilder, ImageKey, Visibility};

pub use crate::engine::{IgnoreReason, MatchPhase, RoundState, RoundTimer, SelectOutcome, Tick, Urgency};

pub use crate::assets::{AssetManifest, AssetProbe, AssetResolver, DirectoryProbe, ImageSource, PlaceholderArt};

pub use crate::session::{
    LifecyclePhase, Notice, RoundId, RoundOutcome, RoundSummary, Screen, Session, SessionEvent,
};
