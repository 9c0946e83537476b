//! Core engine types: configuration, errors, RNG.
//!
//! Everything here is independent of how a round is played. Sessions read a
//! `GameConfig`, validate it once, and shuffle each deck with a `DeckRng`.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{Difficulty, DifficultyProfile, GameConfig, DEFAULT_EXTENSION_VARIANTS};
pub use error::{AssetError, ConfigError, StartError};
pub use rng::DeckRng;
