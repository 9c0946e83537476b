//! Game configuration types.
//!
//! - `Difficulty`: Label selecting a built-in grid and time budget
//! - `DifficultyProfile`: Columns, rows and time budget for one round
//! - `GameConfig`: Everything a session needs, loadable from TOML
//!
//! Grids are validated before any round is built: a grid with no cells or an
//! odd number of cells cannot be dealt as pairs and is rejected.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Extensions tried, in order, when an image cannot be found as named.
pub const DEFAULT_EXTENSION_VARIANTS: [&str; 4] = [".png", ".jpg", ".jpeg", ".webp"];

/// Difficulty label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "facil")]
    Easy,
    #[default]
    #[serde(alias = "medio")]
    Medium,
    #[serde(alias = "dificil")]
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse a label, accepting the legacy kiosk aliases.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" | "facil" => Some(Difficulty::Easy),
            "medium" | "medio" => Some(Difficulty::Medium),
            "hard" | "dificil" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a label, falling back to `Medium` for anything unknown.
    #[must_use]
    pub fn from_label_lenient(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }

    /// Canonical label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Built-in profile for this difficulty.
    #[must_use]
    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile::new(4, 3, 45),
            Difficulty::Medium => DifficultyProfile::new(5, 4, 60),
            Difficulty::Hard => DifficultyProfile::new(6, 5, 90),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Grid shape and time budget for a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub columns: u16,
    pub rows: u16,
    /// Countdown length in seconds.
    pub time_budget_secs: u32,
}

impl DifficultyProfile {
    #[must_use]
    pub const fn new(columns: u16, rows: u16, time_budget_secs: u32) -> Self {
        Self { columns, rows, time_budget_secs }
    }

    /// Number of card slots on the board.
    #[must_use]
    pub fn cells(&self) -> u32 {
        u32::from(self.columns) * u32::from(self.rows)
    }

    /// Number of pairs this grid holds.
    ///
    /// Fails for empty or odd grids.
    pub fn pair_count(&self) -> Result<usize, ConfigError> {
        let cells = self.cells();
        if cells == 0 {
            return Err(ConfigError::EmptyGrid { columns: self.columns, rows: self.rows });
        }
        if cells % 2 != 0 {
            return Err(ConfigError::OddGrid { columns: self.columns, rows: self.rows, cells });
        }
        Ok((cells / 2) as usize)
    }

    /// Check that a round can be played with this profile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pair_count()?;
        if self.time_budget_secs == 0 {
            return Err(ConfigError::ZeroTimeBudget);
        }
        Ok(())
    }
}

/// Complete game configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Selected difficulty.
    pub difficulty: Difficulty,

    /// Grid that overrides the difficulty lookup when set.
    pub custom_grid: Option<DifficultyProfile>,

    /// Directory image names are resolved against.
    pub image_dir: PathBuf,

    /// Image pool for card faces, in preference order.
    pub images: Vec<String>,

    /// Extensions probed when an image is missing as named.
    pub extension_variants: Vec<String>,

    /// How long a mismatched pair stays face up.
    pub mismatch_delay_ms: u64,

    /// Inactivity on the end screen before a new round starts. Zero disables.
    pub idle_timeout_secs: u64,

    /// Fixed shuffle seed for reproducible rounds.
    pub shuffle_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            custom_grid: None,
            image_dir: PathBuf::from("img"),
            images: (1..=6).map(|i| format!("img{i}.png")).collect(),
            extension_variants: DEFAULT_EXTENSION_VARIANTS.iter().map(|s| (*s).to_string()).collect(),
            mismatch_delay_ms: 950,
            idle_timeout_secs: 60,
            shuffle_seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), difficulty = %config.difficulty, "config loaded");
        Ok(config)
    }

    /// Set the difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Override the grid and time budget.
    #[must_use]
    pub fn with_custom_grid(mut self, profile: DifficultyProfile) -> Self {
        self.custom_grid = Some(profile);
        self
    }

    /// Replace the image pool.
    #[must_use]
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Profile in effect for the next round.
    #[must_use]
    pub fn profile(&self) -> DifficultyProfile {
        self.custom_grid.unwrap_or_else(|| self.difficulty.profile())
    }

    /// Built-in difficulty in effect, or `None` when a custom grid overrides it.
    #[must_use]
    pub fn active_difficulty(&self) -> Option<Difficulty> {
        self.custom_grid.is_none().then_some(self.difficulty)
    }

    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    /// `None` when the watchdog is disabled.
    #[must_use]
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }

    /// Check that every round this config can produce is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile().validate()?;
        if self.mismatch_delay_ms == 0 {
            return Err(ConfigError::ZeroMismatchDelay);
        }
        Ok(())
    }
}
