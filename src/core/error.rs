//! Error types.
//!
//! Configuration problems are rejected up front by `GameConfig::validate`.
//! Asset problems are recovered locally where possible; only a pool in which
//! nothing resolves is reported as an error.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Grid has no cells.
    #[error("grid {columns}x{rows} has no cells")]
    EmptyGrid { columns: u16, rows: u16 },

    /// Grid has an odd number of cells, so cards cannot be paired.
    #[error("grid {columns}x{rows} has {cells} cells; an even count is required")]
    OddGrid { columns: u16, rows: u16, cells: u32 },

    /// Round would end before it starts.
    #[error("time budget must be at least one second")]
    ZeroTimeBudget,

    /// Mismatched cards would hide before they are shown.
    #[error("mismatch delay must be greater than zero")]
    ZeroMismatchDelay,

    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for `GameConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Asset resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// None of the configured images could be found under any extension.
    #[error("none of the {attempted} configured images could be loaded; check the file names")]
    NothingResolved { attempted: usize },
}

/// Why a round could not be dealt.
#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Assets(#[from] AssetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::OddGrid { columns: 3, rows: 3, cells: 9 };
        assert_eq!(err.to_string(), "grid 3x3 has 9 cells; an even count is required");

        let err = ConfigError::EmptyGrid { columns: 0, rows: 4 };
        assert_eq!(err.to_string(), "grid 0x4 has no cells");
    }

    #[test]
    fn test_asset_error_message() {
        let err = AssetError::NothingResolved { attempted: 6 };
        assert!(err.to_string().contains("none of the 6 configured images"));

        let start: StartError = err.into();
        assert!(matches!(start, StartError::Assets(_)));
        assert!(start.to_string().starts_with("none of the 6"));
    }
}
