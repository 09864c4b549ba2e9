//! Errors surfaced by the explorer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the top-level collection entry points.
///
/// Parsing and classification never fail: parse errors are recovered into
/// the tree and unusual shapes resolve to `Empty` or `Unsupported` values.
/// Only loading the source can.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The source file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors while loading an [`ExplorerConfig`](crate::ExplorerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Invalid(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let error = ExplorerError::Io {
            path: PathBuf::from("missing.swift"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(error.to_string(), "failed to read 'missing.swift': not found");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_config_wraps_toml_error() {
        let error = ConfigError::from(toml::from_str::<toml::Table>("view_mode = ").unwrap_err());
        assert!(error.to_string().starts_with("invalid config: "));
    }
}
