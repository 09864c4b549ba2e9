//! Shared explorer configuration and context.
//!
//! One [`ExplorerContext`] is built per top-level collection and handed by
//! `Arc` to every declaration produced from it.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use sparrow_syntax::ViewMode;
use tracing::warn;

use crate::error::ConfigError;
use crate::location::LocationService;

/// User-facing explorer settings.
///
/// ```toml
/// view_mode = "fixed_up"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// How malformed regions of the tree are treated.
    #[serde(with = "ViewModeSetting")]
    pub view_mode: ViewMode,
}

#[derive(Deserialize)]
#[serde(remote = "ViewMode", rename_all = "snake_case")]
enum ViewModeSetting {
    SourceAccurate,
    FixedUp,
}

impl ExplorerConfig {
    /// Settings with the given view mode.
    #[must_use]
    pub fn with_view_mode(view_mode: ViewMode) -> Self {
        Self { view_mode }
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Read settings from a TOML file, falling back to defaults when the file
    /// is missing or invalid.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "using default explorer config");
                Self::default()
            }
        }
    }
}

/// State shared by one collection and every declaration it produces.
#[derive(Debug)]
pub struct ExplorerContext {
    config: ExplorerConfig,
    source: Mutex<Arc<str>>,
    location: LocationService,
    stale: AtomicBool,
}

impl ExplorerContext {
    /// Creates a context over `source`.
    #[must_use]
    pub fn new(config: ExplorerConfig, source: impl Into<Arc<str>>) -> Self {
        Self {
            config,
            source: Mutex::new(source.into()),
            location: LocationService::new(),
            stale: AtomicBool::new(false),
        }
    }

    /// Creates a shared context over `source`.
    #[must_use]
    pub fn shared(config: ExplorerConfig, source: impl Into<Arc<str>>) -> Arc<Self> {
        Arc::new(Self::new(config, source))
    }

    /// The settings this context was built with.
    #[must_use]
    pub fn config(&self) -> ExplorerConfig {
        self.config
    }

    /// The traversal view mode.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.config.view_mode
    }

    /// The current source buffer.
    #[must_use]
    pub fn source(&self) -> Arc<str> {
        Arc::clone(&self.source.lock())
    }

    /// Replaces the source buffer and marks collected declarations stale.
    pub fn set_source(&self, source: impl Into<Arc<str>>) {
        *self.source.lock() = source.into();
        self.stale.store(true, Ordering::Release);
    }

    /// The shared location service.
    #[must_use]
    pub fn location(&self) -> &LocationService {
        &self.location
    }

    /// Returns `true` once the source changed after the last collection.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    pub(crate) fn mark_fresh(&self) {
        self.stale.store(false, Ordering::Release);
    }
}
