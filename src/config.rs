//! Library configuration.

use std::{env, ffi::OsString, path::PathBuf};

use tracing::info;

/// Backing file used when nothing else is configured, relative to the working directory.
pub const DEFAULT_LIBRARY_PATH: &str = "games.csv";
/// Environment variable that overrides [`DEFAULT_LIBRARY_PATH`].
pub const LIBRARY_PATH_ENV: &str = "GAMELOG_PATH";

/// Where the collection lives and how it is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Backing CSV file.
    pub path: PathBuf,
    /// Rewrite through a temp file plus rename instead of truncating in place.
    pub atomic_rewrite: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LIBRARY_PATH),
            atomic_rewrite: true,
        }
    }
}

impl LibraryConfig {
    /// Default settings for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Overrides [`LibraryConfig::atomic_rewrite`].
    pub fn with_atomic_rewrite(mut self, atomic: bool) -> Self {
        self.atomic_rewrite = atomic;
        self
    }

    /// Defaults, with the path taken from [`LIBRARY_PATH_ENV`] when it is set.
    pub fn from_env() -> Self {
        Self::from_path_var(env::var_os(LIBRARY_PATH_ENV))
    }

    fn from_path_var(value: Option<OsString>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(path) => {
                let config = Self::new(path);
                info!(path = %config.path.display(), "library path taken from {LIBRARY_PATH_ENV}");
                config
            }
            None => Self::default(),
        }
    }
}
