//! Configuration for locating the engine executable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Program name used when no path is configured.
pub const DEFAULT_PROGRAM: &str = "rrdtool";

/// Environment variable read by [`RrdConfig::from_env`].
pub const PATH_ENV_VAR: &str = "RRDTOOL_PATH";

/// Immutable settings shared by every call made through an
/// [`RrdTool`](crate::RrdTool).
///
/// # Example
///
/// ```rust
/// use rrdshell::RrdConfig;
///
/// assert_eq!(RrdConfig::default().path().to_str(), Some("rrdtool"));
///
/// let config = RrdConfig::with_path("/opt/rrdtool/bin/rrdtool");
/// assert_eq!(config.path().to_str(), Some("/opt/rrdtool/bin/rrdtool"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RrdConfig {
    /// Executable to run: an absolute or relative path, or a bare name
    /// resolved through `PATH`.
    pub path: PathBuf,
}

impl Default for RrdConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PROGRAM),
        }
    }
}

impl RrdConfig {
    /// Creates a configuration that runs the given executable.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Builds a configuration from `RRDTOOL_PATH`, falling back to the
    /// default program name when the variable is unset or empty.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var_os(PATH_ENV_VAR))
    }

    fn from_env_value(value: Option<std::ffi::OsString>) -> Self {
        match value {
            Some(path) if !path.is_empty() => Self::with_path(path),
            _ => Self::default(),
        }
    }

    /// The executable that will be invoked.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
