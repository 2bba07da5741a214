//! Error types for rrdshell.
//!
//! Failures fall into two disjoint classes: the engine could not be run
//! (or exited unsuccessfully), or it ran but its output did not have the
//! shape the action expects. Callers tell them apart by matching on
//! [`RrdError`].

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for all rrdshell operations.
#[derive(Error, Debug)]
pub enum RrdError {
    /// The engine could not be executed or reported failure.
    #[error("execution error: {0}")]
    Exec(#[from] ExecError),

    /// The engine ran but its output could not be interpreted.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl RrdError {
    /// Returns `true` if this is an execution failure.
    pub fn is_exec(&self) -> bool {
        matches!(self, Self::Exec(_))
    }

    /// Returns `true` if this is a parse failure.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Errors raised while running the external engine.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program could not be started (not found, not executable, ...).
    #[error("failed to spawn '{}': {source}", program.display())]
    Spawn {
        /// The program that was invoked.
        program: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully.
    #[error("'{}' exited with {}: {stderr}", program.display(), describe_code(*code))]
    Failed {
        /// The program that was invoked.
        program: PathBuf,
        /// Exit code, or `None` if the process was terminated by a signal.
        code: Option<i32>,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Errors raised when engine output does not match the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The help output did not begin with a version banner.
    #[error("version string not found")]
    VersionNotFound,
}

/// Error returned when parsing an unknown consolidation function name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown consolidation function '{0}' (expected AVERAGE, MIN, MAX or LAST)")]
pub struct UnknownConsolidationFn(pub String);

/// Type alias for `Result<T, RrdError>`.
pub type Result<T> = std::result::Result<T, RrdError>;
