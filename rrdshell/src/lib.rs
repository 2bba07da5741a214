//! # rrdshell
//!
//! Typed async interface to the `rrdtool` round-robin database engine.
//!
//! rrdshell drives the `rrdtool` executable as a subprocess. It builds the
//! argument vector for each engine action and decodes the engine's text
//! output (usage banner, `info` key/value blocks, `fetch` tables) into
//! typed values. The engine itself, and the on-disk RRD format, stay
//! entirely external.
//!
//! **Status**: This crate is in early development. The API is not yet stable.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::{Duration, SystemTime};
//! use rrdshell::{unix_time, ConsolidationFn, RrdConfig, RrdTool};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rrd = RrdTool::new(RrdConfig::from_env());
//!
//! let end = unix_time(SystemTime::now());
//! let start = unix_time(SystemTime::now() - Duration::from_secs(3600));
//!
//! let window = rrd
//!     .fetch("load.rrd", ConsolidationFn::Average, start, end, Some(60))
//!     .await?;
//!
//! for ts in window.timestamps().into_iter().flatten() {
//!     println!("{ts}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`RrdTool`] — Client; one async method per engine action
//! - [`RrdConfig`] — Which executable to run
//! - [`CommandRunner`] — Seam for executing the engine; [`ProcessRunner`] is the real one
//!
//! ## Modules
//!
//! - [`command`] — Argument builders for each action
//! - [`parse`] — Decoders for each output shape
//! - [`consolidate`] — Consolidation function names
//! - [`time`] — Timestamp conversion
//! - [`config`] — Executable configuration
//! - [`exec`] — Subprocess execution
//! - [`error`] — Error types

pub mod client;
pub mod command;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod exec;
pub mod parse;
pub mod time;

// Re-export primary API types at crate root for convenience.
pub use client::RrdTool;
pub use config::RrdConfig;
pub use consolidate::ConsolidationFn;
pub use error::{ExecError, ParseError, Result, RrdError, UnknownConsolidationFn};
pub use exec::{CommandRunner, ProcessRunner};
pub use parse::{DataSourceInfo, FetchResult, InfoRecord, InfoValue};
pub use time::unix_time;
