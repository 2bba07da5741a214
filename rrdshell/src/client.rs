//! The typed client: one async method per engine action.
//!
//! Every method follows the same flow. Arguments are built by
//! [`command`](crate::command), the configured program is run through a
//! [`CommandRunner`], and on success the captured output is decoded by
//! [`parse`](crate::parse). An execution failure is returned as
//! [`RrdError::Exec`](crate::RrdError::Exec) without the output ever
//! reaching a parser.
//!
//! The client holds no mutable state and can be cloned freely. It does not
//! serialize calls: issuing two concurrent updates against the same file is
//! the caller's problem to avoid.

use std::path::Path;

use tracing::{debug, warn};

use crate::command;
use crate::config::RrdConfig;
use crate::consolidate::ConsolidationFn;
use crate::error::Result;
use crate::exec::{CommandRunner, ProcessRunner};
use crate::parse::{self, FetchResult, InfoRecord};

/// Handle for issuing commands to the engine.
///
/// # Example
///
/// ```rust,no_run
/// use rrdshell::{ConsolidationFn, RrdConfig, RrdTool};
///
/// # async fn run() -> rrdshell::Result<()> {
/// let rrd = RrdTool::new(RrdConfig::default());
/// println!("{}", rrd.version().await?);
///
/// rrd.create(
///     "load.rrd",
///     &["DS:temp:GAUGE:600:U:U"],
///     &["RRA:AVERAGE:0.5:1:1200"],
/// )
/// .await?;
/// rrd.update("load.rrd", &["N:21.5"]).await?;
///
/// let window = rrd
///     .fetch("load.rrd", ConsolidationFn::Average, 1_364_374_210, 1_364_407_660, None)
///     .await?;
/// println!("{:?}", window.headers);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RrdTool<R = ProcessRunner> {
    config: RrdConfig,
    runner: R,
}

impl RrdTool<ProcessRunner> {
    /// Creates a client that runs the engine as a real subprocess.
    pub fn new(config: RrdConfig) -> Self {
        Self::with_runner(config, ProcessRunner)
    }
}

impl<R: CommandRunner> RrdTool<R> {
    /// Creates a client with a custom runner.
    pub fn with_runner(config: RrdConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// The configuration in use.
    pub fn config(&self) -> &RrdConfig {
        &self.config
    }

    /// The executable every call invokes.
    pub fn path(&self) -> &Path {
        self.config.path()
    }

    /// Returns the engine's version banner, e.g. `RRDtool 1.7.2`.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the engine cannot be run, or
    /// [`ParseError::VersionNotFound`](crate::ParseError::VersionNotFound)
    /// if its usage text has no banner.
    pub async fn version(&self) -> Result<String> {
        let output = self.exec(command::version_args()).await?;
        parse::parse_version(&output)
    }

    /// Describes the data sources of a database file.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the engine cannot be run or rejects
    /// the file.
    pub async fn info(&self, file: impl AsRef<Path>) -> Result<InfoRecord> {
        let output = self.exec(command::info_args(file.as_ref())).await?;
        Ok(parse::parse_info(&output))
    }

    /// Fetches consolidated samples between `start` and `end` (Unix
    /// seconds).
    ///
    /// Without a `resolution` the engine uses the archive's native step.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the engine cannot be run or rejects
    /// the request.
    pub async fn fetch(
        &self,
        file: impl AsRef<Path>,
        cf: ConsolidationFn,
        start: i64,
        end: i64,
        resolution: Option<u64>,
    ) -> Result<FetchResult> {
        let args = command::fetch_args(file.as_ref(), cf, start, end, resolution);
        let output = self.exec(args).await?;
        Ok(parse::parse_fetch(&output))
    }

    /// Creates a database file from data source and archive definitions.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the engine cannot be run or rejects
    /// the definitions.
    pub async fn create<D, A>(
        &self,
        file: impl AsRef<Path>,
        data_sources: &[D],
        archives: &[A],
    ) -> Result<()>
    where
        D: AsRef<str>,
        A: AsRef<str>,
    {
        let output = self
            .exec(command::create_args(file.as_ref(), data_sources, archives))
            .await?;
        parse::parse_ack(&output);
        Ok(())
    }

    /// Appends values (`timestamp:value[:value...]`) to a database file.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the engine cannot be run or rejects
    /// the values.
    pub async fn update<V: AsRef<str>>(&self, file: impl AsRef<Path>, values: &[V]) -> Result<()> {
        let output = self.exec(command::update_args(file.as_ref(), values)).await?;
        parse::parse_ack(&output);
        Ok(())
    }

    async fn exec(&self, args: Vec<String>) -> Result<String> {
        let program = self.config.path();
        debug!(program = %program.display(), ?args, "running rrdtool");

        match self.runner.run(program, &args).await {
            Ok(output) => {
                debug!(bytes = output.len(), "rrdtool finished");
                Ok(output)
            }
            Err(e) => {
                warn!(program = %program.display(), ?args, error = %e, "rrdtool failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExecError, RrdError};

    struct FailingRunner;

    impl CommandRunner for FailingRunner {
        async fn run(
            &self,
            program: &Path,
            _args: &[String],
        ) -> std::result::Result<String, ExecError> {
            Err(ExecError::Failed {
                program: program.to_path_buf(),
                code: Some(1),
                stderr: "ERROR: boom".to_string(),
            })
        }
    }

    #[test]
    fn test_default_path() {
        let rrd: RrdTool = RrdTool::default();
        assert_eq!(rrd.path(), Path::new("rrdtool"));

        let rrd = RrdTool::new(RrdConfig::with_path("bad_command"));
        assert_eq!(rrd.path(), Path::new("bad_command"));
    }

    #[tokio::test]
    async fn test_version_failure_is_exec_not_parse() {
        let rrd = RrdTool::with_runner(RrdConfig::default(), FailingRunner);
        let err = rrd.version().await.unwrap_err();
        assert!(err.is_exec(), "got {err:?}");
    }

    #[tokio::test]
    async fn test_every_action_propagates_exec_error() {
        let rrd = RrdTool::with_runner(RrdConfig::default(), FailingRunner);

        assert!(matches!(rrd.info("a.rrd").await, Err(RrdError::Exec(_))));
        assert!(matches!(
            rrd.fetch("a.rrd", ConsolidationFn::Max, 0, 10, None).await,
            Err(RrdError::Exec(_))
        ));
        assert!(matches!(
            rrd.create("a.rrd", &["DS:x:GAUGE:600:U:U"], &["RRA:LAST:0.5:1:10"])
                .await,
            Err(RrdError::Exec(_))
        ));
        assert!(matches!(
            rrd.update("a.rrd", &["N:1"]).await,
            Err(RrdError::Exec(_))
        ));
    }
}
