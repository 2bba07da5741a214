//! Running the engine as a subprocess.
//!
//! [`CommandRunner`] is the seam between the typed client and the operating
//! system. [`ProcessRunner`] is the real implementation; tests substitute
//! their own runner to script engine output.

use std::future::Future;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::ExecError;

/// Executes a program with arguments and captures its standard output.
///
/// Implementations complete exactly once: with the captured stdout when the
/// program ran and exited successfully, or with an [`ExecError`] otherwise.
/// Arguments are passed as a real argument vector, never through a shell.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Spawn`] if the program cannot be started and
    /// [`ExecError::Failed`] if it exits unsuccessfully.
    fn run(
        &self,
        program: &Path,
        args: &[String],
    ) -> impl Future<Output = Result<String, ExecError>> + Send;
}

/// Runs the engine with [`tokio::process`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<String, ExecError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ExecError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExecError::Failed {
                program: program.to_path_buf(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
