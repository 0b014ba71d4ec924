//! Subprocess execution.
//!
//! Evaluation only needs "run this program, give me its stdout". That is the
//! [`CommandRunner`] seam; [`ShellRunner`] implements it with `tokio::process`.

use std::future::Future;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use super::types::ExecuteError;

/// Runs a program to completion and captures its stdout.
pub trait CommandRunner {
  /// Run `program` with `args`, overlaying `envs` on the inherited environment.
  ///
  /// Resolves to the untrimmed stdout on a zero exit status.
  fn run(
    &self,
    program: &str,
    args: &[String],
    envs: &[(String, String)],
  ) -> impl Future<Output = Result<String, ExecuteError>>;
}

/// Spawns real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
  async fn run(
    &self,
    program: &str,
    args: &[String],
    envs: &[(String, String)],
  ) -> Result<String, ExecuteError> {
    let cmd = format!("{} {}", program, shell_words::join(args));
    info!(cmd = %cmd, "executing command");

    let output = Command::new(program)
      .args(args)
      .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
      .stdin(Stdio::null())
      .output()
      .await
      .map_err(|source| ExecuteError::Spawn {
        program: program.to_string(),
        source,
      })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
      debug!(stderr = %stderr, "command stderr");
    }

    if !output.status.success() {
      return Err(ExecuteError::CmdFailed {
        cmd,
        code: output.status.code(),
      });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    debug!(stdout = %stdout, "command output");

    Ok(stdout)
  }
}
