//! Types for input evaluation and export.

use serde::Serialize;
use thiserror::Error;

use crate::toolkit::ToolkitError;

/// Errors that can occur while evaluating or exporting inputs.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The shell selection could not be split into a program and arguments.
  #[error("invalid shell {shell:?}: {reason}")]
  InvalidShell { shell: String, reason: String },

  /// The shell could not be started.
  #[error("failed to spawn {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// Command execution failed.
  #[error("command failed with exit code {code:?}: {cmd}")]
  CmdFailed { cmd: String, code: Option<i32> },

  /// Reading inputs or exporting a variable failed.
  #[error(transparent)]
  Toolkit(#[from] ToolkitError),
}

/// Outcome of exporting one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
  /// Name the input was collected under.
  pub input: String,
  /// Name of the exported variable.
  pub name: String,
  /// Whether a non-empty value was already set under `name`.
  pub overridden: bool,
}

/// Summary of a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecuteReport {
  /// Exports in the order they were written.
  pub exports: Vec<ExportRecord>,
  /// How many values went through the shell.
  pub evaluated: usize,
}

impl ExecuteReport {
  pub fn overridden(&self) -> usize {
    self.exports.iter().filter(|e| e.overridden).count()
  }
}
