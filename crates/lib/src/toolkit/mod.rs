//! Host CI platform facilities.
//!
//! [`Toolkit`] is the pipeline's only window onto the runner: it reads action
//! inputs out of the environment, issues workflow commands, and exports
//! variables for later steps. The environment sits behind an [`EnvStore`] and
//! commands go to any [`Write`], so tests can run it against memory.

pub mod command;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::consts::{DELIMITER_PREFIX, INPUT_PREFIX};
use crate::env::EnvStore;

pub use command::{LINE_ENDING, WorkflowCommand};

/// Errors raised by the toolkit.
#[derive(Debug, Error)]
pub enum ToolkitError {
  /// A required input was empty or unset.
  #[error("Input required and not supplied: {0}")]
  InputRequired(String),

  /// The name or value cannot be stored in an environment.
  #[error("Invalid environment variable {0:?}")]
  InvalidVariable(String),

  /// The configured env file does not exist.
  #[error("Missing file at path: {}", .0.display())]
  MissingEnvFile(PathBuf),

  /// The exported name or value collides with the generated heredoc delimiter.
  #[error("Unexpected input: {field} should not contain the delimiter \"{delimiter}\"")]
  Delimiter { field: &'static str, delimiter: String },

  /// Writing a command or appending to the env file failed.
  #[error("io error: {0}")]
  Io(#[from] io::Error),
}

/// Access to action inputs, workflow commands and exported variables.
#[derive(Debug)]
pub struct Toolkit<E, W = io::Stdout> {
  env: E,
  output: W,
  env_file: Option<PathBuf>,
}

impl<E: EnvStore, W: Write> Toolkit<E, W> {
  pub fn new(env: E, output: W) -> Self {
    Self {
      env,
      output,
      env_file: None,
    }
  }

  /// Append exports to this file (the runner's `GITHUB_ENV`) in addition to
  /// updating the store.
  pub fn with_env_file(mut self, path: Option<PathBuf>) -> Self {
    self.env_file = path;
    self
  }

  pub fn env(&self) -> &E {
    &self.env
  }

  pub fn output(&self) -> &W {
    &self.output
  }

  /// Read a single-line input. Missing inputs read as the empty string.
  pub fn get_input(&self, name: &str) -> String {
    self.env.var(&input_key(name)).unwrap_or_default().trim().to_string()
  }

  /// Like [`get_input`](Self::get_input) but fails on an empty value.
  pub fn get_input_required(&self, name: &str) -> Result<String, ToolkitError> {
    let value = self.get_input(name);
    if value.is_empty() {
      return Err(ToolkitError::InputRequired(name.to_string()));
    }
    Ok(value)
  }

  /// Read a multi-line input as its non-empty lines, each trimmed.
  pub fn get_multiline_input(&self, name: &str) -> Vec<String> {
    self
      .env
      .var(&input_key(name))
      .unwrap_or_default()
      .split('\n')
      .filter(|line| !line.is_empty())
      .map(|line| line.trim().to_string())
      .collect()
  }

  pub fn warning(&mut self, message: &str) -> Result<(), ToolkitError> {
    self.issue(&WorkflowCommand::new("warning", message))
  }

  /// Mark the step failed. The caller is responsible for the exit code.
  pub fn set_failed(&mut self, message: &str) -> Result<(), ToolkitError> {
    self.issue(&WorkflowCommand::new("error", message))
  }

  /// Set `name` for this process and every later step.
  pub fn export_variable(&mut self, name: &str, value: &str) -> Result<(), ToolkitError> {
    if name.is_empty() || name.contains(['=', '\0']) || value.contains('\0') {
      return Err(ToolkitError::InvalidVariable(name.to_string()));
    }

    self.env.set_var(name, value);

    match &self.env_file {
      Some(path) => {
        debug!(name = %name, path = %path.display(), "appending to env file");
        append_file_command(path, &key_value_message(name, value)?)
      }
      None => self.issue(&WorkflowCommand::new("set-env", value).with_property("name", name)),
    }
  }

  fn issue(&mut self, command: &WorkflowCommand<'_>) -> Result<(), ToolkitError> {
    write!(self.output, "{}{}", command, LINE_ENDING)?;
    self.output.flush()?;
    Ok(())
  }
}

/// Environment key holding the input `name`.
fn input_key(name: &str) -> String {
  format!("{}{}", INPUT_PREFIX, name.replace(' ', "_").to_uppercase())
}

/// Heredoc-style `name<<delim` block understood by the runner's env file parser.
fn key_value_message(name: &str, value: &str) -> Result<String, ToolkitError> {
  let delimiter = format!("{}{}", DELIMITER_PREFIX, Uuid::new_v4());

  if name.contains(&delimiter) {
    return Err(ToolkitError::Delimiter { field: "name", delimiter });
  }
  if value.contains(&delimiter) {
    return Err(ToolkitError::Delimiter { field: "value", delimiter });
  }

  Ok(format!(
    "{name}<<{delimiter}{eol}{value}{eol}{delimiter}",
    eol = LINE_ENDING
  ))
}

fn append_file_command(path: &Path, message: &str) -> Result<(), ToolkitError> {
  if !path.exists() {
    return Err(ToolkitError::MissingEnvFile(path.to_path_buf()));
  }

  let mut file = OpenOptions::new().append(true).open(path)?;
  write!(file, "{}{}", message, LINE_ENDING)?;
  Ok(())
}
