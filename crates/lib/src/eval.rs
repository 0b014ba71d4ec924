//! Value evaluation.
//!
//! Every input value is either a *plain value*, exported verbatim, or a *shell
//! expression*, run through the current shell with its stdout exported instead.
//! The split is a heuristic: anything made only of word characters, whitespace
//! and hyphens is plain, unless it starts with a command that prints its
//! arguments (`echo`, `print`, `cat`).
//!
//! ```text
//! NAME DOE      -> plain, exported as-is
//! $USER         -> sh -c "echo $USER"
//! echo $USER    -> sh -c "echo $USER"
//! cat VERSION   -> sh -c "cat VERSION"
//! ```
//!
//! Known misclassifications: `rm -rf` counts as plain (and is never executed),
//! `category` is an expression because it starts with `cat`.

use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::consts::{DEFAULT_SHELL, INPUT_SHELL, OUTPUT_COMMANDS, SHELL_VAR};
use crate::env::EnvStore;
use crate::execute::{CommandRunner, ExecuteError};
use crate::toolkit::Toolkit;

static PLAIN_VALUE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\s-]+$").expect("Invalid regex pattern"));
static OUTPUT_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(r"^\s*({})", OUTPUT_COMMANDS.join("|"))).expect("Invalid regex pattern")
});

/// Resolve the shell: the `shell` input, then `$SHELL`, then `sh`.
pub fn current_shell<E: EnvStore, W: Write>(toolkit: &Toolkit<E, W>) -> String {
  let input = toolkit.get_input(INPUT_SHELL);
  if !input.is_empty() {
    return input;
  }

  toolkit
    .env()
    .var(SHELL_VAR)
    .filter(|shell| !shell.is_empty())
    .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

/// Whether `s` is exported verbatim rather than evaluated.
pub fn is_plain_value(s: &str) -> bool {
  PLAIN_VALUE.is_match(s) && !OUTPUT_COMMAND.is_match(s)
}

/// Make sure `s` prints something: prepend `echo ` unless it already starts
/// with an output command.
pub fn transform(s: &str) -> String {
  let s = s.trim_start();

  if OUTPUT_COMMAND.is_match(s) {
    return s.to_string();
  }

  format!("echo {}", s)
}

/// Evaluate a single input value.
///
/// Plain values resolve to themselves without spawning anything. Everything else
/// runs as `<shell> -c <transform(value)>` and resolves to the untrimmed stdout.
pub async fn evaluate<E, W, R>(
  toolkit: &Toolkit<E, W>,
  runner: &R,
  value: &str,
) -> Result<String, ExecuteError>
where
  E: EnvStore,
  W: Write,
  R: CommandRunner,
{
  if is_plain_value(value) {
    debug!(value = %value, "plain value");
    return Ok(value.to_string());
  }

  let shell = current_shell(toolkit);
  let mut argv = shell_words::split(&shell).map_err(|e| ExecuteError::InvalidShell {
    shell: shell.clone(),
    reason: e.to_string(),
  })?;
  if argv.is_empty() {
    return Err(ExecuteError::InvalidShell {
      shell,
      reason: "no program given".to_string(),
    });
  }

  let program = argv.remove(0);
  argv.push("-c".to_string());
  argv.push(transform(value));

  runner.run(&program, &argv, &toolkit.env().vars()).await
}
