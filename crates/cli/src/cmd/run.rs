//! Implementation of the `evalenv` run.
//!
//! Evaluates every action input against the real process environment and
//! exports the results for later steps.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::error;

use evalenv_lib::env::{EnvStore, ProcessEnv};
use evalenv_lib::execute::{ExecuteReport, ShellRunner, execute};
use evalenv_lib::toolkit::Toolkit;

use crate::output::{self, OutputFormat, print_export, print_json, print_success, print_warning};

#[derive(Serialize)]
struct RunSummary<'a> {
  #[serde(flatten)]
  report: &'a ExecuteReport,
  elapsed_ms: u128,
}

/// Execute the pipeline.
///
/// Failures are reported to the runner with `::error::` before being returned,
/// so the step is marked failed with the underlying message.
pub fn cmd_run(env_file: Option<PathBuf>, format: OutputFormat) -> Result<()> {
  let mut toolkit = Toolkit::new(ProcessEnv, io::stdout()).with_env_file(env_file);

  let start = Instant::now();
  match run_pipeline(&mut toolkit) {
    Ok(report) => print_summary(&report, start.elapsed(), format),
    Err(err) => {
      let message = format!("{:#}", err);
      error!(error = %message, "run failed");
      toolkit
        .set_failed(&message)
        .context("Failed to report failure to the runner")?;
      Err(err)
    }
  }
}

fn run_pipeline(toolkit: &mut Toolkit<ProcessEnv, Stdout>) -> Result<ExecuteReport> {
  // Single-threaded so exports never race another thread reading the environment.
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;

  let snapshot = toolkit.env().vars();
  rt.block_on(execute(toolkit, &ShellRunner, &snapshot))
    .context("Failed to export inputs")
}

fn print_summary(report: &ExecuteReport, elapsed: Duration, format: OutputFormat) -> Result<()> {
  if format.is_json() {
    return print_json(&RunSummary {
      report,
      elapsed_ms: elapsed.as_millis(),
    });
  }

  for export in &report.exports {
    print_export(&export.input, &export.name);
  }
  if report.overridden() > 0 {
    print_warning(&format!("{} existing variable(s) overridden", report.overridden()));
  }
  print_success(&format!(
    "Exported {} variable(s), {} evaluated by the shell in {}",
    report.exports.len(),
    report.evaluated,
    output::format_duration(elapsed)
  ));

  Ok(())
}
