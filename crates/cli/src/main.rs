mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// evalenv - Evaluate action inputs and export them as environment variables
#[derive(Parser)]
#[command(name = "evalenv")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,

  /// File to append exports to (defaults to the runner's $GITHUB_ENV)
  #[arg(long, env = "GITHUB_ENV")]
  env_file: Option<PathBuf>,

  /// Format of the summary printed to stderr
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  // Logs go to stderr; stdout is reserved for workflow commands.
  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let env_file = cli.env_file.filter(|path| !path.as_os_str().is_empty());

  match cmd::cmd_run(env_file, cli.format) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("Error: {:#}", err);
      ExitCode::FAILURE
    }
  }
}
