//! Pipeline orchestration.
//!
//! [`execute`] runs the whole pipeline against a [`Toolkit`]:
//!
//! 1. Collect raw `INPUT_*` pairs from the environment snapshot
//! 2. Append the declared pairs from the `env` input
//! 3. Evaluate every value concurrently, failing on the first error
//! 4. Export the results in order, stripping the `INPUT_` prefix
//!
//! Nothing is exported unless every evaluation succeeds.

mod runner;
mod types;

use std::io::Write;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::consts::INPUT_PREFIX;
use crate::env::EnvStore;
use crate::eval::{evaluate, is_plain_value};
use crate::inputs::{InputPair, declared_inputs, raw_inputs};
use crate::toolkit::Toolkit;

pub use runner::{CommandRunner, ShellRunner};
pub use types::{ExecuteError, ExecuteReport, ExportRecord};

/// Run the full collect, evaluate, export pipeline.
pub async fn execute<E, W, R>(
  toolkit: &mut Toolkit<E, W>,
  runner: &R,
  snapshot: &[(String, String)],
) -> Result<ExecuteReport, ExecuteError>
where
  E: EnvStore,
  W: Write,
  R: CommandRunner,
{
  let resolved = {
    let toolkit = &*toolkit;

    let mut collected = raw_inputs(snapshot, toolkit.env());
    collected.extend(declared_inputs(toolkit));
    info!(inputs = collected.len(), "collected inputs");

    try_join_all(collected.iter().map(|pair| async move {
      let value = evaluate(toolkit, runner, &pair.value).await?;
      let evaluated = !is_plain_value(&pair.value);
      Ok::<_, ExecuteError>((InputPair::new(pair.name.as_str(), value), evaluated))
    }))
    .await?
  };

  let mut report = ExecuteReport {
    evaluated: resolved.iter().filter(|(_, evaluated)| *evaluated).count(),
    ..Default::default()
  };
  for (pair, _) in &resolved {
    report.exports.push(export_env(toolkit, pair)?);
  }

  info!(
    exported = report.exports.len(),
    evaluated = report.evaluated,
    "export complete"
  );
  Ok(report)
}

/// Export one pair under its name minus the first `INPUT_`, warning if that
/// overrides a non-empty variable.
pub fn export_env<E, W>(
  toolkit: &mut Toolkit<E, W>,
  pair: &InputPair,
) -> Result<ExportRecord, ExecuteError>
where
  E: EnvStore,
  W: Write,
{
  let name = pair.name.replacen(INPUT_PREFIX, "", 1);

  let overridden = toolkit.env().var(&name).is_some_and(|v| !v.is_empty());
  if overridden {
    warn!(name = %name, "overriding existing variable");
    toolkit.warning(&format!("Override existing ${}", name))?;
  }

  debug!(name = %name, input = %pair.name, "exporting");
  toolkit.export_variable(&name, &pair.value)?;

  Ok(ExportRecord {
    input: pair.name.clone(),
    name,
    overridden,
  })
}
