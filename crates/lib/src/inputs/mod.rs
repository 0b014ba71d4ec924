//! Input collection.
//!
//! Inputs reach the pipeline two ways:
//!
//! - **Raw inputs**: every `INPUT_*` variable the runner put in the environment,
//!   except `INPUT_ENV` itself.
//! - **Declared inputs**: `<key>: <value>` lines in the multi-line `env` input.
//!
//! Raw inputs keep their `INPUT_` prefix here; it is stripped on export.

mod types;

use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::consts::{INPUT_ENV, INPUT_PREFIX};
use crate::env::EnvStore;
use crate::toolkit::Toolkit;

pub use types::InputPair;

static DECLARATION_SEPARATOR: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r":\s*").expect("Invalid regex pattern"));

/// Collect every `INPUT_*` key in `snapshot`, skipping `INPUT_ENV`.
///
/// Keys come from the snapshot, in its order. Values are read from the live
/// `env` so they reflect the store at collection time.
pub fn raw_inputs<E: EnvStore>(snapshot: &[(String, String)], env: &E) -> Vec<InputPair> {
  let reserved = format!("{}{}", INPUT_PREFIX, INPUT_ENV.to_uppercase());

  snapshot
    .iter()
    .map(|(key, _)| key)
    .filter(|key| key.starts_with(INPUT_PREFIX) && **key != reserved)
    .map(|key| InputPair::new(key.as_str(), env.var(key).unwrap_or_default()))
    .collect()
}

/// Parse the `env` input into pairs, dropping lines without a key or value.
pub fn declared_inputs<E: EnvStore, W: Write>(toolkit: &Toolkit<E, W>) -> Vec<InputPair> {
  toolkit
    .get_multiline_input(INPUT_ENV)
    .iter()
    .filter_map(|line| {
      let pair = parse_declaration(line);
      if pair.is_none() {
        debug!(line = %line, "skipping declaration without a value");
      }
      pair
    })
    .collect()
}

/// Split one `<key>: <value>` line at its first colon.
pub fn parse_declaration(line: &str) -> Option<InputPair> {
  let parts: Vec<&str> = DECLARATION_SEPARATOR.splitn(line, 2).collect();
  match parts.as_slice() {
    [key, value] if !key.is_empty() && !value.is_empty() => Some(InputPair::new(*key, *value)),
    _ => None,
  }
}
