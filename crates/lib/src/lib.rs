//! evalenv-lib: evaluate action inputs and export them as environment variables.
//!
//! The pipeline reads `INPUT_*` variables and `<key>: <value>` declarations,
//! runs anything that looks like a shell expression through the current shell,
//! and exports the results for later CI steps:
//!
//! - [`inputs`]: raw and declared input collection
//! - [`eval`]: literal/expression classification and shell evaluation
//! - [`execute`]: the orchestrator and exporter
//! - [`toolkit`]: the CI runner's input, command and env-file facilities
//! - [`env`]: the environment store the pipeline reads and writes

pub mod consts;
pub mod env;
pub mod eval;
pub mod execute;
pub mod inputs;
pub mod toolkit;
pub mod util;
