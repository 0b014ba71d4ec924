//! Test utilities for evalenv-lib.
//!
//! Fake [`CommandRunner`]s for exercising evaluation without spawning
//! processes, plus helpers for tests that do spawn a real shell.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::execute::{CommandRunner, ExecuteError};

/// Shell used by tests that spawn real processes.
#[cfg(unix)]
pub const SH: &str = "/bin/sh";

/// Arguments running `script` under [`SH`].
#[cfg(unix)]
pub fn shell_args(script: &str) -> Vec<String> {
  vec!["-c".to_string(), script.to_string()]
}

/// One invocation seen by a [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
  pub program: String,
  pub args: Vec<String>,
  pub envs: Vec<(String, String)>,
}

/// Records every invocation and answers each with the same stdout.
#[derive(Debug)]
pub struct RecordingRunner {
  stdout: String,
  calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingRunner {
  pub fn new(stdout: &str) -> Self {
    Self {
      stdout: stdout.to_string(),
      calls: Mutex::new(Vec::new()),
    }
  }

  pub fn calls(&self) -> Vec<RecordedCall> {
    self.calls.lock().unwrap().clone()
  }
}

impl CommandRunner for RecordingRunner {
  async fn run(
    &self,
    program: &str,
    args: &[String],
    envs: &[(String, String)],
  ) -> Result<String, ExecuteError> {
    self.calls.lock().unwrap().push(RecordedCall {
      program: program.to_string(),
      args: args.to_vec(),
      envs: envs.to_vec(),
    });
    Ok(self.stdout.clone())
  }
}

/// Fails every invocation as if the command exited with status 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingRunner;

impl CommandRunner for FailingRunner {
  async fn run(
    &self,
    program: &str,
    args: &[String],
    _envs: &[(String, String)],
  ) -> Result<String, ExecuteError> {
    Err(ExecuteError::CmdFailed {
      cmd: format!("{} {}", program, args.join(" ")),
      code: Some(1),
    })
  }
}

/// Fails only the invocation whose command is `failing`; every other command
/// echoes itself back.
#[derive(Debug)]
pub struct FailOnRunner {
  failing: String,
}

impl FailOnRunner {
  pub fn new(failing: &str) -> Self {
    Self {
      failing: failing.to_string(),
    }
  }
}

impl CommandRunner for FailOnRunner {
  async fn run(
    &self,
    program: &str,
    args: &[String],
    _envs: &[(String, String)],
  ) -> Result<String, ExecuteError> {
    let command = args.last().cloned().unwrap_or_default();
    if command == self.failing {
      return Err(ExecuteError::CmdFailed {
        cmd: format!("{} {}", program, args.join(" ")),
        code: Some(1),
      });
    }
    Ok(format!("{}\n", command))
  }
}

/// Holds every invocation until `expected` of them are in flight, then lets
/// them finish with `slow` completing last.
///
/// A caller that awaits one invocation before starting the next never reaches
/// `expected` in-flight calls; after a bounded number of yields the waiting
/// call fails instead of hanging.
#[derive(Debug)]
pub struct GatedRunner {
  expected: usize,
  slow: String,
  started: AtomicUsize,
  finished: Mutex<Vec<String>>,
}

impl GatedRunner {
  const MAX_YIELDS: usize = 1_000;

  pub fn new(expected: usize, slow: &str) -> Self {
    Self {
      expected,
      slow: slow.to_string(),
      started: AtomicUsize::new(0),
      finished: Mutex::new(Vec::new()),
    }
  }

  /// Commands in the order they completed.
  pub fn finished(&self) -> Vec<String> {
    self.finished.lock().unwrap().clone()
  }
}

impl CommandRunner for GatedRunner {
  async fn run(
    &self,
    program: &str,
    args: &[String],
    _envs: &[(String, String)],
  ) -> Result<String, ExecuteError> {
    let command = args.last().cloned().unwrap_or_default();
    self.started.fetch_add(1, Ordering::SeqCst);

    let mut yields = 0;
    while self.started.load(Ordering::SeqCst) < self.expected {
      if yields == Self::MAX_YIELDS {
        return Err(ExecuteError::CmdFailed {
          cmd: format!("{} {} (started alone)", program, args.join(" ")),
          code: None,
        });
      }
      tokio::task::yield_now().await;
      yields += 1;
    }

    if command == self.slow {
      for _ in 0..self.expected * 4 {
        tokio::task::yield_now().await;
      }
    }

    self.finished.lock().unwrap().push(command.clone());
    Ok(format!("{}\n", command))
  }
}
