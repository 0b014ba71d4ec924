//! Workflow command formatting.
//!
//! A workflow command is a single stdout line of the form
//! `::name key=value,key=value::message` that the CI runner intercepts.

use std::fmt;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// A single workflow command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCommand<'a> {
  pub name: &'a str,
  pub properties: Vec<(&'a str, &'a str)>,
  pub message: &'a str,
}

impl<'a> WorkflowCommand<'a> {
  pub fn new(name: &'a str, message: &'a str) -> Self {
    Self {
      name,
      properties: Vec::new(),
      message,
    }
  }

  pub fn with_property(mut self, key: &'a str, value: &'a str) -> Self {
    self.properties.push((key, value));
    self
  }
}

impl fmt::Display for WorkflowCommand<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "::{}", self.name)?;
    for (i, (key, value)) in self.properties.iter().filter(|(_, v)| !v.is_empty()).enumerate() {
      let sep = if i == 0 { " " } else { "," };
      write!(f, "{}{}={}", sep, key, escape_property(value))?;
    }
    write!(f, "::{}", escape_data(self.message))
  }
}

/// Escape a command message.
pub fn escape_data(s: &str) -> String {
  s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// Escape a command property value. Stricter than [`escape_data`] since `:` and `,`
/// delimit properties.
pub fn escape_property(s: &str) -> String {
  escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
