use serde::Serialize;

/// A named input and its unevaluated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputPair {
  pub name: String,
  pub value: String,
}

impl InputPair {
  pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }
}
