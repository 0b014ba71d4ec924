//! Environment stores.
//!
//! The pipeline never touches `std::env` directly. It reads and writes through an
//! [`EnvStore`], so the same code runs against the live process environment or an
//! in-memory map in tests.

/// Read/write access to a string key-value environment.
pub trait EnvStore {
  /// Look up a single variable. Returns `None` if the variable is unset.
  fn var(&self, key: &str) -> Option<String>;

  /// Snapshot every variable, in the store's iteration order.
  fn vars(&self) -> Vec<(String, String)>;

  /// Set a variable, replacing any previous value.
  fn set_var(&mut self, key: &str, value: &str);
}

/// The environment of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
  fn var(&self, key: &str) -> Option<String> {
    std::env::var(key).ok()
  }

  fn vars(&self) -> Vec<(String, String)> {
    std::env::vars_os()
      .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
      .collect()
  }

  fn set_var(&mut self, key: &str, value: &str) {
    // SAFETY: exports happen after every evaluation has completed, on the
    // thread driving the pipeline; nothing else reads the environment then.
    unsafe { std::env::set_var(key, value) }
  }
}

/// An in-memory environment that keeps insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
  entries: Vec<(String, String)>,
}

impl MemoryEnv {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style variant of [`EnvStore::set_var`].
  pub fn with_var(mut self, key: &str, value: &str) -> Self {
    self.set_var(key, value);
    self
  }

  #[cfg(test)]
  pub fn remove_var(&mut self, key: &str) -> Option<String> {
    let idx = self.entries.iter().position(|(k, _)| k == key)?;
    Some(self.entries.remove(idx).1)
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut env = MemoryEnv::new();
    for (k, v) in iter {
      let (k, v): (String, String) = (k.into(), v.into());
      env.set_var(&k, &v);
    }
    env
  }
}

impl EnvStore for MemoryEnv {
  fn var(&self, key: &str) -> Option<String> {
    self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
  }

  fn vars(&self) -> Vec<(String, String)> {
    self.entries.clone()
  }

  fn set_var(&mut self, key: &str, value: &str) {
    match self.entries.iter_mut().find(|(k, _)| k == key) {
      Some(entry) => entry.1 = value.to_string(),
      None => self.entries.push((key.to_string(), value.to_string())),
    }
  }
}
