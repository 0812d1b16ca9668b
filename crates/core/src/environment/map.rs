use indexmap::IndexMap;
use serde::Serialize;

/// Separator used when joining path-like environment values
pub const PATH_SEPARATOR: &str = ":";

/// Ordered set of environment variables handed to invoked tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvironmentMap {
    vars: IndexMap<String, String>,
}

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Set a variable, keeping its original position if it already exists
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.shift_remove(name)
    }

    /// Put `value` in front of an existing value, or set it if absent.
    ///
    /// An existing empty value still gets the separator, leaving a trailing `:`.
    pub fn prepend(&mut self, name: &str, value: &str) {
        match self.vars.get_mut(name) {
            Some(existing) => *existing = format!("{value}{PATH_SEPARATOR}{existing}"),
            None => self.insert(name, value),
        }
    }

    /// Put `value` after an existing value, or set it if absent
    pub fn append(&mut self, name: &str, value: &str) {
        match self.vars.get_mut(name) {
            Some(existing) => {
                existing.push_str(PATH_SEPARATOR);
                existing.push_str(value);
            }
            None => self.insert(name, value),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// One `export NAME=VALUE` line per variable, in insertion order
    pub fn export_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(name, value)| format!("export {name}={value}"))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
