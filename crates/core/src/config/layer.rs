//! Merged view over layered configuration files

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use super::ini::{IniDocument, KeyCase, Section};
use crate::error::Result;

/// A configuration key that was absent from every layer and fell back to a default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigDiagnostic {
    pub section: String,
    pub key: String,
    pub fallback: String,
    pub consequence: String,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" key missing: {}", self.key, self.consequence)
    }
}

/// Configuration merged from an ordered list of files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayeredConfig {
    document: IniDocument,
    sources: Vec<PathBuf>,
}

impl LayeredConfig {
    /// Read every candidate that exists and merge them left to right.
    ///
    /// Missing files are skipped silently; unreadable or malformed ones are errors.
    pub fn load(candidates: &[PathBuf], key_case: KeyCase) -> Result<Self> {
        let mut document = IniDocument::new(key_case);
        let mut sources = Vec::new();

        for path in candidates {
            match IniDocument::load(path, key_case)? {
                Some(layer) => {
                    debug!("Loaded config layer {:?}", path);
                    document.merge(layer);
                    sources.push(path.clone());
                }
                None => debug!("No config layer at {:?}", path),
            }
        }

        Ok(Self { document, sources })
    }

    /// Build a layered config from already-parsed documents, in precedence order
    pub fn from_documents(key_case: KeyCase, layers: impl IntoIterator<Item = IniDocument>) -> Self {
        let mut document = IniDocument::new(key_case);
        for layer in layers {
            document.merge(layer);
        }
        Self {
            document,
            sources: Vec::new(),
        }
    }

    /// Files that were actually read, in merge order
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.document.get(section, key)
    }

    pub fn section(&self, name: &str) -> SectionView<'_> {
        SectionView {
            name: name.to_string(),
            entries: self.document.section(name),
            key_case: self.document.key_case(),
        }
    }
}

/// Read access to one merged section; absent sections behave as empty
#[derive(Debug, Clone)]
pub struct SectionView<'a> {
    name: String,
    entries: Option<&'a Section>,
    key_case: KeyCase,
}

impl<'a> SectionView<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exists(&self) -> bool {
        self.entries.is_some()
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries
            .and_then(|entries| entries.get(&self.key_case.normalize(key)))
            .map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entries in the order they were first defined across layers
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.entries
            .into_iter()
            .flat_map(|entries| entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Get a value, or fall back and record why the fallback matters
    pub fn get_or_report(
        &self,
        key: &str,
        fallback: &str,
        consequence: &str,
        diagnostics: &mut Vec<ConfigDiagnostic>,
    ) -> String {
        match self.get(key) {
            Some(value) => value.to_string(),
            None => {
                diagnostics.push(ConfigDiagnostic {
                    section: self.name.clone(),
                    key: key.to_string(),
                    fallback: fallback.to_string(),
                    consequence: consequence.to_string(),
                });
                fallback.to_string()
            }
        }
    }

    /// Owned copy of the merged entries
    pub fn to_section(&self) -> Section {
        self.entries.cloned().unwrap_or_default()
    }
}
