//! Parser for the INI dialect used by kettle configuration files
//!
//! Supported syntax:
//! - `[Section]` headers (section names are case sensitive)
//! - `key = value` and `key: value` pairs, the first delimiter wins
//! - full-line comments starting with `#` or `;`
//! - indented lines continue the value of the previous key

use indexmap::IndexMap;
use std::path::Path;

use crate::error::{Error, Result};

/// How keys are normalized when stored and looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCase {
    /// Fold keys to lowercase
    #[default]
    Insensitive,
    /// Keep keys exactly as written
    Preserve,
}

impl KeyCase {
    pub fn normalize(self, key: &str) -> String {
        match self {
            KeyCase::Insensitive => key.to_lowercase(),
            KeyCase::Preserve => key.to_string(),
        }
    }
}

/// Key/value pairs of one section, in file order
pub type Section = IndexMap<String, String>;

/// A syntax error at a specific line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// A parsed INI document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    key_case: KeyCase,
    sections: IndexMap<String, Section>,
}

impl IniDocument {
    /// Create an empty document using the given key normalization
    pub fn new(key_case: KeyCase) -> Self {
        Self {
            key_case,
            sections: IndexMap::new(),
        }
    }

    /// Parse INI source text
    pub fn parse(source: &str, key_case: KeyCase) -> std::result::Result<Self, ParseError> {
        let mut doc = Self::new(key_case);
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;

        for (idx, raw) in source.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                last_key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Continuation of the previous value
            if raw.starts_with(char::is_whitespace) {
                if let (Some(section), Some(key)) = (&current, &last_key) {
                    if let Some(value) = doc
                        .sections
                        .get_mut(section)
                        .and_then(|entries| entries.get_mut(key))
                    {
                        if !value.is_empty() {
                            value.push('\n');
                        }
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                let Some(name) = header.strip_suffix(']') else {
                    return Err(ParseError::new(line_no, "unterminated section header"));
                };
                let name = name.trim();
                if name.is_empty() {
                    return Err(ParseError::new(line_no, "empty section name"));
                }
                doc.sections.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                last_key = None;
                continue;
            }

            let Some(section) = current.as_ref() else {
                return Err(ParseError::new(
                    line_no,
                    "key/value pair outside of any section",
                ));
            };
            let Some(pos) = trimmed.find(['=', ':']) else {
                return Err(ParseError::new(
                    line_no,
                    format!("expected \"key = value\", found \"{trimmed}\""),
                ));
            };
            let key = trimmed[..pos].trim();
            if key.is_empty() {
                return Err(ParseError::new(line_no, "empty key"));
            }
            let value = trimmed[pos + 1..].trim();
            let key = key_case.normalize(key);

            doc.sections
                .entry(section.clone())
                .or_default()
                .insert(key.clone(), value.to_string());
            last_key = Some(key);
        }

        Ok(doc)
    }

    /// Load a document from disk.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path, key_case: KeyCase) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&contents, key_case)
            .map(Some)
            .map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                line: e.line,
                message: e.message,
            })
    }

    pub fn key_case(&self) -> KeyCase {
        self.key_case
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, section)| (name.as_str(), section))
    }

    /// Look up a value, normalizing the key the same way it was stored
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(&self.key_case.normalize(key)))
            .map(String::as_str)
    }

    /// Apply another document on top of this one.
    ///
    /// Keys present in `other` replace keys of the same section here; keys
    /// only present here are kept.
    pub fn merge(&mut self, other: IniDocument) {
        for (name, entries) in other.sections {
            let target = self.sections.entry(name).or_default();
            for (key, value) in entries {
                target.insert(self.key_case.normalize(&key), value);
            }
        }
    }
}
