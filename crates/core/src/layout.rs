//! Source, build and install directories for one (project, platform) pair

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryLayout {
    /// `<root>/source/<project>`
    pub source_dir: PathBuf,
    /// `<root>/build/<platform>/<project>`
    pub build_dir: PathBuf,
    /// `<root>/install/<platform>`
    pub install_dir: PathBuf,
}

impl DirectoryLayout {
    /// Derive the layout below `root`, made absolute against the current directory.
    ///
    /// The root must be valid UTF-8 since its paths are passed on as tool
    /// arguments and environment values.
    pub fn new(root: &Path, project: &str, platform: &str) -> Result<Self> {
        validate_name("project", project)?;
        validate_name("platform", platform)?;

        let root = std::path::absolute(root)?;
        if root.to_str().is_none() {
            return Err(Error::InvalidName {
                what: "root",
                value: root.to_string_lossy().into_owned(),
            });
        }
        Ok(Self {
            source_dir: root.join("source").join(project),
            build_dir: root.join("build").join(platform).join(project),
            install_dir: root.join("install").join(platform),
        })
    }
}

/// Names end up as path segments, so they must be a single plain segment
pub fn validate_name(what: &'static str, value: &str) -> Result<()> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\'])
        || value.contains('\0');
    if invalid {
        return Err(Error::InvalidName {
            what,
            value: value.to_string(),
        });
    }
    Ok(())
}
