//! Configuration scopes and the candidate files that make them up

use std::fmt;
use std::path::{Path, PathBuf};

use super::ini::KeyCase;

/// A configuration scope, naming which layered files are consulted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Platform-wide project defaults (e.g. `makeArguments`)
    Platform(String),
    /// Per-project settings (e.g. `vcsUrl`, `buildSystem`)
    Project(String),
    /// Build environment composition for a platform
    Environment(String),
}

impl ScopeKind {
    /// Candidate files from least to most specific.
    ///
    /// Later files override earlier ones key by key.
    pub fn candidates(&self, root: &Path) -> Vec<PathBuf> {
        match self {
            ScopeKind::Platform(platform) => vec![
                root.join("conf").join("platform").join(cfg_name(platform)),
                root.join("local").join("platform").join(cfg_name(platform)),
            ],
            ScopeKind::Project(project) => vec![
                root.join("conf").join("project").join(cfg_name(project)),
                root.join("local").join("project").join(cfg_name(project)),
            ],
            ScopeKind::Environment(platform) => vec![
                root.join("config").join("platform").join(cfg_name(platform)),
                root.join("local").join("platform").join(cfg_name(platform)),
                root.join("environment.cfg"),
            ],
        }
    }

    /// Environment variable names are case sensitive, project keys are not
    pub fn key_case(&self) -> KeyCase {
        match self {
            ScopeKind::Environment(_) => KeyCase::Preserve,
            ScopeKind::Platform(_) | ScopeKind::Project(_) => KeyCase::Insensitive,
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::Platform(name) => write!(f, "platform:{name}"),
            ScopeKind::Project(name) => write!(f, "project:{name}"),
            ScopeKind::Environment(name) => write!(f, "environment:{name}"),
        }
    }
}

fn cfg_name(name: &str) -> String {
    format!("{name}.cfg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_candidates_in_order() {
        let root = Path::new("/work");
        let paths = ScopeKind::Platform("linux".into()).candidates(root);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/work/conf/platform/linux.cfg"),
                PathBuf::from("/work/local/platform/linux.cfg"),
            ]
        );
    }

    #[test]
    fn test_project_candidates_in_order() {
        let root = Path::new("/work");
        let paths = ScopeKind::Project("kcoreaddons".into()).candidates(root);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/work/conf/project/kcoreaddons.cfg"),
                PathBuf::from("/work/local/project/kcoreaddons.cfg"),
            ]
        );
    }

    #[test]
    fn test_environment_candidates_end_with_environment_cfg() {
        let root = Path::new("/work");
        let paths = ScopeKind::Environment("android".into()).candidates(root);
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0], PathBuf::from("/work/config/platform/android.cfg"));
        assert_eq!(paths[2], PathBuf::from("/work/environment.cfg"));
    }

    #[test]
    fn test_key_case_per_scope() {
        assert_eq!(ScopeKind::Project("p".into()).key_case(), KeyCase::Insensitive);
        assert_eq!(ScopeKind::Environment("p".into()).key_case(), KeyCase::Preserve);
    }
}
