//! Entry point for reading layered configuration below an invocation root

use std::path::{Path, PathBuf};
use tracing::debug;

use super::ini::Section;
use super::layer::LayeredConfig;
use super::scope::ScopeKind;
use crate::error::Result;

/// Section holding project settings in platform and project files
pub const PROJECT_SECTION: &str = "Project";
/// Section naming the optional environment script
pub const DEFAULT_SECTION: &str = "Default";
/// Section holding environment overrides
pub const ENVIRONMENT_SECTION: &str = "Environment";

/// Loads and merges configuration files relative to a root directory
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files for the given scopes, concatenated in order
    pub fn candidates(&self, scopes: &[ScopeKind]) -> Vec<PathBuf> {
        scopes
            .iter()
            .flat_map(|scope| scope.candidates(&self.root))
            .collect()
    }

    /// Merge all files of the given scopes, later scopes winning.
    ///
    /// Key normalization follows the first scope; scopes passed together
    /// must agree on it.
    pub fn load(&self, scopes: &[ScopeKind]) -> Result<LayeredConfig> {
        let key_case = scopes.first().map(ScopeKind::key_case).unwrap_or_default();
        debug_assert!(scopes.iter().all(|s| s.key_case() == key_case));

        let candidates = self.candidates(scopes);
        debug!("Resolving {:?} from {} candidate files", scopes, candidates.len());
        LayeredConfig::load(&candidates, key_case)
    }

    /// Merged mapping of one section for a single scope
    pub fn resolve(&self, scope: &ScopeKind, section: &str) -> Result<Section> {
        let layered = self.load(std::slice::from_ref(scope))?;
        Ok(layered.section(section).to_section())
    }

    /// Platform defaults overlaid with project settings
    pub fn project_settings(&self, project: &str, platform: &str) -> Result<LayeredConfig> {
        self.load(&[
            ScopeKind::Platform(platform.to_string()),
            ScopeKind::Project(project.to_string()),
        ])
    }

    /// Environment composition settings for a platform
    pub fn environment_settings(&self, platform: &str) -> Result<LayeredConfig> {
        self.load(&[ScopeKind::Environment(platform.to_string())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_project_settings_layer_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "conf/platform/linux.cfg", "[Project]\nmakeArguments = -j2\nbuildSystem = qmake\n");
        write(root, "local/platform/linux.cfg", "[Project]\nmakeArguments = -j16\n");
        write(root, "conf/project/frameworks.cfg", "[Project]\nbuildSystem = cmake\nvcsUrl = a\n");
        write(root, "local/project/frameworks.cfg", "[Project]\nvcsUrl = b\n");

        let store = ConfigStore::new(root);
        let config = store.project_settings("frameworks", "linux").unwrap();

        assert_eq!(config.sources().len(), 4);
        assert_eq!(config.get(PROJECT_SECTION, "makeArguments"), Some("-j16"));
        assert_eq!(config.get(PROJECT_SECTION, "buildSystem"), Some("cmake"));
        assert_eq!(config.get(PROJECT_SECTION, "vcsUrl"), Some("b"));
    }

    #[test]
    fn test_no_files_is_empty_config() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path());

        let config = store.project_settings("missing", "linux").unwrap();

        assert!(config.sources().is_empty());
        assert!(!config.section(PROJECT_SECTION).exists());
    }

    #[test]
    fn test_environment_settings_preserve_case() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "config/platform/linux.cfg", "[Environment]\nQt5_DIR = /opt/qt\n");
        write(root, "environment.cfg", "[Default]\nenvironmentScript = env.sh\n");

        let store = ConfigStore::new(root);
        let config = store.environment_settings("linux").unwrap();

        assert_eq!(config.get(ENVIRONMENT_SECTION, "Qt5_DIR"), Some("/opt/qt"));
        assert_eq!(config.get(ENVIRONMENT_SECTION, "qt5_dir"), None);
        assert_eq!(config.get(DEFAULT_SECTION, "environmentScript"), Some("env.sh"));
    }

    #[test]
    fn test_resolve_single_scope_section() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "conf/project/p.cfg", "[Project]\nvcs = git\n");
        write(root, "local/project/p.cfg", "[Project]\nvcs = hg\n");

        let store = ConfigStore::new(root);
        let section = store
            .resolve(&ScopeKind::Project("p".into()), PROJECT_SECTION)
            .unwrap();

        assert_eq!(section.get("vcs").map(String::as_str), Some("hg"));
    }
}
