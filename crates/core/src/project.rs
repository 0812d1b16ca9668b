//! Resolved, immutable build settings of one project

use serde::Serialize;
use std::fmt;

use crate::config::{ConfigDiagnostic, LayeredConfig, PROJECT_SECTION};
use crate::error::{Error, Result};

/// Build tool used when a project does not name one
pub const DEFAULT_BUILD_TOOL: &str = "make";

/// Version control system of a project.
///
/// Only git can be driven; other names are kept so the update step can
/// reject them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum VcsKind {
    Git,
    Other(String),
}

impl VcsKind {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "git" => VcsKind::Git,
            other => VcsKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Other(name) => name,
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VcsKind> for String {
    fn from(kind: VcsKind) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    pub name: String,
    pub vcs: VcsKind,
    /// Empty when no remote is configured; cloning is then impossible
    pub vcs_url: String,
    pub git_submodules: bool,
    /// Meta-build executable (e.g. `cmake`); empty disables configuring
    pub build_system: String,
    /// Native build tool, `make` unless configured
    pub build_tool: String,
    pub cmake_arguments: Vec<String>,
    pub make_arguments: Vec<String>,
}

impl ProjectDescriptor {
    /// Resolve from merged platform and project configuration.
    ///
    /// Missing `vcs`, `vcsUrl` and `buildSystem` keys fall back to defaults
    /// and are reported in the returned diagnostics.
    pub fn resolve(name: &str, config: &LayeredConfig) -> Result<(Self, Vec<ConfigDiagnostic>)> {
        let section = config.section(PROJECT_SECTION);
        let mut diagnostics = Vec::new();

        let vcs = section.get_or_report("vcs", "git", "falling back to \"git\"", &mut diagnostics);
        let vcs_url = section.get_or_report(
            "vcsUrl",
            "",
            "will not be able to update or checkout source code",
            &mut diagnostics,
        );
        let build_system =
            section.get_or_report("buildSystem", "", "cannot perform build", &mut diagnostics);

        let git_submodules = match section.get("vcsGitSubmodules") {
            Some(value) => parse_bool("vcsGitSubmodules", value)?,
            None => false,
        };
        let build_tool = section
            .get("buildTool")
            .map(str::trim)
            .filter(|tool| !tool.is_empty())
            .unwrap_or(DEFAULT_BUILD_TOOL)
            .to_string();

        let descriptor = Self {
            name: name.to_string(),
            vcs: VcsKind::parse(&vcs),
            vcs_url: vcs_url.trim().to_string(),
            git_submodules,
            build_system: build_system.trim().to_string(),
            build_tool,
            cmake_arguments: split_arguments(section.get("cmakeArguments")),
            make_arguments: split_arguments(section.get("makeArguments")),
        };
        Ok((descriptor, diagnostics))
    }

    pub fn has_vcs_url(&self) -> bool {
        !self.vcs_url.is_empty()
    }

    pub fn has_build_system(&self) -> bool {
        !self.build_system.is_empty()
    }
}

fn split_arguments(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| v.split_whitespace().map(String::from).collect())
        .unwrap_or_default()
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(Error::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "a boolean (1/yes/true/on or 0/no/false/off)",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IniDocument, KeyCase};

    fn config(layers: &[&str]) -> LayeredConfig {
        LayeredConfig::from_documents(
            KeyCase::Insensitive,
            layers
                .iter()
                .map(|source| IniDocument::parse(source, KeyCase::Insensitive).unwrap()),
        )
    }

    #[test]
    fn test_resolve_full_project() {
        let config = config(&[
            "[Project]\nmakeArguments = -j8 VERBOSE=1\ncmakeArguments = -DBUILD_TESTING=OFF\n",
            "[Project]\nvcs = git\nvcsUrl = https://example/repo.git\nvcsGitSubmodules = true\nbuildSystem = cmake\n",
        ]);

        let (descriptor, diagnostics) = ProjectDescriptor::resolve("repo", &config).unwrap();

        assert!(diagnostics.is_empty());
        assert_eq!(descriptor.vcs, VcsKind::Git);
        assert_eq!(descriptor.vcs_url, "https://example/repo.git");
        assert!(descriptor.git_submodules);
        assert_eq!(descriptor.build_system, "cmake");
        assert_eq!(descriptor.build_tool, "make");
        assert_eq!(descriptor.make_arguments, vec!["-j8", "VERBOSE=1"]);
        assert_eq!(descriptor.cmake_arguments, vec!["-DBUILD_TESTING=OFF"]);
    }

    #[test]
    fn test_defaults_and_diagnostics_for_empty_config() {
        let (descriptor, diagnostics) =
            ProjectDescriptor::resolve("empty", &config(&[])).unwrap();

        assert_eq!(descriptor.vcs, VcsKind::Git);
        assert!(!descriptor.has_vcs_url());
        assert!(!descriptor.has_build_system());
        assert!(!descriptor.git_submodules);
        assert!(descriptor.make_arguments.is_empty());
        assert!(descriptor.cmake_arguments.is_empty());

        let keys: Vec<&str> = diagnostics.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["vcs", "vcsUrl", "buildSystem"]);
    }

    #[test]
    fn test_unsupported_vcs_is_kept() {
        let (descriptor, _) =
            ProjectDescriptor::resolve("p", &config(&["[Project]\nvcs = svn\n"])).unwrap();
        assert_eq!(descriptor.vcs, VcsKind::Other("svn".into()));
        assert_eq!(descriptor.vcs.to_string(), "svn");
    }

    #[test]
    fn test_project_layer_overrides_platform_layer() {
        let config = config(&[
            "[Project]\nmakeArguments = -j2\nbuildTool = ninja\n",
            "[Project]\nmakeArguments = -j32\n",
        ]);
        let (descriptor, _) = ProjectDescriptor::resolve("p", &config).unwrap();
        assert_eq!(descriptor.make_arguments, vec!["-j32"]);
        assert_eq!(descriptor.build_tool, "ninja");
    }

    #[test]
    fn test_submodule_flag_values() {
        for (value, expected) in [("1", true), ("Yes", true), ("off", false), ("false", false)] {
            let source = format!("[Project]\nvcsGitSubmodules = {value}\n");
            let (descriptor, _) = ProjectDescriptor::resolve("p", &config(&[source.as_str()])).unwrap();
            assert_eq!(descriptor.git_submodules, expected, "{value}");
        }

        let result = ProjectDescriptor::resolve("p", &config(&["[Project]\nvcsGitSubmodules = maybe\n"]));
        assert!(matches!(result, Err(Error::InvalidValue { .. })));
    }

    #[test]
    fn test_descriptor_serializes_vcs_as_string() {
        let (descriptor, _) =
            ProjectDescriptor::resolve("p", &config(&["[Project]\nvcs = hg\n"])).unwrap();
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["vcs"], "hg");
        assert_eq!(json["build_tool"], "make");
    }
}
