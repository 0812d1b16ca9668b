//! Composition of the build environment from host, script and configuration

use std::path::{Path, PathBuf};
use tracing::debug;

use super::{EnvironmentMap, HostEnvironment, ScriptEnvironment};
use crate::config::{ConfigStore, DEFAULT_SECTION, ENVIRONMENT_SECTION, LayeredConfig};
use crate::error::Result;

/// Key in the `Default` section naming an environment script
pub const ENVIRONMENT_SCRIPT_KEY: &str = "environmentScript";

/// Variable that always receives the install directory
pub const PREFIX_PATH_VARIABLE: &str = "CMAKE_PREFIX_PATH";

/// Host variables forwarded when no environment script is configured
pub const PASSTHROUGH_VARIABLES: [&str; 14] = [
    "CMAKE_PREFIX_PATH",
    "XDG_CONFIG_DIRS",
    "XDG_DATA_DIRS",
    "PATH",
    "LD_LIBRARY_PATH",
    "PKG_CONFIG_PATH",
    "PYTHONPATH",
    "PERL5LIB",
    "QT_PLUGIN_PATH",
    "QML_IMPORT_PATH",
    "QML2_IMPORT_PATH",
    "QMAKEFEATURES",
    "PYTHON3PATH",
    "CPLUS_INCLUDE_PATH",
];

/// Builds the environment every configure/build/install tool runs with
pub struct EnvironmentComposer<'a> {
    store: &'a ConfigStore,
    host: &'a dyn HostEnvironment,
    script: &'a dyn ScriptEnvironment,
}

impl<'a> EnvironmentComposer<'a> {
    pub fn new(
        store: &'a ConfigStore,
        host: &'a dyn HostEnvironment,
        script: &'a dyn ScriptEnvironment,
    ) -> Self {
        Self {
            store,
            host,
            script,
        }
    }

    /// Compose the environment for `platform` from its layered configuration
    pub fn compose(&self, platform: &str, install_dir: &Path) -> Result<EnvironmentMap> {
        let settings = self.store.environment_settings(platform)?;
        self.compose_with(&settings, install_dir)
    }

    /// Compose from already loaded environment settings.
    ///
    /// 1. Base: the script's environment if one is configured, otherwise the
    ///    passthrough variables read from the host (absent ones as "").
    /// 2. Every `Environment` override is prepended to an existing value or set.
    /// 3. The install directory is appended to `CMAKE_PREFIX_PATH`.
    pub fn compose_with(
        &self,
        settings: &LayeredConfig,
        install_dir: &Path,
    ) -> Result<EnvironmentMap> {
        let mut environment = match self.script_path(settings) {
            Some(script) => {
                debug!("Using environment script {:?}", script);
                self.script.environment_from_script(&script)?
            }
            None => {
                debug!("No environment script configured, reading host variables");
                self.host_passthrough()
            }
        };

        for (name, value) in settings.section(ENVIRONMENT_SECTION).iter() {
            environment.prepend(name, value);
        }

        environment.append(PREFIX_PATH_VARIABLE, &install_dir.to_string_lossy());
        Ok(environment)
    }

    fn script_path(&self, settings: &LayeredConfig) -> Option<PathBuf> {
        settings
            .get(DEFAULT_SECTION, ENVIRONMENT_SCRIPT_KEY)
            .filter(|script| !script.is_empty())
            .map(|script| self.store.root().join(script))
    }

    fn host_passthrough(&self) -> EnvironmentMap {
        PASSTHROUGH_VARIABLES
            .iter()
            .map(|name| (*name, self.host.var(name).unwrap_or_default()))
            .collect()
    }
}
