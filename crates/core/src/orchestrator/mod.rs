//! Build orchestration for one (project, platform) pair
//!
//! Construction resolves everything up front: the directory layout, the
//! composed environment and the project descriptor. The four pipeline steps
//! are then exposed as independent operations which report success or a
//! [`StageError`] and never panic or abort the process.

mod stage;

pub use stage::{ErrorCategory, PipelineState, Stage, StageError};

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{ConfigDiagnostic, ConfigStore};
use crate::environment::{
    BashScriptEnvironment, EnvironmentComposer, EnvironmentMap, HostEnvironment,
    ProcessHostEnvironment, ScriptEnvironment,
};
use crate::error::Result;
use crate::fs::{Filesystem, StdFilesystem};
use crate::layout::DirectoryLayout;
use crate::observer::{BuildObserver, TracingObserver};
use crate::process::{Invocation, ProcessRunner, SystemProcessRunner};
use crate::project::{ProjectDescriptor, VcsKind};

const GIT: &str = "git";

/// Install-prefix argument in the form the meta-build tool understands
pub fn install_prefix_argument(build_system: &str, install_dir: &Path) -> String {
    let family = Path::new(build_system)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(build_system);

    if family.starts_with("qmake") {
        format!("PREFIX={}", install_dir.display())
    } else {
        format!("-DCMAKE_INSTALL_PREFIX={}", install_dir.display())
    }
}

pub struct OrchestratorBuilder {
    root: PathBuf,
    project: String,
    platform: String,
    runner: Box<dyn ProcessRunner>,
    filesystem: Box<dyn Filesystem>,
    host: Box<dyn HostEnvironment>,
    script: Box<dyn ScriptEnvironment>,
    observer: Box<dyn BuildObserver>,
}

impl OrchestratorBuilder {
    pub fn runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn filesystem(mut self, filesystem: impl Filesystem + 'static) -> Self {
        self.filesystem = Box::new(filesystem);
        self
    }

    pub fn host_environment(mut self, host: impl HostEnvironment + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn script_environment(mut self, script: impl ScriptEnvironment + 'static) -> Self {
        self.script = Box::new(script);
        self
    }

    pub fn observer(mut self, observer: impl BuildObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Resolve layout, environment and project configuration
    pub fn build(self) -> Result<BuildOrchestrator> {
        let layout = DirectoryLayout::new(&self.root, &self.project, &self.platform)?;
        let root = std::path::absolute(&self.root)?;
        let store = ConfigStore::new(&root);

        let environment =
            EnvironmentComposer::new(&store, self.host.as_ref(), self.script.as_ref())
                .compose(&self.platform, &layout.install_dir)?;
        self.observer.environment(&environment);

        let settings = store.project_settings(&self.project, &self.platform)?;
        self.observer.config_sources(settings.sources());
        let (descriptor, diagnostics) = ProjectDescriptor::resolve(&self.project, &settings)?;
        for diagnostic in &diagnostics {
            self.observer.diagnostic(diagnostic);
        }

        debug!(
            "Orchestrator ready for {} on {} ({} config files, {} defaults applied)",
            self.project,
            self.platform,
            settings.sources().len(),
            diagnostics.len()
        );

        Ok(BuildOrchestrator {
            root,
            platform: self.platform,
            descriptor,
            layout,
            environment,
            diagnostics,
            config_sources: settings.sources().to_vec(),
            state: PipelineState::Created,
            runner: self.runner,
            filesystem: self.filesystem,
            observer: self.observer,
        })
    }
}

pub struct BuildOrchestrator {
    root: PathBuf,
    platform: String,
    descriptor: ProjectDescriptor,
    layout: DirectoryLayout,
    environment: EnvironmentMap,
    diagnostics: Vec<ConfigDiagnostic>,
    config_sources: Vec<PathBuf>,
    state: PipelineState,
    runner: Box<dyn ProcessRunner>,
    filesystem: Box<dyn Filesystem>,
    observer: Box<dyn BuildObserver>,
}

impl BuildOrchestrator {
    /// Builder using the real process runner, filesystem, host environment
    /// and bash script sourcing, reporting through `tracing`
    pub fn builder(
        root: impl Into<PathBuf>,
        project: impl Into<String>,
        platform: impl Into<String>,
    ) -> OrchestratorBuilder {
        OrchestratorBuilder {
            root: root.into(),
            project: project.into(),
            platform: platform.into(),
            runner: Box::new(SystemProcessRunner::new()),
            filesystem: Box::new(StdFilesystem),
            host: Box::new(ProcessHostEnvironment),
            script: Box::new(BashScriptEnvironment::new()),
            observer: Box::new(TracingObserver),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project(&self) -> &str {
        &self.descriptor.name
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn descriptor(&self) -> &ProjectDescriptor {
        &self.descriptor
    }

    pub fn layout(&self) -> &DirectoryLayout {
        &self.layout
    }

    pub fn environment(&self) -> &EnvironmentMap {
        &self.environment
    }

    /// Configuration keys that fell back to defaults
    pub fn diagnostics(&self) -> &[ConfigDiagnostic] {
        &self.diagnostics
    }

    pub fn config_sources(&self) -> &[PathBuf] {
        &self.config_sources
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run a single stage by name
    pub fn run_stage(&mut self, stage: Stage) -> std::result::Result<(), StageError> {
        match stage {
            Stage::Update => self.update_sources(),
            Stage::Configure => self.configure_build(),
            Stage::Build => self.perform_build(),
            Stage::Install => self.perform_install(),
            Stage::Purge => self.purge_build_directory(),
        }
    }

    /// Clone the sources, or pull them when they are already checked out
    pub fn update_sources(&mut self) -> std::result::Result<(), StageError> {
        self.observe(Stage::Update, Self::update_step)
    }

    /// Generate native build files with the configured meta-build system
    pub fn configure_build(&mut self) -> std::result::Result<(), StageError> {
        self.observe(Stage::Configure, Self::configure_step)
    }

    pub fn perform_build(&mut self) -> std::result::Result<(), StageError> {
        self.observe(Stage::Build, Self::build_step)
    }

    pub fn perform_install(&mut self) -> std::result::Result<(), StageError> {
        self.observe(Stage::Install, Self::install_step)
    }

    /// Recursively delete the build directory; a missing directory is not an error
    pub fn purge_build_directory(&mut self) -> std::result::Result<(), StageError> {
        self.observe(Stage::Purge, Self::purge_step)
    }

    fn observe(
        &mut self,
        stage: Stage,
        step: fn(&Self) -> std::result::Result<(), StageError>,
    ) -> std::result::Result<(), StageError> {
        self.observer.stage_started(stage);
        let result = step(self);
        self.observer.stage_finished(stage, &result);

        self.state = match (&result, self.state) {
            (_, PipelineState::Failed) | (Err(_), _) => PipelineState::Failed,
            (Ok(()), current) => stage.completed_state().unwrap_or(current),
        };
        result
    }

    fn update_step(&self) -> std::result::Result<(), StageError> {
        if self.descriptor.vcs != VcsKind::Git {
            return Err(StageError::UnsupportedVcs(self.descriptor.vcs.to_string()));
        }

        let source_dir = &self.layout.source_dir;
        if !self.filesystem.exists(source_dir) {
            if !self.descriptor.has_vcs_url() {
                return Err(StageError::MissingVcsUrl(source_dir.clone()));
            }
            info!("Checking out to {}", source_dir.display());
            let mut clone = Invocation::new(GIT).arg("clone");
            if self.descriptor.git_submodules {
                clone = clone.arg("--recursive");
            }
            let clone = clone
                .arg(self.descriptor.vcs_url.as_str())
                .arg(source_dir.to_string_lossy())
                .with_working_dir(&self.root);
            return self.invoke(&clone);
        }

        info!("Updating sources in {}", source_dir.display());
        self.invoke(
            &Invocation::new(GIT)
                .arg("pull")
                .with_working_dir(source_dir),
        )?;
        if self.descriptor.git_submodules {
            self.invoke(
                &Invocation::new(GIT)
                    .args(["submodule", "update", "--recursive"])
                    .with_working_dir(source_dir),
            )?;
        }
        Ok(())
    }

    fn configure_step(&self) -> std::result::Result<(), StageError> {
        if !self.descriptor.has_build_system() {
            return Err(StageError::MissingBuildSystem);
        }

        let build_dir = &self.layout.build_dir;
        if !self.filesystem.exists(build_dir) {
            debug!("Creating build directory {:?}", build_dir);
            self.filesystem
                .create_dir_all(build_dir)
                .map_err(|source| fs_error(build_dir, source))?;
        }

        let configure = Invocation::new(self.descriptor.build_system.as_str())
            .args(self.descriptor.cmake_arguments.iter().cloned())
            .arg(install_prefix_argument(
                &self.descriptor.build_system,
                &self.layout.install_dir,
            ))
            .arg(self.layout.source_dir.to_string_lossy())
            .with_working_dir(build_dir)
            .with_env(self.environment.clone());
        self.invoke(&configure)
    }

    fn build_step(&self) -> std::result::Result<(), StageError> {
        let build = Invocation::new(self.descriptor.build_tool.as_str())
            .args(self.descriptor.make_arguments.iter().cloned())
            .with_working_dir(&self.layout.build_dir)
            .with_env(self.environment.clone());
        self.invoke(&build)
    }

    fn install_step(&self) -> std::result::Result<(), StageError> {
        let install = Invocation::new(self.descriptor.build_tool.as_str())
            .arg("install")
            .args(self.descriptor.make_arguments.iter().cloned())
            .with_working_dir(&self.layout.build_dir)
            .with_env(self.environment.clone());
        self.invoke(&install)
    }

    fn purge_step(&self) -> std::result::Result<(), StageError> {
        let build_dir = &self.layout.build_dir;
        if !self.filesystem.exists(build_dir) {
            debug!("Nothing to purge at {:?}", build_dir);
            return Ok(());
        }
        info!("Removing {}", build_dir.display());
        self.filesystem
            .remove_dir_all(build_dir)
            .map_err(|source| fs_error(build_dir, source))
    }

    fn invoke(&self, invocation: &Invocation) -> std::result::Result<(), StageError> {
        self.observer.command(invocation);
        let command = invocation.to_shell_command();
        match self.runner.run(invocation) {
            Ok(status) if status.is_success() => Ok(()),
            Ok(status) => Err(StageError::ToolFailed { command, status }),
            Err(source) if source.kind() == io::ErrorKind::TimedOut => {
                Err(StageError::ToolTimedOut { command, source })
            }
            Err(source) => Err(StageError::ToolSpawn { command, source }),
        }
    }
}

fn fs_error(path: &Path, source: io::Error) -> StageError {
    StageError::Filesystem {
        path: path.to_path_buf(),
        source,
    }
}
