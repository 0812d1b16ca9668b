use serde::Serialize;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::process::ProcessStatus;

/// Steps the orchestrator can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Update,
    Configure,
    Build,
    Install,
    /// Maintenance step outside the default pipeline
    Purge,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Update => "update",
            Stage::Configure => "configure",
            Stage::Build => "build",
            Stage::Install => "install",
            Stage::Purge => "purge",
        }
    }

    /// Human readable heading for progress output
    pub fn title(&self) -> &'static str {
        match self {
            Stage::Update => "Update Project Sources",
            Stage::Configure => "Configuring Build",
            Stage::Build => "Perform Build",
            Stage::Install => "Perform Install",
            Stage::Purge => "Purge Build Directory",
        }
    }

    /// State reached when this stage succeeds
    pub fn completed_state(&self) -> Option<PipelineState> {
        match self {
            Stage::Update => Some(PipelineState::SourcesReady),
            Stage::Configure => Some(PipelineState::Configured),
            Stage::Build => Some(PipelineState::Built),
            Stage::Install => Some(PipelineState::Installed),
            Stage::Purge => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of one orchestration run; `Failed` is absorbing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    #[default]
    Created,
    SourcesReady,
    Configured,
    Built,
    Installed,
    Failed,
}

/// Broad failure classes a caller can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The step cannot be formed from the configuration; nothing was run
    UnsupportedOperation,
    /// An invoked tool failed, could not start, or timed out
    ExternalTool,
    /// Creating or deleting a directory failed
    Filesystem,
}

/// Why a stage failed
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("version control system \"{0}\" is not supported, only git is")]
    UnsupportedVcs(String),

    #[error("no \"vcsUrl\" configured and no sources present at {}", .0.display())]
    MissingVcsUrl(PathBuf),

    #[error("no \"buildSystem\" configured, cannot configure the build")]
    MissingBuildSystem,

    #[error("`{command}` exited with {status}")]
    ToolFailed {
        command: String,
        status: ProcessStatus,
    },

    #[error("failed to run `{command}`: {source}")]
    ToolSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` timed out: {source}")]
    ToolTimedOut {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("filesystem operation on {} failed: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StageError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StageError::UnsupportedVcs(_)
            | StageError::MissingVcsUrl(_)
            | StageError::MissingBuildSystem => ErrorCategory::UnsupportedOperation,
            StageError::ToolFailed { .. }
            | StageError::ToolSpawn { .. }
            | StageError::ToolTimedOut { .. } => ErrorCategory::ExternalTool,
            StageError::Filesystem { .. } => ErrorCategory::Filesystem,
        }
    }
}
