//! kettle-core - configuration resolution and build pipeline for kettle
//!
//! This crate provides functionality to:
//! - Merge layered INI configuration for platforms and projects
//! - Compose the environment handed to meta-build and build tools
//! - Update sources, configure, build and install one project for one platform
pub mod config;
pub mod environment;
pub mod error;
pub mod fs;
pub mod layout;
pub mod observer;
pub mod orchestrator;
pub mod pipeline;
pub mod process;
pub mod project;

// Re-export commonly used types and traits
pub use error::{Error, Result};

pub use config::{ConfigDiagnostic, ConfigStore, LayeredConfig, ScopeKind};
pub use environment::{EnvironmentComposer, EnvironmentMap, HostEnvironment, ScriptEnvironment};
pub use fs::{DryRunFilesystem, Filesystem, StdFilesystem};
pub use layout::DirectoryLayout;
pub use observer::{BuildObserver, TracingObserver};
pub use orchestrator::{
    BuildOrchestrator, ErrorCategory, OrchestratorBuilder, PipelineState, Stage, StageError,
};
pub use pipeline::{PipelineOptions, PipelineReport, StageRecord};
pub use process::{DryRunProcessRunner, Invocation, ProcessRunner, ProcessStatus, SystemProcessRunner};
pub use project::{ProjectDescriptor, VcsKind};
