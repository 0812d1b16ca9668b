//! Reporting hooks for orchestration progress

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::ConfigDiagnostic;
use crate::environment::EnvironmentMap;
use crate::orchestrator::{Stage, StageError};
use crate::process::Invocation;

/// Receives progress events; every method defaults to doing nothing
pub trait BuildObserver: Send + Sync {
    /// The composed environment, once, before any tool runs
    fn environment(&self, _environment: &EnvironmentMap) {}

    /// Project configuration files that were read, in merge order
    fn config_sources(&self, _paths: &[PathBuf]) {}

    /// A configuration key fell back to its default
    fn diagnostic(&self, _diagnostic: &ConfigDiagnostic) {}

    fn stage_started(&self, _stage: Stage) {}

    /// A command is about to be executed
    fn command(&self, _invocation: &Invocation) {}

    fn stage_finished(&self, _stage: Stage, _result: &Result<(), StageError>) {}
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn environment(&self, environment: &EnvironmentMap) {
        for line in environment.export_lines() {
            info!("{}", line);
        }
    }

    fn config_sources(&self, paths: &[PathBuf]) {
        debug!("Project configuration read from {:?}", paths);
    }

    fn diagnostic(&self, diagnostic: &ConfigDiagnostic) {
        warn!("{}", diagnostic);
    }

    fn stage_started(&self, stage: Stage) {
        info!("## {}", stage.title());
    }

    fn command(&self, invocation: &Invocation) {
        info!("Running: {}", invocation.to_shell_command());
    }

    fn stage_finished(&self, stage: Stage, result: &Result<(), StageError>) {
        match result {
            Ok(()) => debug!("Stage {} succeeded", stage),
            Err(e) => warn!("Stage {} failed: {}", stage, e),
        }
    }
}
