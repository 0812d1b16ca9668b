//! Fail-fast sequencing of the pipeline stages

use serde::Serialize;

use crate::config::ConfigDiagnostic;
use crate::orchestrator::{BuildOrchestrator, ErrorCategory, PipelineState, Stage};

/// The default pipeline, in execution order
pub const PIPELINE: [Stage; 4] = [Stage::Update, Stage::Configure, Stage::Build, Stage::Install];

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Purge the build directory between update and configure
    pub purge: bool,
}

/// Outcome of one executed stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub project: String,
    pub platform: String,
    /// Executed stages in order; the run stops after the first failure
    pub stages: Vec<StageRecord>,
    pub final_state: PipelineState,
    /// Configuration keys that fell back to defaults
    pub diagnostics: Vec<ConfigDiagnostic>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.final_state == PipelineState::Installed && self.stages.iter().all(|s| s.success)
    }

    /// The stage that stopped the run, if any
    pub fn failure(&self) -> Option<&StageRecord> {
        self.stages.iter().find(|s| !s.success)
    }
}

/// Stages run for the given options
pub fn stages(options: &PipelineOptions) -> Vec<Stage> {
    let mut stages = vec![Stage::Update];
    if options.purge {
        stages.push(Stage::Purge);
    }
    stages.extend_from_slice(&PIPELINE[1..]);
    stages
}

/// Run update, configure, build and install, stopping at the first failure.
///
/// Stages that already succeeded are not rolled back.
pub fn run(orchestrator: &mut BuildOrchestrator, options: &PipelineOptions) -> PipelineReport {
    let mut records = Vec::new();

    for stage in stages(options) {
        let record = match orchestrator.run_stage(stage) {
            Ok(()) => StageRecord {
                stage,
                success: true,
                category: None,
                message: None,
            },
            Err(e) => StageRecord {
                stage,
                success: false,
                category: Some(e.category()),
                message: Some(e.to_string()),
            },
        };
        let failed = !record.success;
        records.push(record);
        if failed {
            tracing::debug!("Stopping pipeline after failed {} stage", stage);
            break;
        }
    }

    PipelineReport {
        project: orchestrator.project().to_string(),
        platform: orchestrator.platform().to_string(),
        stages: records,
        final_state: orchestrator.state(),
        diagnostics: orchestrator.diagnostics().to_vec(),
    }
}
