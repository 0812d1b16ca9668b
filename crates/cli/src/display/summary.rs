use kettle_core::PipelineReport;

/// One line per executed stage
pub fn render_summary(report: &PipelineReport) -> String {
    let mut out = String::from("## Summary\n");
    for record in &report.stages {
        let outcome = if record.success { "ok" } else { "FAILED" };
        out.push_str(&format!("  {:<10} {}\n", record.stage.as_str(), outcome));
    }
    out
}

/// Describes the stage that stopped the run, if any
pub fn failure_message(report: &PipelineReport) -> Option<String> {
    report.failure().map(|record| {
        format!(
            "{} failed for project {} on {}: {}",
            record.stage.title(),
            report.project,
            report.platform,
            record.message.as_deref().unwrap_or("unknown error")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kettle_core::{ErrorCategory, PipelineState, Stage, StageRecord};

    fn record(stage: Stage, error: Option<&str>) -> StageRecord {
        StageRecord {
            stage,
            success: error.is_none(),
            category: error.map(|_| ErrorCategory::ExternalTool),
            message: error.map(String::from),
        }
    }

    fn report(stages: Vec<StageRecord>, final_state: PipelineState) -> PipelineReport {
        PipelineReport {
            project: "demo".into(),
            platform: "linux".into(),
            stages,
            final_state,
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_summary_lists_executed_stages() {
        let report = report(
            vec![
                record(Stage::Update, None),
                record(Stage::Configure, Some("`cmake ..` exited with status 1")),
            ],
            PipelineState::Failed,
        );

        assert_eq!(
            render_summary(&report),
            "## Summary\n  update     ok\n  configure  FAILED\n"
        );
    }

    #[test]
    fn test_failure_message_names_stage_and_project() {
        let report = report(
            vec![
                record(Stage::Update, None),
                record(Stage::Configure, None),
                record(Stage::Build, Some("`make` exited with status 2")),
            ],
            PipelineState::Failed,
        );

        assert_eq!(
            failure_message(&report).as_deref(),
            Some("Perform Build failed for project demo on linux: `make` exited with status 2")
        );
    }

    #[test]
    fn test_no_failure_message_on_success() {
        let report = report(
            vec![
                record(Stage::Update, None),
                record(Stage::Configure, None),
                record(Stage::Build, None),
                record(Stage::Install, None),
            ],
            PipelineState::Installed,
        );
        assert_eq!(failure_message(&report), None);
    }
}
