use kettle_core::config::ConfigDiagnostic;
use kettle_core::{BuildObserver, EnvironmentMap, Invocation, Stage, StageError};
use std::path::PathBuf;

use crate::cli::Compiler;

pub fn print_header(project: &str, platform: &str, compiler: Compiler) {
    println!("Kettle Multi-Platform Building");
    println!("Project:  {}", project);
    println!("Platform: {}", platform);
    println!("Compiler: {}", compiler);
}

/// Prints progress for a person watching the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver;

impl BuildObserver for ConsoleObserver {
    fn environment(&self, environment: &EnvironmentMap) {
        println!();
        println!("## Build Environment");
        for line in environment.export_lines() {
            println!("{}", line);
        }
    }

    fn config_sources(&self, paths: &[PathBuf]) {
        for path in paths {
            println!("Using configuration {}", path.display());
        }
    }

    fn diagnostic(&self, diagnostic: &ConfigDiagnostic) {
        println!("Warning: {}", diagnostic);
    }

    fn stage_started(&self, stage: Stage) {
        println!();
        println!("## {}", stage.title());
    }

    fn command(&self, invocation: &Invocation) {
        println!("Running: {}", invocation.to_shell_command());
        if let Some(ref dir) = invocation.working_dir {
            println!("Working directory: {}", dir.display());
        }
    }

    fn stage_finished(&self, _stage: Stage, _result: &Result<(), StageError>) {}
}
