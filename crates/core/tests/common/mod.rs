//! Recording collaborators shared by the integration tests
#![allow(dead_code)]

use kettle_core::config::ConfigDiagnostic;
use kettle_core::environment::ScriptError;
use kettle_core::{
    BuildObserver, EnvironmentMap, Invocation, ProcessRunner, ProcessStatus, ScriptEnvironment,
    Stage, StageError,
};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub fn write_config(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

pub fn host(vars: &[(&str, &str)]) -> HashMap<String, String> {
    vars.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// One recorded call: the invocation and whether its working dir existed at that moment
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub invocation: Invocation,
    pub working_dir_existed: bool,
}

#[derive(Default)]
struct RunnerState {
    calls: Vec<RecordedCall>,
    exit_codes: HashMap<String, i32>,
    spawn_errors: HashMap<String, io::ErrorKind>,
}

/// Records every invocation and exits 0 unless told otherwise
#[derive(Clone, Default)]
pub struct RecordingRunner {
    state: Arc<Mutex<RunnerState>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` exit with `code`
    pub fn exit_with(self, program: &str, code: i32) -> Self {
        self.state
            .lock()
            .unwrap()
            .exit_codes
            .insert(program.to_string(), code);
        self
    }

    /// Make every invocation of `program` fail before producing a status
    pub fn fail_to_spawn(self, program: &str, kind: io::ErrorKind) -> Self {
        self.state
            .lock()
            .unwrap()
            .spawn_errors
            .insert(program.to_string(), kind);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.invocation.to_shell_command())
            .collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        let mut state = self.state.lock().unwrap();
        let working_dir_existed = invocation
            .working_dir
            .as_ref()
            .map(|dir| dir.exists())
            .unwrap_or(false);
        state.calls.push(RecordedCall {
            invocation: invocation.clone(),
            working_dir_existed,
        });

        if let Some(kind) = state.spawn_errors.get(&invocation.program) {
            return Err(io::Error::from(*kind));
        }
        let code = state
            .exit_codes
            .get(&invocation.program)
            .copied()
            .unwrap_or(0);
        Ok(ProcessStatus::from_code(code))
    }
}

/// Returns a fixed environment and remembers which scripts were requested
#[derive(Clone, Default)]
pub struct StaticScript {
    environment: EnvironmentMap,
    requested: Arc<Mutex<Vec<PathBuf>>>,
    fail: bool,
}

impl StaticScript {
    pub fn with_vars(vars: &[(&str, &str)]) -> Self {
        Self {
            environment: vars.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn requested(&self) -> Vec<PathBuf> {
        self.requested.lock().unwrap().clone()
    }
}

impl ScriptEnvironment for StaticScript {
    fn environment_from_script(&self, path: &Path) -> Result<EnvironmentMap, ScriptError> {
        self.requested.lock().unwrap().push(path.to_path_buf());
        if self.fail {
            return Err(ScriptError::Failed {
                path: path.to_path_buf(),
                code: Some(1),
            });
        }
        Ok(self.environment.clone())
    }
}

/// Collects observer events as short strings
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl BuildObserver for RecordingObserver {
    fn environment(&self, environment: &EnvironmentMap) {
        for line in environment.export_lines() {
            self.push(line);
        }
    }

    fn diagnostic(&self, diagnostic: &ConfigDiagnostic) {
        self.push(format!("diagnostic:{}", diagnostic.key));
    }

    fn stage_started(&self, stage: Stage) {
        self.push(format!("start:{stage}"));
    }

    fn command(&self, invocation: &Invocation) {
        self.push(format!("run:{}", invocation.program));
    }

    fn stage_finished(&self, stage: Stage, result: &Result<(), StageError>) {
        let outcome = if result.is_ok() { "ok" } else { "failed" };
        self.push(format!("finish:{stage}:{outcome}"));
    }
}
