use std::io;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::debug;
use wait_timeout::ChildExt;

use super::{Invocation, ProcessStatus};

/// Runs external commands to completion
pub trait ProcessRunner: Send + Sync {
    /// Run the command with its output streamed to our own stdout/stderr.
    ///
    /// An `Err` means the command could not be run to completion at all; a
    /// non-zero exit is reported through the returned status.
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessStatus>;
}

/// Spawns real child processes and blocks until they exit
#[derive(Debug, Clone, Default)]
pub struct SystemProcessRunner {
    timeout: Option<Duration>,
}

impl SystemProcessRunner {
    /// Runner without a timeout; a hung child blocks forever
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill children that run longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(ref dir) = invocation.working_dir {
            cmd.current_dir(dir);
        }
        if let Some(ref env) = invocation.env {
            cmd.env_clear();
            cmd.envs(env.iter());
        }

        debug!("Spawning: {}", invocation.to_shell_command());
        let mut child = cmd.spawn()?;

        let status = match self.timeout {
            None => child.wait()?,
            Some(limit) => match child.wait_timeout(limit)? {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("{} did not finish within {:?}", invocation.program, limit),
                    ));
                }
            },
        };

        Ok(status.into())
    }
}

/// Pretends every command succeeded without running anything
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunProcessRunner;

impl ProcessRunner for DryRunProcessRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        debug!("Dry run, skipping: {}", invocation.to_shell_command());
        Ok(ProcessStatus::success())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::environment::EnvironmentMap;
    use tempfile::TempDir;

    fn sh(script: &str) -> Invocation {
        Invocation::new("sh").args(["-c", script])
    }

    #[test]
    fn test_reports_exit_code() {
        let runner = SystemProcessRunner::new();
        assert!(runner.run(&sh("exit 0")).unwrap().is_success());
        assert_eq!(runner.run(&sh("exit 3")).unwrap().code, Some(3));
    }

    #[test]
    fn test_runs_in_working_dir() {
        let temp_dir = TempDir::new().unwrap();
        let marker = temp_dir.path().join("marker");
        let status = SystemProcessRunner::new()
            .run(&sh("touch marker").with_working_dir(temp_dir.path()))
            .unwrap();
        assert!(status.is_success());
        assert!(marker.exists());
    }

    #[test]
    fn test_environment_replaces_host_environment() {
        let env: EnvironmentMap = [("PATH", "/usr/bin:/bin"), ("KETTLE_TEST_VALUE", "bar")]
            .into_iter()
            .collect();
        let invocation = sh("test \"$KETTLE_TEST_VALUE\" = bar && test -z \"$HOME\"").with_env(env);

        let status = SystemProcessRunner::new().run(&invocation).unwrap();
        assert!(status.is_success());
    }

    #[test]
    fn test_missing_program_is_error() {
        let result = SystemProcessRunner::new().run(&Invocation::new("kettle-no-such-tool"));
        assert!(result.is_err());
    }

    #[test]
    fn test_timeout_kills_child() {
        let runner = SystemProcessRunner::new().with_timeout(Duration::from_millis(100));
        let err = runner.run(&sh("sleep 5")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_dry_run_never_fails() {
        let status = DryRunProcessRunner
            .run(&Invocation::new("kettle-no-such-tool"))
            .unwrap();
        assert!(status.is_success());
    }
}
