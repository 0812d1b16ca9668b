//! Capturing the environment exported by a shell script

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use super::EnvironmentMap;

/// Variable set by the shell to the last executed command; never forwarded
pub const SHELL_SELF_REFERENCE: &str = "_";

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("environment script {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to run environment script {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("environment script {} exited with {}", .path.display(), describe_exit(.code))]
    Failed { path: PathBuf, code: Option<i32> },

    #[error("unparsable output from environment script {}: {reason}", .path.display())]
    Unparsable { path: PathBuf, reason: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Produces the environment resulting from sourcing a script.
///
/// Implementations run the script in a clean shell, return every exported
/// variable except [`SHELL_SELF_REFERENCE`], and fail instead of falling back
/// when the script is missing, exits non-zero, or its output cannot be read.
pub trait ScriptEnvironment: Send + Sync {
    fn environment_from_script(&self, path: &Path) -> Result<EnvironmentMap, ScriptError>;
}

/// Sources the script with bash inside an emptied environment (`env -i`)
#[derive(Debug, Clone)]
pub struct BashScriptEnvironment {
    shell: PathBuf,
    env_program: PathBuf,
}

impl BashScriptEnvironment {
    pub fn new() -> Self {
        Self {
            shell: PathBuf::from("/bin/bash"),
            env_program: PathBuf::from("/usr/bin/env"),
        }
    }
}

impl Default for BashScriptEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEnvironment for BashScriptEnvironment {
    fn environment_from_script(&self, path: &Path) -> Result<EnvironmentMap, ScriptError> {
        if !path.is_file() {
            return Err(ScriptError::NotFound(path.to_path_buf()));
        }
        // `source` searches PATH for names without a slash
        let script = std::path::absolute(path).map_err(|source| ScriptError::Spawn {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Sourcing environment script {:?} with {:?}", script, self.shell);
        // Script and env paths travel as $0 and $1 so they never need quoting,
        // and env is called by absolute path since the script may replace PATH
        let output = Command::new(&self.env_program)
            .arg("-i")
            .arg(&self.shell)
            .args(["--norc", "--noprofile", "-c", "source \"$0\" && exec \"$1\" -0"])
            .arg(&script)
            .arg(&self.env_program)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ScriptError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(ScriptError::Failed {
                path: path.to_path_buf(),
                code: output.status.code(),
            });
        }

        parse_env_dump(&output.stdout, path)
    }
}

/// Parse NUL separated `NAME=VALUE` records as printed by `env -0`
pub fn parse_env_dump(bytes: &[u8], path: &Path) -> Result<EnvironmentMap, ScriptError> {
    let unparsable = |reason: String| ScriptError::Unparsable {
        path: path.to_path_buf(),
        reason,
    };

    let text = std::str::from_utf8(bytes)
        .map_err(|e| unparsable(format!("output is not valid UTF-8 ({e})")))?;

    let mut environment = EnvironmentMap::new();
    let mut records = text.split('\0').filter(|r| !r.is_empty()).peekable();
    // env always prints something, so no records means it never ran
    if records.peek().is_none() {
        return Err(unparsable("no environment was printed".to_string()));
    }
    for record in records {
        let Some((name, value)) = record.split_once('=') else {
            return Err(unparsable(format!("record without '=': {record:?}")));
        };
        if name.is_empty() {
            return Err(unparsable(format!("record without a name: {record:?}")));
        }
        environment.insert(name, value);
    }

    environment.remove(SHELL_SELF_REFERENCE);
    Ok(environment)
}
