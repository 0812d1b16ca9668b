use std::io;
use std::path::PathBuf;

use crate::environment::ScriptError;

/// Errors that can occur while setting up a kettle build
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Parse error in {}:{line}: {message}", .path.display())]
    ConfigParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid value for \"{key}\": \"{value}\" (expected {expected})")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid {what} name: \"{value}\"")]
    InvalidName { what: &'static str, value: String },

    #[error("Environment script error: {0}")]
    Script(#[from] ScriptError),
}

/// Result type alias for kettle operations
pub type Result<T> = std::result::Result<T, Error>;
