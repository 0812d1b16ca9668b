//! Execution of external tools (git, the meta-build system, the build tool)

mod invocation;
mod runner;

pub use invocation::{Invocation, ProcessStatus};
pub use runner::{DryRunProcessRunner, ProcessRunner, SystemProcessRunner};
