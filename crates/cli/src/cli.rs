use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

use crate::commands::build_command;

/// Update, configure, build and install one project for one platform
#[derive(Parser, Debug)]
#[command(name = "kettle")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Project to build, as named in conf/project/<project>.cfg
    #[arg(long)]
    pub project: String,

    /// Target platform, as named in conf/platform/<platform>.cfg
    #[arg(long, default_value = "linux")]
    pub platform: String,

    /// Compiler family (informational only)
    #[arg(long, value_enum, default_value_t = Compiler::Gcc)]
    pub compiler: Compiler,

    /// Directory holding conf/, local/, source/, build/ and install/
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Print the commands without executing them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Remove the build directory before configuring
    #[arg(long)]
    pub purge: bool,

    /// Kill any tool that runs longer than this
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Print the pipeline report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compiler {
    Gcc,
    Clang,
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compiler::Gcc => f.write_str("gcc"),
            Compiler::Clang => f.write_str("clang"),
        }
    }
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        build_command(&self)
    }
}
