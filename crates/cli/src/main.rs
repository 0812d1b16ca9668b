use anyhow::Result;
use clap::Parser;
use kettle::Cli;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays reserved for progress and --json output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().execute()
}
