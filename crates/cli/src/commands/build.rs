use anyhow::{Context, Result, bail};
use kettle_core::pipeline::{self, PipelineOptions};
use kettle_core::{
    BuildOrchestrator, DryRunFilesystem, DryRunProcessRunner, SystemProcessRunner,
    TracingObserver,
};
use std::time::Duration;
use tracing::debug;

use crate::cli::Cli;
use crate::display::{ConsoleObserver, failure_message, print_header, render_summary};

pub fn build_command(args: &Cli) -> Result<()> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    debug!("Building {} for {} below {:?}", args.project, args.platform, root);

    if !args.json {
        print_header(&args.project, &args.platform, args.compiler);
    }

    let mut builder = BuildOrchestrator::builder(&root, &args.project, &args.platform);
    builder = if args.json {
        builder.observer(TracingObserver)
    } else {
        builder.observer(ConsoleObserver)
    };
    if args.dry_run {
        builder = builder
            .runner(DryRunProcessRunner)
            .filesystem(DryRunFilesystem);
    } else if let Some(seconds) = args.timeout {
        builder = builder.runner(SystemProcessRunner::new().with_timeout(Duration::from_secs(seconds)));
    }

    let mut orchestrator = builder.build().with_context(|| {
        format!(
            "Failed to prepare project {} for platform {}",
            args.project, args.platform
        )
    })?;

    let report = pipeline::run(&mut orchestrator, &PipelineOptions { purge: args.purge });

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        println!();
        print!("{}", render_summary(&report));
    }

    if let Some(message) = failure_message(&report) {
        bail!(message);
    }
    Ok(())
}
