//! Batch command implementation

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;

use huskq::batch::{enqueue_all, load_jobs};
use huskq::config::Config;
use huskq::domain::{LogEvent, LogSink, TracingSink};
use huskq::launch::{HuskLauncher, LaunchMode};
use huskq::queue::RenderQueue;

/// Arguments for `huskq batch`
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Path to the TOML job list
    pub jobs: PathBuf,

    /// Launch each render detached instead of waiting for it
    #[arg(long, conflicts_with = "wait")]
    pub detach: bool,

    /// Wait for each render to exit before launching the next
    #[arg(long)]
    pub wait: bool,

    /// Validate the whole list and print every command without launching
    #[arg(long)]
    pub dry_run: bool,
}

/// Queue every job in the list, then launch the queue in order
///
/// Validation happens for the whole list up front: the first invalid
/// entry aborts the command before anything launches.
pub fn batch_command(args: BatchArgs) -> Result<()> {
    let config = Config::load()?;
    let forms = load_jobs(&args.jobs)?;

    let mut queue = RenderQueue::new(config.settings.midpoint)
        .with_clear_after_run(config.settings.clear_after_run);
    let mut sink = TracingSink;

    for queued in enqueue_all(&mut queue, &forms, &args.jobs)? {
        sink.append(LogEvent::queued(&queued.command));
    }

    if queue.is_empty() {
        sink.append(LogEvent::system("render queue is empty"));
        return Ok(());
    }

    if args.dry_run {
        for preview in queue.previews() {
            println!("{preview}");
        }
        return Ok(());
    }

    let mode = if args.wait {
        LaunchMode::Blocking
    } else if args.detach || config.settings.detach_batch {
        LaunchMode::Detached
    } else {
        LaunchMode::Blocking
    };

    let launcher = HuskLauncher::new(&config.paths.houdini_bin);
    let reports = queue.run_all(&launcher, mode, &mut sink);

    let failed = reports.iter().filter(|report| !report.success()).count();
    for report in &reports {
        let marker = if report.success() { "ok" } else { "FAILED" };
        println!("[{marker}] {}", report.command);
    }
    println!(
        "{} of {} render(s) launched.",
        reports.len() - failed,
        reports.len()
    );

    if failed > 0 {
        bail!("{failed} of {} render(s) failed to launch", reports.len());
    }
    Ok(())
}
