//! Single-render command implementation

use anyhow::{Result, bail};
use clap::Args;

use huskq::command::format_command;
use huskq::config::Config;
use huskq::domain::{JobForm, LogEvent, LogSink, RenderMode, Renderer, TracingSink};
use huskq::launch::{HuskLauncher, LaunchMode, Launcher};

/// Arguments for `huskq render`
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the USD scene file
    #[arg(long)]
    pub scene: String,

    /// First frame of the range (inclusive)
    #[arg(long)]
    pub start: String,

    /// Last frame of the range (inclusive)
    #[arg(long)]
    pub end: String,

    /// Resolution scale percentage
    #[arg(long)]
    pub res: String,

    /// Render backend
    #[arg(long, value_enum, default_value = "karma")]
    pub renderer: Renderer,

    /// Frame selection: every frame, or first/middle/last only
    #[arg(long, value_enum, default_value = "full")]
    pub mode: RenderMode,

    /// Launch detached instead of waiting for husk to exit
    #[arg(long, conflicts_with = "wait")]
    pub detach: bool,

    /// Wait for husk to exit before returning
    #[arg(long)]
    pub wait: bool,

    /// Print the command without launching anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Validate one render job and launch it
pub fn render_command(args: RenderArgs) -> Result<()> {
    let config = Config::load()?;

    let form = JobForm::new(
        args.scene,
        args.start,
        args.end,
        args.res,
        args.renderer,
        args.mode,
    );
    let job = form.validate()?;
    let command = format_command(&job, config.settings.midpoint);

    if args.dry_run {
        println!("{command}");
        return Ok(());
    }

    let mode = if args.wait {
        LaunchMode::Blocking
    } else if args.detach || config.settings.detach_single {
        LaunchMode::Detached
    } else {
        LaunchMode::Blocking
    };

    let launcher = HuskLauncher::new(&config.paths.houdini_bin);
    let mut sink = TracingSink;
    sink.append(LogEvent::launch(&job.scene_path, &command));

    match launcher.launch(&command, mode) {
        Ok(outcome) if outcome.success => {
            match mode {
                LaunchMode::Detached => println!("Launched render (pid {}).", outcome.pid),
                LaunchMode::Blocking => println!("Render finished."),
            }
            Ok(())
        }
        Ok(outcome) => {
            let detail = match outcome.status {
                Some(code) => format!("husk exited with code {code}"),
                None => "husk was terminated before exiting".to_string(),
            };
            sink.append(LogEvent::launch_failed(&detail));
            bail!("{detail}");
        }
        Err(err) => {
            sink.append(LogEvent::launch_failed(&err));
            Err(err.into())
        }
    }
}
