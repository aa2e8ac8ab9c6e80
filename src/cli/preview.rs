//! Preview command implementation

use anyhow::Result;
use clap::Args;

use huskq::command::format_command;
use huskq::config::Config;
use huskq::domain::{JobForm, RenderMode, Renderer};

/// Arguments for `huskq preview`
#[derive(Args, Debug)]
pub struct PreviewArgs {
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

    /// Print the job and command as JSON
    #[arg(long)]
    pub json: bool,
}

/// Print the exact husk command a job would launch
pub fn preview_command(args: PreviewArgs) -> Result<()> {
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

    if args.json {
        let payload = serde_json::json!({
            "job": job,
            "command": command,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{command}");
    }

    Ok(())
}
