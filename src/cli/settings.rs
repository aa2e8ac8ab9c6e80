//! Settings command implementation

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Subcommand;

use huskq::command::MidpointPolicy;
use huskq::config::Config;

/// Subcommands for `huskq settings`
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the effective configuration and where it is stored
    Show,

    /// Update configuration values and save them
    Set {
        /// Directory containing the husk binary
        #[arg(long)]
        houdini_bin: Option<PathBuf>,

        /// Empty the queue after a batch run (true/false)
        #[arg(long)]
        clear_after_run: Option<bool>,

        /// Midpoint rounding for FML jobs
        #[arg(long, value_enum)]
        midpoint: Option<MidpointPolicy>,

        /// Launch batch renders detached (true/false)
        #[arg(long)]
        detach_batch: Option<bool>,

        /// Launch single renders detached (true/false)
        #[arg(long)]
        detach_single: Option<bool>,
    },
}

/// Show or edit the stored configuration
pub fn settings_command(action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => show(),
        SettingsAction::Set {
            houdini_bin,
            clear_after_run,
            midpoint,
            detach_batch,
            detach_single,
        } => set(houdini_bin, clear_after_run, midpoint, detach_batch, detach_single),
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    println!("Config file: {}", Config::config_path().display());
    println!();
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn set(
    houdini_bin: Option<PathBuf>,
    clear_after_run: Option<bool>,
    midpoint: Option<MidpointPolicy>,
    detach_batch: Option<bool>,
    detach_single: Option<bool>,
) -> Result<()> {
    if houdini_bin.is_none()
        && clear_after_run.is_none()
        && midpoint.is_none()
        && detach_batch.is_none()
        && detach_single.is_none()
    {
        bail!(
            "nothing to set; pass at least one of --houdini-bin, --clear-after-run, \
             --midpoint, --detach-batch, --detach-single"
        );
    }

    let mut config = Config::load()?;
    if let Some(dir) = houdini_bin {
        config.paths.houdini_bin = dir;
    }
    if let Some(clear) = clear_after_run {
        config.settings.clear_after_run = clear;
    }
    if let Some(policy) = midpoint {
        config.settings.midpoint = policy;
    }
    if let Some(detach) = detach_batch {
        config.settings.detach_batch = detach;
    }
    if let Some(detach) = detach_single {
        config.settings.detach_single = detach;
    }

    let path = Config::config_path();
    config.save_to_file(&path)?;

    // Show what the file now contains, not what we think we wrote.
    let saved = Config::from_file(&path)?;
    println!("Settings updated: {}", path.display());
    println!();
    print!("{}", toml::to_string_pretty(&saved)?);
    Ok(())
}
