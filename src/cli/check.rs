//! Environment check command implementation

use anyhow::{Result, bail};

use huskq::config::Config;
use huskq::launch::{HuskLauncher, Launcher};

/// Report whether husk is reachable with the configured PATH prefix
pub fn check_command() -> Result<()> {
    let config = Config::load()?;
    let launcher = HuskLauncher::new(&config.paths.houdini_bin);

    println!("Houdini bin: {}", config.paths.houdini_bin.display());
    if let Some(path) = launcher.resolved_path() {
        println!("Launch PATH: {}", path.to_string_lossy());
    }

    if launcher.is_available() {
        println!("husk: found");
        Ok(())
    } else {
        println!("husk: not found");
        bail!(
            "husk not found; point huskq at a Houdini installation with \
             'huskq settings set --houdini-bin <dir>'"
        );
    }
}
