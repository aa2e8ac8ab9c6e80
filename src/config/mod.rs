//! Configuration loading and management

mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::command::MidpointPolicy;

/// Main configuration structure, stored at ~/.huskq/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// External tool locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            settings: Settings::default(),
        }
    }
}

/// External tool locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory containing the husk binary; prepended to PATH on launch
    #[serde(default = "default_houdini_bin")]
    pub houdini_bin: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            houdini_bin: default_houdini_bin(),
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Empty the queue after a batch run instead of keeping it for relaunch
    #[serde(default = "default_clear_after_run")]
    pub clear_after_run: bool,

    /// Rounding for the middle frame of FML jobs with an even frame count
    #[serde(default)]
    pub midpoint: MidpointPolicy,

    /// Launch batch renders detached instead of waiting for each one
    #[serde(default = "default_detach_batch")]
    pub detach_batch: bool,

    /// Launch single renders detached instead of waiting
    #[serde(default = "default_detach_single")]
    pub detach_single: bool,
}

fn default_houdini_bin() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\Side Effects Software\Houdini 20.5.487\bin")
    } else {
        PathBuf::from("/opt/hfs20.5/bin")
    }
}

fn default_clear_after_run() -> bool {
    false
}

fn default_detach_batch() -> bool {
    true
}

fn default_detach_single() -> bool {
    false
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clear_after_run: default_clear_after_run(),
            midpoint: MidpointPolicy::default(),
            detach_batch: default_detach_batch(),
            detach_single: default_detach_single(),
        }
    }
}
