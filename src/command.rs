//! Construction of husk command strings
//!
//! Every launch goes through [`format_command`], so the string shown in
//! previews and logs is byte-for-byte the string handed to the shell.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::{RenderJob, RenderMode};

/// Name of the external renderer binary, resolved through PATH
pub const HUSK_BIN: &str = "husk";

/// How the middle frame of an FML sample is rounded when the range
/// has an even number of frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MidpointPolicy {
    /// Round the midpoint down
    #[default]
    Floor,
    /// Round the midpoint up
    Ceil,
}

/// The three frames an FML job samples: first, middle, last
///
/// The middle frame is the floor (or ceiling) of (start + end) / 2.
/// Floor division is used even for negative frames, so a range like
/// -5..-2 yields a middle of -4 under [`MidpointPolicy::Floor`]. The
/// sum is taken in 128 bits, so frame values near the i64 limits stay
/// exact; the midpoint of two i64 values always fits back in an i64.
pub fn fml_frames(start: i64, end: i64, midpoint: MidpointPolicy) -> [i64; 3] {
    let sum = start as i128 + end as i128;
    let middle = match midpoint {
        MidpointPolicy::Floor => sum.div_euclid(2),
        MidpointPolicy::Ceil => (sum + 1).div_euclid(2),
    };
    [start, middle as i64, end]
}

/// Format the husk command line for a job
///
/// Full sequence:
///   `husk --frame <start> --frame-count <count> --renderer <delegate> --res-scale <res> "<scene>"`
///
/// FML:
///   `husk --frame-list <first> <middle> <last> --renderer <delegate> --res-scale <res> "<scene>"`
///
/// The scene path is wrapped in double quotes but not escaped; paths
/// containing a double quote will produce a broken command line.
pub fn format_command(job: &RenderJob, midpoint: MidpointPolicy) -> String {
    let delegate = job.renderer.hydra_delegate();
    match job.mode {
        RenderMode::FullSequence => format!(
            "{HUSK_BIN} --frame {} --frame-count {} --renderer {delegate} --res-scale {} \"{}\"",
            job.start_frame,
            job.frame_count(),
            job.res_scale,
            job.scene_path
        ),
        RenderMode::Fml => {
            let [first, middle, last] = fml_frames(job.start_frame, job.end_frame, midpoint);
            format!(
                "{HUSK_BIN} --frame-list {first} {middle} {last} --renderer {delegate} --res-scale {} \"{}\"",
                job.res_scale, job.scene_path
            )
        }
    }
}
