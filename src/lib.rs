//! huskq - batch render queue for Houdini's husk
//!
//! huskq queues USD scene renders, formats the exact husk command line
//! for each job, and launches the commands through the platform shell
//! with the configured Houdini bin directory first on PATH.
//!
//! ## Workflow
//!
//! 1. **Single render**: `huskq render` validates one job and launches it.
//!
//! 2. **Batch**: `huskq batch jobs.toml` validates every entry of a TOML
//!    job list, queues them in file order, then launches the whole queue.
//!    The queue lives in memory for that invocation only.

pub mod batch;
pub mod command;
pub mod config;
pub mod domain;
pub mod launch;
pub mod queue;

pub use domain::*;
