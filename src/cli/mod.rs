//! CLI command implementations

pub mod batch;
pub mod check;
pub mod preview;
pub mod render;
pub mod settings;
