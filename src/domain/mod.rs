//! Core domain types for huskq

mod job;
mod log_event;

pub use job::{JobForm, RenderJob, RenderMode, Renderer, ValidationError};
pub use log_event::{BufferSink, LogEvent, LogEventKind, LogSink, TracingSink};
