use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of progress event emitted while working the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEventKind {
    /// A job was added to the queue
    Queued,
    /// A render command is being handed to the launcher
    Launch,
    /// The launcher failed to start a render
    LaunchFailed,
    /// Every queued render has been handed off
    BatchDone,
    /// System message (e.g., empty queue notice)
    System,
}

impl std::fmt::Display for LogEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEventKind::Queued => write!(f, "queued"),
            LogEventKind::Launch => write!(f, "launch"),
            LogEventKind::LaunchFailed => write!(f, "failed"),
            LogEventKind::BatchDone => write!(f, "done"),
            LogEventKind::System => write!(f, "system"),
        }
    }
}

/// A progress event for display to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    /// When this event occurred
    pub timestamp: DateTime<Utc>,

    /// The kind of event
    pub kind: LogEventKind,

    /// Human-readable summary, including the render command where relevant
    pub summary: String,
}

impl LogEvent {
    /// Create a new log event
    pub fn new(kind: LogEventKind, summary: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            summary: summary.into(),
        }
    }

    /// Create a queued event carrying the command preview
    pub fn queued(command: &str) -> Self {
        Self::new(LogEventKind::Queued, format!("added to queue: {command}"))
    }

    /// Create a launch event carrying the exact command handed off
    pub fn launch(scene_path: &str, command: &str) -> Self {
        Self::new(
            LogEventKind::Launch,
            format!("launching render for '{scene_path}': {command}"),
        )
    }

    /// Create a launch failure event
    pub fn launch_failed(detail: impl std::fmt::Display) -> Self {
        Self::new(LogEventKind::LaunchFailed, format!("launch failed: {detail}"))
    }

    /// Create a batch completion event
    pub fn batch_done(count: usize) -> Self {
        Self::new(
            LogEventKind::BatchDone,
            format!("all {count} queued render(s) launched"),
        )
    }

    /// Create a system event
    pub fn system(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::System, summary)
    }
}

/// Receiver for queue progress events
///
/// The queue pushes events here as it works; implementations decide how
/// to surface them (terminal, buffer, test capture).
pub trait LogSink {
    /// Accept one event
    fn append(&mut self, event: LogEvent);
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct BufferSink {
    events: Vec<LogEvent>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far, oldest first
    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }
}

impl LogSink for BufferSink {
    fn append(&mut self, event: LogEvent) {
        self.events.push(event);
    }
}

/// Sink that forwards events to the tracing subscriber
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn append(&mut self, event: LogEvent) {
        tracing::info!("[{}] {}", event.kind, event.summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_sink_keeps_events_in_order() {
        let mut sink = BufferSink::new();
        sink.append(LogEvent::queued("husk ..."));
        sink.append(LogEvent::batch_done(1));
        let kinds: Vec<LogEventKind> = sink.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![LogEventKind::Queued, LogEventKind::BatchDone]);
    }

    #[test]
    fn launch_event_carries_the_command() {
        let event = LogEvent::launch("/s.usd", "husk --frame 1 ...");
        assert!(
            event.summary.contains("husk --frame 1 ..."),
            "summary should embed the exact command: {}",
            event.summary
        );
    }
}
