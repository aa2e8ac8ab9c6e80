//! Shared test utilities for queue integration tests

use std::cell::RefCell;

use huskq::launch::{LaunchError, LaunchMode, LaunchOutcome, Launcher};

/// Launcher double that records every command it is handed
pub struct RecordingLauncher {
    launches: RefCell<Vec<(String, LaunchMode)>>,
    fail_at: Option<usize>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self {
            launches: RefCell::new(Vec::new()),
            fail_at: None,
        }
    }

    /// A launcher whose nth launch fails to spawn
    pub fn failing_at(index: usize) -> Self {
        Self {
            launches: RefCell::new(Vec::new()),
            fail_at: Some(index),
        }
    }

    /// Every command handed over so far, in launch order
    pub fn commands(&self) -> Vec<String> {
        self.launches
            .borrow()
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }

    /// The launch mode used for each launch, in launch order
    pub fn modes(&self) -> Vec<LaunchMode> {
        self.launches.borrow().iter().map(|(_, mode)| *mode).collect()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, command: &str, mode: LaunchMode) -> Result<LaunchOutcome, LaunchError> {
        let index = self.launches.borrow().len();
        self.launches.borrow_mut().push((command.to_string(), mode));
        if self.fail_at == Some(index) {
            return Err(LaunchError::Spawn {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "husk not found"),
            });
        }
        Ok(LaunchOutcome {
            pid: 4000 + index as u32,
            status: None,
            success: true,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}
