//! Launching render commands through the platform shell
//!
//! The queue never talks to `std::process` directly; it goes through the
//! [`Launcher`] trait so tests can substitute a recording fake. The real
//! [`HuskLauncher`] resolves its environment once per construction, from
//! the current process environment, with the configured Houdini bin
//! directory prepended to PATH. Launching many jobs therefore never
//! accumulates duplicate PATH entries.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::command::HUSK_BIN;

/// How a launched render relates to the calling process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Spawn the process and return immediately, leaving it running
    Detached,
    /// Wait for the process to exit and report its status
    Blocking,
}

impl std::fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchMode::Detached => write!(f, "detached"),
            LaunchMode::Blocking => write!(f, "blocking"),
        }
    }
}

/// Result of a launch whose process was successfully spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// OS process id of the spawned shell
    pub pid: u32,

    /// Exit code, when the launch waited and the process exited with one
    ///
    /// Always `None` for detached launches, and `None` for a blocking
    /// launch whose process was killed by a signal.
    pub status: Option<i32>,

    /// Whether the launch counts as successful: spawn succeeded for
    /// detached launches, exit status zero for blocking ones
    pub success: bool,
}

/// A launch that failed before producing an outcome
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The platform shell could not be spawned at all
    #[error("failed to spawn shell for render command: {source}")]
    Spawn { source: std::io::Error },
    /// Waiting on a blocking launch failed
    #[error("failed to wait for render process: {source}")]
    Wait { source: std::io::Error },
}

/// Trait for handing formatted render commands to the system
pub trait Launcher {
    /// Launch one fully formatted command line
    fn launch(&self, command: &str, mode: LaunchMode) -> Result<LaunchOutcome, LaunchError>;

    /// Check if the husk binary is reachable through this launcher's PATH
    fn is_available(&self) -> bool;
}

/// Launcher that runs commands through `sh -c` (or `cmd /C` on Windows)
/// with the Houdini bin directory first on PATH
pub struct HuskLauncher {
    env: Vec<(OsString, OsString)>,
}

impl HuskLauncher {
    /// Build a launcher for the given Houdini bin directory
    pub fn new(houdini_bin: &Path) -> Self {
        Self {
            env: launch_env(houdini_bin),
        }
    }

    /// The PATH value launched processes will see
    pub fn resolved_path(&self) -> Option<&OsStr> {
        self.env
            .iter()
            .find(|(key, _)| is_path_key(key))
            .map(|(_, value)| value.as_os_str())
    }

    fn shell_command(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

impl Launcher for HuskLauncher {
    fn launch(&self, command: &str, mode: LaunchMode) -> Result<LaunchOutcome, LaunchError> {
        let mut shell = Self::shell_command(command);
        shell.env_clear().envs(self.env.iter().map(|(k, v)| (k, v)));

        match mode {
            LaunchMode::Detached => {
                // No terminal window and no inherited stdio; the render
                // keeps running after huskq exits.
                shell
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null());
                let child = shell.spawn().map_err(|source| LaunchError::Spawn { source })?;
                Ok(LaunchOutcome {
                    pid: child.id(),
                    status: None,
                    success: true,
                })
            }
            LaunchMode::Blocking => {
                let mut child = shell.spawn().map_err(|source| LaunchError::Spawn { source })?;
                let pid = child.id();
                let status = child.wait().map_err(|source| LaunchError::Wait { source })?;
                Ok(LaunchOutcome {
                    pid,
                    status: status.code(),
                    success: status.success(),
                })
            }
        }
    }

    fn is_available(&self) -> bool {
        let exe = if cfg!(windows) { "husk.exe" } else { HUSK_BIN };
        match self.resolved_path() {
            Some(path) => std::env::split_paths(path).any(|dir| dir.join(exe).is_file()),
            None => false,
        }
    }
}

/// Whether an environment key names the search path
///
/// Windows environment keys are case-insensitive (`Path` is the common
/// spelling there); Unix keys are not, so a lowercase `path` stays an
/// ordinary variable on Unix.
fn is_path_key(key: &OsStr) -> bool {
    if cfg!(windows) {
        key.eq_ignore_ascii_case("PATH")
    } else {
        key == "PATH"
    }
}

/// Snapshot of the current process environment with the Houdini bin
/// directory prepended to PATH
///
/// The snapshot is rebuilt from `std::env` on each call, so constructing
/// launchers repeatedly keeps PATH at a fixed length instead of stacking
/// one prefix per launch.
pub fn launch_env(houdini_bin: &Path) -> Vec<(OsString, OsString)> {
    let mut env = Vec::new();
    let mut path_seen = false;
    for (key, value) in std::env::vars_os() {
        if !path_seen && is_path_key(&key) {
            let prefixed = prefixed_path(houdini_bin, Some(value.as_os_str()));
            env.push((key, prefixed));
            path_seen = true;
        } else {
            env.push((key, value));
        }
    }
    if !path_seen {
        env.push((OsString::from("PATH"), prefixed_path(houdini_bin, None)));
    }
    env
}

/// PATH value with the Houdini bin directory first
///
/// Uses the platform separator (";" on Windows, ":" elsewhere) and keeps
/// the previous value verbatim after the prefix.
pub fn prefixed_path(houdini_bin: &Path, current: Option<&OsStr>) -> OsString {
    let mut path = OsString::from(houdini_bin.as_os_str());
    if let Some(current) = current {
        if !current.is_empty() {
            path.push(if cfg!(windows) { ";" } else { ":" });
            path.push(current);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEP: &str = if cfg!(windows) { ";" } else { ":" };

    #[test]
    fn prefixed_path_puts_houdini_bin_first() {
        let base = OsString::from(format!("/usr/bin{SEP}/bin"));
        let path = prefixed_path(Path::new("/opt/hfs20.5/bin"), Some(base.as_os_str()));
        assert_eq!(
            path,
            OsString::from(format!("/opt/hfs20.5/bin{SEP}/usr/bin{SEP}/bin"))
        );
    }

    #[test]
    fn prefixed_path_is_stable_across_repeated_calls() {
        let base = OsString::from("/usr/bin");
        let first = prefixed_path(Path::new("/opt/hfs20.5/bin"), Some(base.as_os_str()));
        let second = prefixed_path(Path::new("/opt/hfs20.5/bin"), Some(base.as_os_str()));
        assert_eq!(first, second, "prefix applies to the base value, never to a previous result");
    }

    #[test]
    fn prefixed_path_without_existing_path_is_just_the_bin_dir() {
        let path = prefixed_path(Path::new("/opt/hfs20.5/bin"), None);
        assert_eq!(path, OsString::from("/opt/hfs20.5/bin"));
    }

    #[cfg(not(windows))]
    #[test]
    fn lowercase_path_is_not_the_search_path() {
        assert!(is_path_key(OsStr::new("PATH")));
        assert!(
            !is_path_key(OsStr::new("path")),
            "on Unix a lowercase 'path' variable must keep its own value"
        );
        assert!(!is_path_key(OsStr::new("Path")));
    }

    #[cfg(windows)]
    #[test]
    fn path_key_casing_is_ignored() {
        assert!(is_path_key(OsStr::new("Path")));
        assert!(is_path_key(OsStr::new("PATH")));
    }

    #[test]
    fn launch_env_has_exactly_one_path_entry() {
        let env = launch_env(Path::new("/opt/hfs20.5/bin"));
        let count = env.iter().filter(|(key, _)| is_path_key(key)).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn launch_env_path_starts_with_houdini_bin() {
        let env = launch_env(Path::new("/opt/hfs20.5/bin"));
        let path = env
            .iter()
            .find(|(key, _)| is_path_key(key))
            .map(|(_, value)| value.to_string_lossy().into_owned())
            .unwrap_or_default();
        assert!(
            path.starts_with("/opt/hfs20.5/bin"),
            "PATH should start with the Houdini bin dir: {path}"
        );
    }

    #[test]
    fn is_available_finds_a_husk_binary_in_the_bin_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let exe = if cfg!(windows) { "husk.exe" } else { "husk" };
        std::fs::write(dir.path().join(exe), b"").expect("write fake husk");
        let launcher = HuskLauncher::new(dir.path());
        assert!(launcher.is_available(), "fake husk should be found via the PATH prefix");
    }

    #[cfg(unix)]
    #[test]
    fn blocking_launch_reports_nonzero_exit() {
        let launcher = HuskLauncher::new(Path::new("/opt/hfs20.5/bin"));
        let outcome = launcher
            .launch("exit 3", LaunchMode::Blocking)
            .expect("sh should spawn");
        assert_eq!(outcome.status, Some(3));
        assert!(!outcome.success);
    }

    #[cfg(unix)]
    #[test]
    fn blocking_launch_succeeds_on_zero_exit() {
        let launcher = HuskLauncher::new(Path::new("/opt/hfs20.5/bin"));
        let outcome = launcher
            .launch("true", LaunchMode::Blocking)
            .expect("sh should spawn");
        assert_eq!(outcome.status, Some(0));
        assert!(outcome.success);
    }

    #[cfg(unix)]
    #[test]
    fn detached_launch_returns_without_waiting() {
        let launcher = HuskLauncher::new(Path::new("/opt/hfs20.5/bin"));
        let outcome = launcher
            .launch("true", LaunchMode::Detached)
            .expect("sh should spawn");
        assert!(outcome.success);
        assert_eq!(outcome.status, None, "detached launches never observe an exit status");
        assert_ne!(outcome.pid, 0);
    }
}
