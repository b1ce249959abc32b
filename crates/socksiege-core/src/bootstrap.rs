//! Pre-flight: make sure the target daemon is running before the siege.
//!
//! The launch is fire-and-forget: the child is detached into its own session
//! via `setsid()` so the harness exiting never signals the daemon. Readiness
//! is the socket file appearing on disk, polled with a hard iteration bound.

use crate::probe::ProcessProbe;
use crate::target::TargetConfig;
use serde::Serialize;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Flag the daemon understands for background operation.
const DAEMON_FLAG: &str = "--daemon";

const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);
const READY_POLL_ATTEMPTS: u32 = 20;

/// Outcome of the pre-flight phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Bootstrap {
    /// The daemon was already alive; nothing was launched.
    AlreadyRunning { pid: Option<u32> },
    /// We launched it and its socket appeared within the poll bound.
    Started { pid: Option<u32> },
    /// Spawning the daemon failed. Not retried.
    LaunchFailed { error: String },
    /// Launched, but the socket never appeared within the poll bound.
    TimedOut { waited_ms: u64 },
}

impl Bootstrap {
    pub fn is_ready(&self) -> bool {
        matches!(self, Bootstrap::AlreadyRunning { .. } | Bootstrap::Started { .. })
    }
}

/// Ensure the target daemon is running. Idempotent: an alive daemon is never
/// launched a second time. At most one launch attempt per call.
pub fn ensure_running(cfg: &TargetConfig, probe: &dyn ProcessProbe) -> Bootstrap {
    let initial = probe.probe(&cfg.process_name);
    if initial.alive {
        tracing::debug!(pid = ?initial.pid, "daemon already running");
        return Bootstrap::AlreadyRunning { pid: initial.pid };
    }

    tracing::info!(name = %cfg.process_name, "launching daemon");
    if let Err(e) = spawn_detached(&cfg.process_name) {
        return Bootstrap::LaunchFailed { error: e.to_string() };
    }

    if wait_for_socket(&cfg.socket_path, READY_POLL_INTERVAL, READY_POLL_ATTEMPTS) {
        Bootstrap::Started {
            pid: probe.probe(&cfg.process_name).pid,
        }
    } else {
        Bootstrap::TimedOut {
            waited_ms: (READY_POLL_INTERVAL * READY_POLL_ATTEMPTS).as_millis() as u64,
        }
    }
}

#[allow(unsafe_code)]
fn spawn_detached(process_name: &str) -> io::Result<()> {
    use std::os::unix::process::CommandExt;

    let mut cmd = Command::new(process_name);
    cmd.arg(DAEMON_FLAG)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    // SAFETY: runs after fork, before exec, in the child. setsid is
    // async-signal-safe and detaches the child from our session so it
    // outlives the harness.
    unsafe {
        cmd.pre_exec(|| {
            nix::unistd::setsid()
                .map(drop)
                .map_err(|e| io::Error::from_raw_os_error(e as i32))
        });
    }
    cmd.spawn().map(drop)
}

/// Poll for `path` to exist, `attempts` times `interval` apart. Returns true
/// as soon as it appears.
pub fn wait_for_socket(path: &Path, interval: Duration, attempts: u32) -> bool {
    for _ in 0..attempts {
        std::thread::sleep(interval);
        if path.exists() {
            return true;
        }
    }
    false
}
