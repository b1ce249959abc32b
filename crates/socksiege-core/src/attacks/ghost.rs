//! Ghost: connection churn with nothing sent. Sequential by design — this
//! targets accept/teardown over time, not simultaneity.

use crate::socket::connect_send_close;
use serde::Serialize;
use std::path::Path;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GhostSpec {
    pub cycles: u32,
    pub attempt_timeout: Duration,
    pub inter_attempt_delay: Duration,
}

impl Default for GhostSpec {
    fn default() -> Self {
        Self {
            cycles: 50,
            attempt_timeout: Duration::from_millis(500),
            inter_attempt_delay: Duration::from_millis(10),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GhostMetrics {
    pub cycles: u32,
    pub connected: u32,
    /// Informational only; the post-loop liveness probe decides pass/fail.
    pub failed: u32,
}

pub fn run(endpoint: &Path, spec: &GhostSpec) -> GhostMetrics {
    let mut connected = 0;
    let mut failed = 0;
    for _ in 0..spec.cycles {
        if connect_send_close(endpoint, None, spec.attempt_timeout).is_success() {
            connected += 1;
        } else {
            failed += 1;
        }
        thread::sleep(spec.inter_attempt_delay);
    }
    tracing::info!(connected, failed, "ghost complete");
    GhostMetrics {
        cycles: spec.cycles,
        connected,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::os::unix::net::UnixListener;

    fn small_spec() -> GhostSpec {
        GhostSpec {
            cycles: 6,
            inter_attempt_delay: Duration::from_micros(100),
            ..GhostSpec::default()
        }
    }

    #[test]
    fn tallies_every_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghost.sock");
        let listener = UnixListener::bind(&path).unwrap();
        thread::spawn(move || {
            for conn in listener.incoming() {
                let Ok(mut conn) = conn else { break };
                let mut sink = Vec::new();
                let _ = conn.read_to_end(&mut sink);
            }
        });

        let metrics = run(&path, &small_spec());
        assert_eq!(metrics.cycles, 6);
        assert_eq!(metrics.connected, 6);
        assert_eq!(metrics.failed, 0);
    }

    #[test]
    fn dead_endpoint_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nobody-home.sock");
        let metrics = run(&path, &small_spec());
        assert_eq!(metrics.connected, 0);
        assert_eq!(metrics.failed, 6);
    }

    #[test]
    fn default_catalog_is_fifty_cycles() {
        assert_eq!(GhostSpec::default().cycles, 50);
    }
}
