//! Flood: maximum command throughput and concurrency pressure on the
//! accept path. N workers, each firing M sequential commands.

use crate::socket::connect_send_close;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FloodSpec {
    pub workers: u32,
    pub attempts_per_worker: u32,
    /// Command written on every attempt.
    pub command: Vec<u8>,
    pub attempt_timeout: Duration,
    /// Keeps the workers themselves from being the bottleneck.
    pub inter_attempt_delay: Duration,
}

impl Default for FloodSpec {
    fn default() -> Self {
        Self {
            workers: 10,
            attempts_per_worker: 50,
            command: b"NEXT".to_vec(),
            attempt_timeout: Duration::from_secs(1),
            inter_attempt_delay: Duration::from_millis(1),
        }
    }
}

impl FloodSpec {
    pub fn total_ops(&self) -> u32 {
        self.workers * self.attempts_per_worker
    }
}

/// What one worker managed before the join barrier.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerOutcome {
    pub worker: u32,
    pub sent: u32,
    pub attempted: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloodMetrics {
    pub total_ops: u32,
    pub sent: u32,
    pub elapsed_ms: u64,
    pub ops_per_sec: f64,
    pub workers: Vec<WorkerOutcome>,
}

/// Run the flood and aggregate after every worker has terminated.
///
/// Outcomes travel over a channel; each worker owns exactly one send, and the
/// receiver is drained only after the join barrier, so there is no concurrent
/// read/write on the aggregate.
pub fn run(endpoint: &Path, spec: &FloodSpec) -> FloodMetrics {
    let start = Instant::now();
    let (tx, rx) = mpsc::channel::<WorkerOutcome>();

    let mut handles = Vec::with_capacity(spec.workers as usize);
    for worker in 0..spec.workers {
        let tx = tx.clone();
        let endpoint: PathBuf = endpoint.to_path_buf();
        let spec = spec.clone();
        handles.push(thread::spawn(move || {
            let mut sent = 0;
            for _ in 0..spec.attempts_per_worker {
                if connect_send_close(&endpoint, Some(&spec.command), spec.attempt_timeout)
                    .is_success()
                {
                    sent += 1;
                }
                thread::sleep(spec.inter_attempt_delay);
            }
            let _ = tx.send(WorkerOutcome {
                worker,
                sent,
                attempted: spec.attempts_per_worker,
            });
        }));
    }
    drop(tx);

    // Join barrier: nothing below runs while a worker is still firing.
    for handle in handles {
        let _ = handle.join();
    }

    let mut workers: Vec<WorkerOutcome> = rx.into_iter().collect();
    workers.sort_by_key(|w| w.worker);

    let sent = workers.iter().map(|w| w.sent).sum();
    let elapsed = start.elapsed();
    let total_ops = spec.total_ops();
    tracing::info!(total_ops, sent, ?elapsed, "flood complete");

    FloodMetrics {
        total_ops,
        sent,
        elapsed_ms: elapsed.as_millis() as u64,
        ops_per_sec: f64::from(total_ops) / elapsed.as_secs_f64().max(f64::EPSILON),
        workers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::os::unix::net::UnixListener;

    fn drain_forever(listener: UnixListener) {
        thread::spawn(move || {
            for conn in listener.incoming() {
                let Ok(mut conn) = conn else { break };
                let mut sink = Vec::new();
                let _ = conn.read_to_end(&mut sink);
            }
        });
    }

    fn small_spec() -> FloodSpec {
        FloodSpec {
            workers: 3,
            attempts_per_worker: 4,
            inter_attempt_delay: Duration::from_micros(100),
            ..FloodSpec::default()
        }
    }

    #[test]
    fn every_worker_reports_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flood.sock");
        drain_forever(UnixListener::bind(&path).unwrap());

        let metrics = run(&path, &small_spec());
        assert_eq!(metrics.workers.len(), 3);
        assert_eq!(metrics.total_ops, 12);
        assert_eq!(metrics.sent, 12);
        for (i, w) in metrics.workers.iter().enumerate() {
            assert_eq!(w.worker, i as u32);
            assert_eq!(w.attempted, 4);
        }
    }

    #[test]
    fn sent_never_exceeds_total_even_when_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nobody-home.sock");

        let metrics = run(&path, &small_spec());
        assert_eq!(metrics.sent, 0);
        assert!(metrics.sent <= metrics.total_ops);
        assert_eq!(metrics.workers.len(), 3);
    }

    #[test]
    fn default_catalog_is_ten_by_fifty() {
        let spec = FloodSpec::default();
        assert_eq!(spec.workers, 10);
        assert_eq!(spec.attempts_per_worker, 50);
        assert_eq!(spec.total_ops(), 500);
        assert_eq!(spec.command, b"NEXT");
    }

    #[test]
    fn full_flood_hits_the_catalog_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flood.sock");
        drain_forever(UnixListener::bind(&path).unwrap());

        let metrics = run(&path, &FloodSpec::default());
        assert_eq!(metrics.total_ops, 500);
        assert_eq!(metrics.sent, 500);
        assert!(metrics.ops_per_sec > 0.0);
    }
}
