//! Garbage: arbitrary non-protocol bytes in escalating sizes. The property
//! under test is crash/no-crash, which should depend on size class and
//! malformedness, not on the particular byte values — so the RNG is seeded
//! for diagnostics, not reproducibility of the daemon's behavior.

use crate::socket::connect_send_close;
use rand::RngCore;
use serde::Serialize;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Ascending payload sizes of the release-gating catalog.
pub const PAYLOAD_SIZES: [usize; 8] = [0, 1, 8, 64, 256, 1024, 4096, 65536];

#[derive(Debug, Clone)]
pub struct GarbageSpec {
    /// Payload sizes, attempted in the given order. 0 = connect-and-close.
    pub sizes: Vec<usize>,
    pub attempt_timeout: Duration,
    pub inter_attempt_delay: Duration,
}

impl Default for GarbageSpec {
    fn default() -> Self {
        Self {
            sizes: PAYLOAD_SIZES.to_vec(),
            attempt_timeout: Duration::from_secs(1),
            inter_attempt_delay: Duration::from_millis(50),
        }
    }
}

/// One (size, outcome) probe, in attempt order.
#[derive(Debug, Clone, Serialize)]
pub struct GarbageSend {
    pub size: usize,
    pub outcome: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GarbageMetrics {
    pub sends: Vec<GarbageSend>,
}

pub fn run(endpoint: &Path, spec: &GarbageSpec, rng: &mut impl RngCore) -> GarbageMetrics {
    let mut sends = Vec::with_capacity(spec.sizes.len());
    for &size in &spec.sizes {
        let mut payload = vec![0u8; size];
        rng.fill_bytes(&mut payload);

        let outcome = if size == 0 {
            connect_send_close(endpoint, None, spec.attempt_timeout)
        } else {
            connect_send_close(endpoint, Some(&payload), spec.attempt_timeout)
        };
        tracing::debug!(size, %outcome, "garbage sent");
        sends.push(GarbageSend {
            size,
            outcome: outcome.to_string(),
        });
        thread::sleep(spec.inter_attempt_delay);
    }
    GarbageMetrics { sends }
}
