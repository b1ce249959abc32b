use crate::attacks::{FloodMetrics, GarbageMetrics, GhostMetrics};
use crate::bootstrap::Bootstrap;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackMetrics {
    Flood(FloodMetrics),
    Ghost(GhostMetrics),
    Garbage(GarbageMetrics),
}

/// One scenario's outcome. Immutable once recorded; a scenario's own socket
/// failures are informational — `survived` is the liveness sample taken right
/// after the scenario finished.
#[derive(Debug, Clone, Serialize)]
pub struct AttackResult {
    pub name: String,
    pub survived: bool,
    pub duration_ms: u64,
    pub metrics: AttackMetrics,
}

/// Everything one harness run observed, in scenario-execution order.
#[derive(Debug, Clone, Serialize)]
pub struct SiegeReport {
    pub socket_path: String,
    pub process_name: String,
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    pub bootstrap: Bootstrap,
    pub baseline_pid: Option<u32>,
    pub final_pid: Option<u32>,
    pub final_alive: bool,
    pub results: Vec<AttackResult>,
}

impl SiegeReport {
    /// Pass iff the daemon is alive at the end and every scenario's
    /// post-check saw it alive. Derived, never stored.
    pub fn verdict(&self) -> bool {
        self.final_alive && self.results.iter().all(|r| r.survived)
    }

    /// Baseline and final pid agree. A mismatch means the daemon respawned
    /// mid-siege — reported, but "recovered" is not "down".
    pub fn pid_match(&self) -> bool {
        self.baseline_pid == self.final_pid
    }
}
