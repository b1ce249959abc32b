//! The attack catalog: three fixed adversarial scenarios, run in order.

pub mod flood;
pub mod garbage;
pub mod ghost;

pub use flood::{FloodMetrics, FloodSpec, WorkerOutcome};
pub use garbage::{GarbageMetrics, GarbageSend, GarbageSpec};
pub use ghost::{GhostMetrics, GhostSpec};

/// All three scenarios with their tunables. `default()` is the release-gating
/// catalog; `quick()` is a scaled-down tier for smoke runs.
#[derive(Debug, Clone, Default)]
pub struct AttackCatalog {
    pub flood: FloodSpec,
    pub ghost: GhostSpec,
    pub garbage: GarbageSpec,
}

impl AttackCatalog {
    pub fn quick() -> Self {
        Self {
            flood: FloodSpec {
                workers: 2,
                attempts_per_worker: 5,
                ..FloodSpec::default()
            },
            ghost: GhostSpec {
                cycles: 5,
                ..GhostSpec::default()
            },
            garbage: GarbageSpec {
                sizes: vec![0, 1, 8, 64],
                ..GarbageSpec::default()
            },
        }
    }
}
