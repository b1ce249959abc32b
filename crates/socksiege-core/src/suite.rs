//! The orchestrator: bootstrap, then the fixed catalog in order, liveness
//! samples interleaved. Scenarios are never skipped on a prior failure — the
//! point is to observe cumulative damage.

use crate::attacks::{flood, garbage, ghost, AttackCatalog};
use crate::bootstrap::ensure_running;
use crate::probe::ProcessProbe;
use crate::report::{AttackMetrics, AttackResult, SiegeReport};
use crate::target::TargetConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub target: TargetConfig,
    pub catalog: AttackCatalog,
    /// Seeds the garbage payload RNG; recorded in the report.
    pub seed: u64,
}

/// Run the whole siege. Infallible by construction: every failure mode ends
/// up as data in the report, and the verdict is derived from it.
pub fn run_suite(cfg: &SuiteConfig, probe: &dyn ProcessProbe) -> SiegeReport {
    let target = &cfg.target;
    let mut report = SiegeReport {
        socket_path: target.socket_path.display().to_string(),
        process_name: target.process_name.clone(),
        seed: cfg.seed,
        generated_at: Some(chrono::Utc::now().to_rfc3339()),
        bootstrap: ensure_running(target, probe),
        baseline_pid: None,
        final_pid: None,
        final_alive: false,
        results: Vec::new(),
    };
    if !report.bootstrap.is_ready() {
        // Hard failure: no scenarios run, verdict stays false.
        return report;
    }

    report.baseline_pid = probe.probe(&target.process_name).pid;
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    {
        let start = Instant::now();
        let metrics = flood::run(&target.socket_path, &cfg.catalog.flood);
        record(&mut report, probe, "flood", start, AttackMetrics::Flood(metrics));
    }
    {
        let start = Instant::now();
        let metrics = ghost::run(&target.socket_path, &cfg.catalog.ghost);
        record(&mut report, probe, "ghost", start, AttackMetrics::Ghost(metrics));
    }
    {
        let start = Instant::now();
        let metrics = garbage::run(&target.socket_path, &cfg.catalog.garbage, &mut rng);
        record(&mut report, probe, "garbage", start, AttackMetrics::Garbage(metrics));
    }

    let fin = probe.probe(&target.process_name);
    report.final_alive = fin.alive;
    report.final_pid = fin.pid;
    report
}

fn record(
    report: &mut SiegeReport,
    probe: &dyn ProcessProbe,
    name: &str,
    start: Instant,
    metrics: AttackMetrics,
) {
    // The survival sample comes immediately after the scenario's last
    // operation (for flood: immediately after the join barrier).
    let sample = probe.probe(&report.process_name);
    tracing::info!(attack = name, alive = sample.alive, "scenario finished");
    report.results.push(AttackResult {
        name: name.to_string(),
        survived: sample.alive,
        duration_ms: start.elapsed().as_millis() as u64,
        metrics,
    });
}
