//! Process-table liveness probing.

use serde::Serialize;
use sysinfo::System;

/// One liveness sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub alive: bool,
    /// Representative pid when alive. With several matching processes this is
    /// the lowest pid, so back-to-back probes of an unchanged process table
    /// agree with each other.
    pub pid: Option<u32>,
}

impl ProbeReport {
    pub fn dead() -> Self {
        Self { alive: false, pid: None }
    }
}

/// Liveness as a capability: the orchestrator only needs "is the named
/// process alive, and under which pid".
pub trait ProcessProbe {
    fn probe(&self, process_name: &str) -> ProbeReport;
}

/// Production probe backed by the OS process table via `sysinfo`.
pub struct SystemProbe;

impl ProcessProbe for SystemProbe {
    fn probe(&self, process_name: &str) -> ProbeReport {
        let mut sys = System::new();
        sys.refresh_processes();

        let mut pids: Vec<u32> = sys
            .processes()
            .iter()
            .filter(|(_, p)| p.name() == process_name)
            .map(|(pid, _)| pid.as_u32())
            .collect();
        pids.sort_unstable();

        ProbeReport {
            alive: !pids.is_empty(),
            pid: pids.first().copied(),
        }
    }
}

/// Name of the current process as the process table sees it.
#[cfg(test)]
pub(crate) fn own_process_name() -> String {
    std::fs::read_to_string("/proc/self/comm")
        .expect("reading /proc/self/comm")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_is_dead() {
        let report = SystemProbe.probe("no-such-process-socksiege");
        assert_eq!(report, ProbeReport::dead());
    }

    #[test]
    fn finds_own_process() {
        let report = SystemProbe.probe(&own_process_name());
        assert!(report.alive);
        assert!(report.pid.is_some());
    }

    #[test]
    fn stable_across_immediate_probes() {
        let name = own_process_name();
        let first = SystemProbe.probe(&name);
        let second = SystemProbe.probe(&name);
        assert_eq!(first, second);
    }
}
