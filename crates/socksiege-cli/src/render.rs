//! Console reporter. Purely presentational — everything it prints comes out
//! of the `SiegeReport`.

use socksiege_core::{AttackMetrics, AttackResult, Bootstrap, SiegeReport, SuiteConfig};

pub fn header(cfg: &SuiteConfig, suite_label: &str, log: &dyn Fn(&str)) {
    log("Socksiege");
    log("=========");
    log(&format!("Socket:  {}", cfg.target.socket_path.display()));
    log(&format!("Process: {}", cfg.target.process_name));
    log(&format!("Suite:   {suite_label}"));
    log(&format!("Seed:    {}", cfg.seed));
    log("");
}

pub fn render(report: &SiegeReport, log: &dyn Fn(&str)) {
    log("[PRE-FLIGHT]");
    match &report.bootstrap {
        Bootstrap::AlreadyRunning { pid } => {
            log(&format!("  daemon already running (pid {})", fmt_pid(*pid)));
        }
        Bootstrap::Started { pid } => {
            log(&format!("  daemon started (pid {})", fmt_pid(*pid)));
        }
        Bootstrap::LaunchFailed { error } => {
            log(&format!("  daemon launch failed: {error}"));
        }
        Bootstrap::TimedOut { waited_ms } => {
            log(&format!(
                "  daemon never became ready (waited {waited_ms} ms)"
            ));
        }
    }
    log("");

    if !report.bootstrap.is_ready() {
        eprintln!("❌ FAIL — could not bring the daemon up; nothing was attacked.");
        return;
    }

    log(&format!(
        "{:<10} {:<10} {:<10} {}",
        "ATTACK", "SURVIVED", "DUR(ms)", "DETAIL"
    ));
    log(&format!("{:-<10} {:-<10} {:-<10} {:-<30}", "", "", "", ""));
    for result in &report.results {
        log(&format!(
            "{:<10} {:<10} {:<10} {}",
            result.name,
            if result.survived { "yes" } else { "NO" },
            result.duration_ms,
            detail(result)
        ));
    }

    if let Some(garbage) = report.results.iter().find_map(|r| match &r.metrics {
        AttackMetrics::Garbage(m) => Some(m),
        _ => None,
    }) {
        log("");
        log("Garbage payloads:");
        for send in &garbage.sends {
            log(&format!("  {:>5} bytes -> {}", send.size, send.outcome));
        }
    }

    log("");
    log("FINAL REPORT");
    log("============");
    log(&format!("Baseline pid: {}", fmt_pid(report.baseline_pid)));
    log(&format!(
        "Final pid:    {} ({})",
        fmt_pid(report.final_pid),
        if report.pid_match() {
            "match"
        } else {
            "mismatch — respawned?"
        }
    ));
    log(&format!(
        "Final alive:  {}",
        if report.final_alive { "yes" } else { "no" }
    ));
    log("");
    for result in &report.results {
        log(&format!(
            "  {:<10} {}",
            result.name,
            if result.survived { "SURVIVED" } else { "CRASHED" }
        ));
    }

    if report.verdict() {
        log("");
        log("✅ PASS — daemon survived the siege.");
    } else {
        eprintln!("\n❌ FAIL — daemon did not survive the siege.");
    }
}

fn fmt_pid(pid: Option<u32>) -> String {
    pid.map_or_else(|| "n/a".to_string(), |p| p.to_string())
}

fn detail(result: &AttackResult) -> String {
    match &result.metrics {
        AttackMetrics::Flood(m) => format!(
            "{}/{} sent, {:.0} ops/sec",
            m.sent, m.total_ops, m.ops_per_sec
        ),
        AttackMetrics::Ghost(m) => {
            format!("{}/{} connected, {} failed", m.connected, m.cycles, m.failed)
        }
        AttackMetrics::Garbage(m) => {
            let ok = m.sends.iter().filter(|s| s.outcome == "ok").count();
            format!("{}/{} payloads ok", ok, m.sends.len())
        }
    }
}
