use anyhow::Context;
use clap::Parser;
use socksiege_core::{run_suite, AttackCatalog, SuiteConfig, SystemProbe, TargetConfig};
use std::path::PathBuf;

mod exit_codes;
mod render;

use exit_codes::{EXIT_CONFIG_ERROR, EXIT_FAIL, EXIT_PASS};

#[derive(Parser)]
#[command(
    name = "socksiege",
    version,
    about = "Siege a Unix-socket daemon — flood, ghost, and garbage attacks, pass/fail on whether the process survives"
)]
struct Cli {
    /// Path of the daemon's control socket
    #[arg(long, default_value = "/tmp/snappy-switcher.sock")]
    socket: PathBuf,

    /// Exact process name to probe for liveness (and to launch if absent)
    #[arg(long, default_value = "snappy-switcher")]
    process_name: String,

    /// Catalog tier: "full" (release-gating) or "quick" (smoke run)
    #[arg(long, default_value = "full")]
    suite: String,

    /// Seed for the garbage payload RNG (default: wall-clock seconds)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the JSON report to this path ("-" for stdout)
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            EXIT_CONFIG_ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let suite = cli.suite.to_lowercase();
    let catalog = match suite.as_str() {
        "full" => AttackCatalog::default(),
        "quick" => AttackCatalog::quick(),
        other => {
            eprintln!("Config error: unknown suite tier: {other}");
            return Ok(EXIT_CONFIG_ERROR);
        }
    };

    let seed = cli.seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    });

    let cfg = SuiteConfig {
        target: TargetConfig {
            socket_path: cli.socket,
            process_name: cli.process_name,
        },
        catalog,
        seed,
    };
    tracing::debug!(suite = %suite, seed, "effective configuration");

    // When the JSON report streams to stdout, the console rendering moves to
    // stderr so the two never interleave.
    let report_to_stdout = cli
        .report
        .as_ref()
        .map(|p| p.as_os_str() == "-")
        .unwrap_or(false);
    let log: &dyn Fn(&str) = if report_to_stdout {
        &|s: &str| eprintln!("{s}")
    } else {
        &|s: &str| println!("{s}")
    };

    render::header(&cfg, &suite, log);
    let report = run_suite(&cfg, &SystemProbe);
    render::render(&report, log);

    if let Some(ref path) = cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        if path.as_os_str() == "-" {
            println!("{json}");
        } else {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            log(&format!("Report saved to {}", path.display()));
        }
    }

    Ok(if report.verdict() { EXIT_PASS } else { EXIT_FAIL })
}
