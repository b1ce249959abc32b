pub mod attacks;
pub mod bootstrap;
pub mod probe;
pub mod report;
pub mod socket;
pub mod suite;
pub mod target;

pub use attacks::AttackCatalog;
pub use bootstrap::{ensure_running, Bootstrap};
pub use probe::{ProbeReport, ProcessProbe, SystemProbe};
pub use report::{AttackMetrics, AttackResult, SiegeReport};
pub use socket::{connect_send_close, SendOutcome};
pub use suite::{run_suite, SuiteConfig};
pub use target::TargetConfig;
