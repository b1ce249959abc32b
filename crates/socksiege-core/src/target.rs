use std::path::PathBuf;

/// The daemon under siege. Fixed for the lifetime of a harness run.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    /// Filesystem path of the daemon's Unix stream socket.
    pub socket_path: PathBuf,
    /// Exact process name used for liveness probing and launching.
    pub process_name: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from("/tmp/snappy-switcher.sock"),
            process_name: "snappy-switcher".to_string(),
        }
    }
}
