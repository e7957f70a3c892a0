//! App-level flags shared by the showcase binary and the library core.

use clap::Args;
use std::path::PathBuf;

/// Flags that affect library behavior (logging, persistence location).
/// The binary flattens this into its own CLI schema.
#[derive(Debug, Args, Clone)]
pub struct AppConfig {
    /// Write JSON-lines trace events to the trace log file
    #[arg(long = "logs", default_value_t = false)]
    pub logs: bool,

    /// Suppress all trace output even when --logs is set
    #[arg(long = "no-logs", default_value_t = false)]
    pub no_logs: bool,

    /// Directory for persisted preferences and interest counters
    #[arg(long = "storage-dir", env = "VITRINE_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        app: AppConfig,
    }

    #[test]
    fn defaults_are_quiet() {
        let cfg = Harness::parse_from(["test-app"]).app;
        assert!(!cfg.logs);
        assert!(!cfg.no_logs);
        assert!(cfg.storage_dir.is_none());
    }

    #[test]
    fn storage_dir_flag_parses() {
        let cfg = Harness::parse_from(["test-app", "--storage-dir", "/tmp/vitrine"]).app;
        assert_eq!(cfg.storage_dir, Some(PathBuf::from("/tmp/vitrine")));
    }
}
