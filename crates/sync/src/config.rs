use std::path::PathBuf;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Inventory service base URL (default: `http://localhost:3001`).
    pub api_base_url: String,
    /// Directory holding the local snapshot file (default: `.vanity`).
    pub snapshot_dir: PathBuf,
    /// Per-request timeout in seconds (default: `10`).
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `API_BASE_URL`        | `http://localhost:3001` |
    /// | `SNAPSHOT_DIR`        | `.vanity`               |
    /// | `CLIENT_TIMEOUT_SECS` | `10`                    |
    pub fn from_env() -> Self {
        let api_base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".into());

        let snapshot_dir = std::env::var("SNAPSHOT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".vanity"));

        let timeout_secs: u64 = std::env::var("CLIENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("CLIENT_TIMEOUT_SECS must be a valid u64");

        Self {
            api_base_url,
            snapshot_dir,
            timeout_secs,
        }
    }
}
