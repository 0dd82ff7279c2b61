/// API client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables (the console binary loads `.env`
/// first).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the dashboard API (default: `http://localhost:8080`).
    pub base_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `ACI_API_URL`              | `http://localhost:8080` |
    /// | `ACI_REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ACI_API_URL").unwrap_or_else(|_| "http://localhost:8080".into());

        let request_timeout_secs: u64 = std::env::var("ACI_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("ACI_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            request_timeout_secs,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            request_timeout_secs: 30,
        }
    }
}
