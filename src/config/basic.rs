use serde::{Deserialize, Serialize};
use url::Url;

/// Origin used when neither config nor the build environment names one.
const FALLBACK_API_URL: &str = "http://127.0.0.1:8000";

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// Origin of the Kanban API; requests go to `<api_url>/api/...`.
    /// TOML: `basic.api_url`. Env: `KANBAN_BASIC__API_URL`.
    /// Default: build-time `KANBAN_API_URL`, else `http://127.0.0.1:8000`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,

    /// SQLite URL backing the persisted session (token and user).
    /// TOML: `basic.database_url`. Default: `sqlite://kanban.db`.
    #[serde(default)]
    pub database_url: String,

    /// Optional HTTP proxy for API requests.
    /// TOML: `basic.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// TCP connect timeout in seconds. Default: `5`.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds. Default: `15`.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Location the navigator starts at. Default: `/`.
    #[serde(default = "default_initial_location")]
    pub initial_location: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            loglevel: "info".to_string(),
            database_url: "sqlite://kanban.db".to_string(),
            proxy: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            initial_location: default_initial_location(),
        }
    }
}

fn default_api_url() -> Url {
    option_env!("KANBAN_API_URL")
        .and_then(|raw| Url::parse(raw).ok())
        .unwrap_or_else(|| Url::parse(FALLBACK_API_URL).expect("valid fallback API URL"))
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_initial_location() -> String {
    "/".to_string()
}
