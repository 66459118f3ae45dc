use contracts::system::dashboard_config::{
    AnalyzerRefreshPolicy, ApiFlavor, DashboardConfig, DEFAULT_LOGS_LIMIT,
};
use serde::Deserialize;

/// Mount point of the admin API proxy
pub const PROXY_PREFIX: &str = "/api-proxy";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub admin_api: AdminApiConfig,
    #[serde(default)]
    pub dashboard: DashboardSection,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub flavor: ApiFlavor,
    #[serde(default)]
    pub proxy: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardSection {
    pub poll_interval_secs: u64,
    pub logs_limit: usize,
    pub analyzer_refresh: AnalyzerRefreshPolicy,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            logs_limit: DEFAULT_LOGS_LIMIT,
            analyzer_refresh: AnalyzerRefreshPolicy::default(),
        }
    }
}

fn default_dist_dir() -> String {
    "dist".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000
dist_dir = "dist"

[admin_api]
base_url = "http://127.0.0.1:5002/api"
flavor = "dashboard"
proxy = false
request_timeout_secs = 10
"#;

impl Config {
    /// What the UI receives at `/config.json`. With the proxy on, the UI talks
    /// to this host instead of the admin API directly.
    pub fn dashboard_config(&self) -> DashboardConfig {
        let api_base = if self.admin_api.proxy {
            PROXY_PREFIX.to_string()
        } else {
            self.admin_api.base_url.clone()
        };
        DashboardConfig {
            api_base,
            flavor: self.admin_api.flavor,
            poll_interval_ms: self.dashboard.poll_interval_secs * 1000,
            logs_limit: self.dashboard.logs_limit,
            request_timeout_ms: self.admin_api.request_timeout_secs * 1000,
            analyzer_refresh: self.dashboard.analyzer_refresh,
        }
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    default_config()
}

pub fn default_config() -> anyhow::Result<Config> {
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}
