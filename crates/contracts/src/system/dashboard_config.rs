//! Runtime configuration of the admin dashboard.
//!
//! The host publishes this as `/config.json`; the UI injects it into the HTTP
//! client at construction instead of relying on a hard-coded base URL.

use crate::admin::rules::RuleId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5002/api";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_LOGS_LIMIT: usize = 50;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Which REST surface the admin API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiFlavor {
    /// `/logs/recent?limit=N`, `/analyzer/run`
    #[default]
    Dashboard,
    /// `/logs` (file tail, oldest first), `/analyze`
    Legacy,
}

impl ApiFlavor {
    pub fn endpoints(self) -> EndpointSet {
        match self {
            ApiFlavor::Dashboard => EndpointSet {
                rules: "/rules",
                logs: "/logs/recent",
                logs_take_limit: true,
                analyzer: "/analyzer/run",
            },
            ApiFlavor::Legacy => EndpointSet {
                rules: "/rules",
                logs: "/logs",
                logs_take_limit: false,
                analyzer: "/analyze",
            },
        }
    }

    /// Legacy logs come oldest first and must be reversed before display.
    pub fn logs_oldest_first(self) -> bool {
        matches!(self, ApiFlavor::Legacy)
    }
}

/// Path table for one [`ApiFlavor`]. All paths are relative to the API base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSet {
    rules: &'static str,
    logs: &'static str,
    logs_take_limit: bool,
    analyzer: &'static str,
}

impl EndpointSet {
    pub fn rules(&self) -> String {
        self.rules.to_string()
    }

    pub fn logs(&self, limit: usize) -> String {
        if self.logs_take_limit {
            format!("{}?limit={}", self.logs, limit)
        } else {
            self.logs.to_string()
        }
    }

    pub fn toggle(&self, id: RuleId) -> String {
        format!("{}/{}/toggle", self.rules, id)
    }

    pub fn analyzer(&self) -> String {
        self.analyzer.to_string()
    }
}

/// Whether running the analyzer refreshes rules and logs afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerRefreshPolicy {
    /// Refresh after every run, so generated rules show up even when the
    /// result omits an explicit success flag.
    #[default]
    Always,
    OnSuccess,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base: String,
    pub flavor: ApiFlavor,
    pub poll_interval_ms: u64,
    pub logs_limit: usize,
    pub request_timeout_ms: u64,
    pub analyzer_refresh: AnalyzerRefreshPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            flavor: ApiFlavor::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            logs_limit: DEFAULT_LOGS_LIMIT,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            analyzer_refresh: AnalyzerRefreshPolicy::default(),
        }
    }
}

impl DashboardConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn endpoints(&self) -> EndpointSet {
        self.flavor.endpoints()
    }

    /// Full URL for a path from [`EndpointSet`].
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_endpoints() {
        let config = DashboardConfig::default();
        let e = config.endpoints();
        assert_eq!(config.url(&e.rules()), "http://127.0.0.1:5002/api/rules");
        assert_eq!(
            config.url(&e.logs(50)),
            "http://127.0.0.1:5002/api/logs/recent?limit=50"
        );
        assert_eq!(
            config.url(&e.toggle(RuleId(1))),
            "http://127.0.0.1:5002/api/rules/1/toggle"
        );
        assert_eq!(config.url(&e.analyzer()), "http://127.0.0.1:5002/api/analyzer/run");
    }

    #[test]
    fn test_legacy_endpoints() {
        let e = ApiFlavor::Legacy.endpoints();
        assert_eq!(e.logs(50), "/logs");
        assert_eq!(e.analyzer(), "/analyze");
        assert!(ApiFlavor::Legacy.logs_oldest_first());
        assert!(!ApiFlavor::Dashboard.logs_oldest_first());
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let config = DashboardConfig::default().with_api_base("/api-proxy/");
        assert_eq!(config.url("/rules"), "/api-proxy/rules");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"flavor":"legacy","analyzer_refresh":"on_success"}"#).unwrap();
        assert_eq!(config.flavor, ApiFlavor::Legacy);
        assert_eq!(config.analyzer_refresh, AnalyzerRefreshPolicy::OnSuccess);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.logs_limit, 50);
    }
}
