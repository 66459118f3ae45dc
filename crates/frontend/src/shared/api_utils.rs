//! Runtime configuration for talking to the admin API
//!
//! The host publishes a [`DashboardConfig`] at `/config.json`. When the
//! dashboard is opened without the host (e.g. from `trunk serve`), the API
//! base is derived from the window location instead.

use contracts::system::dashboard_config::DashboardConfig;
use gloo_net::http::Request;

/// Port the admin API listens on when no host configuration is available
pub const ADMIN_API_PORT: u16 = 5002;

/// Get the fallback base URL for API requests
///
/// # Returns
/// - API base URL like "http://localhost:5002/api"
/// - The compiled-in default if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return DashboardConfig::default().api_base,
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}/api", protocol, hostname, ADMIN_API_PORT)
}

async fn fetch_config() -> Result<DashboardConfig, String> {
    let response = Request::get("/config.json")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch config: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse config: {}", e))
}

/// Load the dashboard configuration; never fails.
pub async fn load_dashboard_config() -> DashboardConfig {
    match fetch_config().await {
        Ok(config) => {
            log::info!("Dashboard config loaded, api base: {}", config.api_base);
            config
        }
        Err(e) => {
            log::warn!("{}; falling back to defaults", e);
            DashboardConfig::default().with_api_base(api_base())
        }
    }
}
