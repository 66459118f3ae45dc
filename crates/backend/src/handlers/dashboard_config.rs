use axum::extract::State;
use axum::Json;
use contracts::system::dashboard_config::DashboardConfig;

use crate::routes::AppState;

/// GET /config.json
pub async fn get_config(State(state): State<AppState>) -> Json<DashboardConfig> {
    Json(state.config.dashboard_config())
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}
