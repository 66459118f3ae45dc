use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method};
use axum::middleware;
use axum::routing::{any, get};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers;
use crate::shared::config::{Config, PROXY_PREFIX};
use crate::shared::request_logger::request_logger;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.admin_api.request_timeout_secs))
            .build()?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let dist = Path::new(&state.config.server.dist_dir).to_path_buf();
    let static_files = ServeDir::new(&dist).fallback(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/health", get(handlers::dashboard_config::health))
        .route("/config.json", get(handlers::dashboard_config::get_config))
        .route(
            &format!("{PROXY_PREFIX}/*path"),
            any(handlers::proxy::forward),
        )
        .fallback_service(static_files)
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}
