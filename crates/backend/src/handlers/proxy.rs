use axum::body::{to_bytes, Body};
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::routes::AppState;

/// Upper bound for a forwarded request body
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("admin API proxy is disabled")]
    Disabled,
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream unreachable: {0}")]
    Upstream(String),
    #[error("invalid request: {0}")]
    BadRequest(String),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            ProxyError::Disabled => StatusCode::NOT_FOUND,
            ProxyError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProxyError::Timeout
        } else {
            ProxyError::Upstream(e.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// ANY /api-proxy/*path
///
/// Forwards the request to `admin_api.base_url` and relays status, content
/// type and body unchanged. Upstream HTTP errors are relayed as-is; only
/// transport failures turn into a proxy error.
pub async fn forward(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    req: Request<Body>,
) -> Result<Response, ProxyError> {
    if !state.config.admin_api.proxy {
        return Err(ProxyError::Disabled);
    }

    let mut url = format!(
        "{}/{}",
        state.config.admin_api.base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    if let Some(query) = query {
        url.push('?');
        url.push_str(&query);
    }

    let method = req.method().clone();
    let content_type = req.headers().get(header::CONTENT_TYPE).cloned();
    let body = to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::BadRequest(e.to_string()))?;

    tracing::debug!("proxy {} {}", method, url);

    let upstream_method = reqwest::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|e| ProxyError::BadRequest(e.to_string()))?;
    let mut upstream = state.client.request(upstream_method, &url);
    if let Some(ct) = content_type.as_ref().and_then(|v| v.to_str().ok()) {
        upstream = upstream.header(reqwest::header::CONTENT_TYPE, ct);
    }
    if method != Method::GET && !body.is_empty() {
        upstream = upstream.body(body.to_vec());
    }

    let response = upstream.send().await.map_err(|e| {
        tracing::warn!("proxy {} {} failed: {}", method, url, e);
        ProxyError::from(e)
    })?;

    let status = StatusCode::from_u16(response.status().as_u16())
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;
    let upstream_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await?;

    let mut builder = Response::builder().status(status);
    if let Some(ct) = upstream_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    builder
        .body(Body::from(bytes))
        .map_err(|e| ProxyError::Upstream(e.to_string()))
}
