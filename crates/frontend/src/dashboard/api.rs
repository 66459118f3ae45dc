//! HTTP client facade for the admin API.
//!
//! Transport lives in [`HttpAdminApi`]; turning a status code and body into a
//! typed result lives in the `decode_*` functions so it can be checked without
//! a browser.

use super::error::ApiError;
use crate::shared::clock::Clock;
use async_trait::async_trait;
use contracts::admin::analyzer::AnalyzerResult;
use contracts::admin::logs::{LogEntry, LogsPayload};
use contracts::admin::rules::{Rule, RuleId};
use contracts::system::dashboard_config::{ApiFlavor, DashboardConfig};
use futures::future::{select, Either};
use gloo_net::http::Request;
use serde_json::Value;
use std::future::Future;
use std::pin::pin;
use std::time::Duration;

#[async_trait(?Send)]
pub trait AdminApi {
    /// Rules in server order.
    async fn list_rules(&self) -> Result<Vec<Rule>, ApiError>;

    /// Most recent first, at most `limit` entries.
    async fn list_recent_logs(&self, limit: usize) -> Result<Vec<LogEntry>, ApiError>;

    /// Flip `enabled` on the server. The acknowledgement has no fixed shape.
    async fn toggle_rule(&self, id: RuleId) -> Result<Value, ApiError>;

    async fn run_analyzer(&self) -> Result<AnalyzerResult, ApiError>;
}

/// [`AdminApi`] over `fetch`.
pub struct HttpAdminApi {
    config: DashboardConfig,
}

enum Method {
    Get,
    Post,
}

impl HttpAdminApi {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    async fn send(&self, method: Method, path: &str) -> Result<(u16, String), ApiError> {
        let url = self.config.url(path);
        let builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };
        let response = builder
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait(?Send)]
impl AdminApi for HttpAdminApi {
    async fn list_rules(&self) -> Result<Vec<Rule>, ApiError> {
        let (status, body) = self
            .send(Method::Get, &self.config.endpoints().rules())
            .await?;
        decode_rules(status, &body)
    }

    async fn list_recent_logs(&self, limit: usize) -> Result<Vec<LogEntry>, ApiError> {
        let (status, body) = self
            .send(Method::Get, &self.config.endpoints().logs(limit))
            .await?;
        decode_logs(status, &body, self.config.flavor, limit)
    }

    async fn toggle_rule(&self, id: RuleId) -> Result<Value, ApiError> {
        let (status, body) = self
            .send(Method::Post, &self.config.endpoints().toggle(id))
            .await?;
        decode_toggle(id, status, &body)
    }

    async fn run_analyzer(&self) -> Result<AnalyzerResult, ApiError> {
        let (status, body) = self
            .send(Method::Post, &self.config.endpoints().analyzer())
            .await?;
        decode_analyzer(status, &body)
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Error text for a non-2xx answer, preferring the server's `error` field.
fn status_message(status: u16, body: &str) -> String {
    serde_json::from_str::<AnalyzerResult>(body)
        .ok()
        .and_then(|v| v.failure())
        .map(|msg| format!("HTTP {}: {}", status, msg))
        .unwrap_or_else(|| format!("HTTP {}", status))
}

fn ensure_success(status: u16, body: &str) -> Result<(), ApiError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(ApiError::Backend(status_message(status, body)))
    }
}

pub fn decode_rules(status: u16, body: &str) -> Result<Vec<Rule>, ApiError> {
    ensure_success(status, body)?;
    Ok(serde_json::from_str(body)?)
}

pub fn decode_logs(
    status: u16,
    body: &str,
    flavor: ApiFlavor,
    limit: usize,
) -> Result<Vec<LogEntry>, ApiError> {
    ensure_success(status, body)?;
    let payload: LogsPayload = serde_json::from_str(body)?;
    let mut entries = payload.into_entries();
    if flavor.logs_oldest_first() {
        entries.reverse();
    }
    entries.truncate(limit);
    Ok(entries)
}

pub fn decode_toggle(id: RuleId, status: u16, body: &str) -> Result<Value, ApiError> {
    if status == 404 {
        return Err(ApiError::NotFound(id));
    }
    ensure_success(status, body)?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}

pub fn decode_analyzer(status: u16, body: &str) -> Result<AnalyzerResult, ApiError> {
    ensure_success(status, body)?;
    let result: AnalyzerResult = serde_json::from_str(body)?;
    match result.failure() {
        Some(message) => Err(ApiError::Backend(message)),
        None => Ok(result),
    }
}

/// Bound `fut` by `limit`; expiry is reported as a network error.
pub async fn with_timeout<T, C, F>(clock: &C, limit: Duration, fut: F) -> Result<T, ApiError>
where
    C: Clock,
    F: Future<Output = Result<T, ApiError>>,
{
    let fut = pin!(fut);
    match select(fut, clock.sleep(limit)).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(ApiError::Network(format!(
            "request timed out after {}s",
            limit.as_secs_f32()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::testing::ManualClock;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_decode_rules_keeps_server_order() {
        let body = r#"[
            {"id":3,"type":"regex","pattern":"c","enabled":true,"source":"manual"},
            {"id":1,"type":"regex","pattern":"a","enabled":false,"source":"auto_analyzer"},
            {"id":3,"type":"regex","pattern":"c","enabled":true,"source":"manual"}
        ]"#;
        let rules = decode_rules(200, body).unwrap();
        let ids: Vec<i64> = rules.iter().map(|r| r.id.value()).collect();
        assert_eq!(ids, vec![3, 1, 3]);
    }

    #[test]
    fn test_decode_rules_errors() {
        assert!(matches!(decode_rules(200, "<html>"), Err(ApiError::Parse(_))));
        assert_eq!(
            decode_rules(404, r#"{"error":"rules.json not found"}"#),
            Err(ApiError::Backend("HTTP 404: rules.json not found".to_string()))
        );
        assert_eq!(
            decode_rules(502, "Bad Gateway"),
            Err(ApiError::Backend("HTTP 502".to_string()))
        );
    }

    #[test]
    fn test_decode_logs_dashboard_truncates() {
        let body = r#"[{"url":"/3"},{"url":"/2"},{"url":"/1"}]"#;
        let logs = decode_logs(200, body, ApiFlavor::Dashboard, 2).unwrap();
        let urls: Vec<_> = logs.iter().map(|l| l.url.clone().unwrap()).collect();
        assert_eq!(urls, vec!["/3", "/2"]);
    }

    #[test]
    fn test_decode_logs_legacy_reverses_file_tail() {
        let body = json!({
            "logs": [
                "{\"event\":\"BLOCKED\",\"path\":\"/old\"}",
                "{\"event\":\"ALLOWED\",\"path\":\"/mid\"}",
                "{\"event\":\"BLOCKED\",\"path\":\"/new\"}"
            ]
        })
        .to_string();
        let logs = decode_logs(200, &body, ApiFlavor::Legacy, 2).unwrap();
        let urls: Vec<_> = logs.iter().map(|l| l.url.clone().unwrap()).collect();
        assert_eq!(urls, vec!["/new", "/mid"]);
    }

    #[test]
    fn test_decode_toggle() {
        assert_eq!(
            decode_toggle(RuleId(9), 404, ""),
            Err(ApiError::NotFound(RuleId(9)))
        );
        assert_eq!(decode_toggle(RuleId(1), 200, ""), Ok(Value::Null));
        assert_eq!(
            decode_toggle(RuleId(1), 200, r#"{"id":1,"enabled":true}"#),
            Ok(json!({"id": 1, "enabled": true}))
        );
        assert!(matches!(
            decode_toggle(RuleId(1), 200, "ok"),
            Err(ApiError::Parse(_))
        ));
    }

    #[test]
    fn test_decode_analyzer() {
        let ok = decode_analyzer(200, r#"{"message":"Analyzer executed (inline)"}"#).unwrap();
        assert_eq!(ok.value()["message"], "Analyzer executed (inline)");

        assert_eq!(
            decode_analyzer(200, r#"{"error":"Analyzer inline failed","details":"boom"}"#),
            Err(ApiError::Backend("Analyzer inline failed: boom".to_string()))
        );
        assert_eq!(
            decode_analyzer(500, r#"{"error":"Analyzer subprocess timeout"}"#),
            Err(ApiError::Backend(
                "HTTP 500: Analyzer subprocess timeout".to_string()
            ))
        );
        assert!(matches!(decode_analyzer(200, ""), Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_with_timeout_passes_through_ready_result() {
        let clock = ManualClock::default();
        let result = futures::executor::block_on(with_timeout(
            &clock,
            Duration::from_secs(10),
            async { Ok::<_, ApiError>(42) },
        ));
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn test_with_timeout_expires() {
        let clock = ManualClock::default();
        let outcome = Rc::new(RefCell::new(None));
        let (_never_tx, never_rx) = oneshot::channel::<()>();

        let mut pool = LocalPool::new();
        let task_clock = clock.clone();
        let task_outcome = outcome.clone();
        pool.spawner()
            .spawn_local(async move {
                let result = with_timeout(&task_clock, Duration::from_secs(10), async move {
                    let _ = never_rx.await;
                    Ok::<_, ApiError>(())
                })
                .await;
                *task_outcome.borrow_mut() = Some(result);
            })
            .unwrap();

        pool.run_until_stalled();
        assert!(outcome.borrow().is_none());

        assert_eq!(clock.elapse(Duration::from_secs(10)), 1);
        pool.run_until_stalled();
        assert_eq!(
            *outcome.borrow(),
            Some(Err(ApiError::Network(
                "request timed out after 10s".to_string()
            )))
        );
    }
}
