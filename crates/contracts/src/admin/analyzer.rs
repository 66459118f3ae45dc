use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ответ запуска анализатора. Схема не фиксирована, показывается как есть.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyzerResult(pub Value);

impl AnalyzerResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Failure reported inside the body (`{"error": ..., "details": ...}`).
    pub fn failure(&self) -> Option<String> {
        let error = self.0.get("error")?;
        let message = match error {
            Value::String(s) => s.clone(),
            Value::Null => return None,
            other => other.to_string(),
        };
        match self.0.get("details").and_then(Value::as_str) {
            Some(details) if !details.is_empty() => Some(format!("{}: {}", message, details)),
            _ => Some(message),
        }
    }

    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_body_has_no_failure() {
        let result = AnalyzerResult::new(json!({"message": "Analyzer executed (inline)"}));
        assert_eq!(result.failure(), None);
        assert!(result.pretty().contains("Analyzer executed (inline)"));
    }

    #[test]
    fn test_failure_with_details() {
        let result = AnalyzerResult::new(json!({
            "error": "Analyzer failed",
            "details": "Traceback: rules.json locked"
        }));
        assert_eq!(
            result.failure().as_deref(),
            Some("Analyzer failed: Traceback: rules.json locked")
        );
    }

    #[test]
    fn test_failure_without_details_and_null_error() {
        assert_eq!(
            AnalyzerResult::new(json!({"error": "Analyzer subprocess timeout"}))
                .failure()
                .as_deref(),
            Some("Analyzer subprocess timeout")
        );
        assert_eq!(AnalyzerResult::new(json!({"error": null})).failure(), None);
        assert_eq!(AnalyzerResult::new(json!([1, 2])).failure(), None);
    }
}
