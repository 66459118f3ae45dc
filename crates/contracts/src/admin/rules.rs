use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Идентификатор правила, уникален в пределах одной выборки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub i64);

impl RuleId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a rule came from.
///
/// The filter writes `manual` for hand-edited rules, the analyzer job writes
/// `auto_analyzer`, and ML detections are logged as `ml_model`. Anything else
/// is kept verbatim so that a newer backend does not break the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RuleSource {
    #[default]
    Manual,
    AutoAnalyzer,
    MlModel,
    Other(String),
}

impl RuleSource {
    pub fn as_str(&self) -> &str {
        match self {
            RuleSource::Manual => "manual",
            RuleSource::AutoAnalyzer => "auto_analyzer",
            RuleSource::MlModel => "ml_model",
            RuleSource::Other(s) => s.as_str(),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, RuleSource::AutoAnalyzer | RuleSource::MlModel)
    }
}

impl From<&str> for RuleSource {
    fn from(s: &str) -> Self {
        match s {
            "manual" => RuleSource::Manual,
            "auto_analyzer" => RuleSource::AutoAnalyzer,
            "ml_model" => RuleSource::MlModel,
            other => RuleSource::Other(other.to_string()),
        }
    }
}

impl Serialize for RuleSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(RuleSource::from(s.as_str()))
    }
}

fn default_enabled() -> bool {
    true
}

/// Правило обнаружения (regex-сигнатура) с флагом включения и происхождением
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    #[serde(rename = "type")]
    pub rule_type: String,
    pub pattern: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub source: RuleSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Rule {
    /// Label for the toggle button: the action a click would perform.
    pub fn toggle_label(&self) -> &'static str {
        if self.enabled {
            "Disable"
        } else {
            "Enable"
        }
    }
}
