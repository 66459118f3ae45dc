use serde::{Deserialize, Serialize};

/// Сколько символов payload показывать в списке логов
pub const PAYLOAD_PREVIEW_CHARS: usize = 200;

/// Record of a blocked (or otherwise matched) request.
///
/// Every field is optional: the filter writes structured JSON lines with
/// `path` and a nested `matched_rule`, while the dashboard endpoint answers
/// with flat `url`/`matched_pattern` entries. Both shapes land here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LogEntryWire")]
pub struct LogEntry {
    pub timestamp: Option<String>,
    pub event: Option<String>,
    #[serde(rename = "src_ip")]
    pub source_ip: Option<String>,
    pub url: Option<String>,
    pub payload: Option<String>,
    pub matched_pattern: Option<String>,
}

#[derive(Deserialize)]
struct MatchedRule {
    #[serde(default)]
    pattern: Option<String>,
}

#[derive(Deserialize)]
struct LogEntryWire {
    #[serde(default, alias = "time")]
    timestamp: Option<String>,
    #[serde(default)]
    event: Option<String>,
    #[serde(default, rename = "src_ip", alias = "source_ip")]
    source_ip: Option<String>,
    #[serde(default, alias = "path")]
    url: Option<String>,
    #[serde(default)]
    payload: Option<String>,
    #[serde(default)]
    matched_pattern: Option<String>,
    #[serde(default)]
    matched_rule: Option<MatchedRule>,
}

impl From<LogEntryWire> for LogEntry {
    fn from(w: LogEntryWire) -> Self {
        let matched_pattern = w
            .matched_pattern
            .or_else(|| w.matched_rule.and_then(|r| r.pattern));
        LogEntry {
            timestamp: w.timestamp,
            event: w.event,
            source_ip: w.source_ip,
            url: w.url,
            payload: w.payload,
            matched_pattern,
        }
    }
}

impl LogEntry {
    /// Payload cut to [`PAYLOAD_PREVIEW_CHARS`] characters, with `...` when cut.
    pub fn payload_excerpt(&self) -> String {
        let payload = self.payload.as_deref().unwrap_or("");
        match payload.char_indices().nth(PAYLOAD_PREVIEW_CHARS) {
            Some((idx, _)) => format!("{}...", &payload[..idx]),
            None => payload.to_string(),
        }
    }

    /// Raw text line from the log file. JSON lines are parsed, anything else
    /// is kept as the payload.
    pub fn from_line(line: &str) -> Self {
        if line.trim_start().starts_with('{') {
            if let Ok(entry) = serde_json::from_str::<LogEntry>(line) {
                return entry;
            }
        }
        LogEntry {
            payload: Some(line.to_string()),
            ..Default::default()
        }
    }
}

/// One element of the wrapped `{"logs": [...]}` answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LogLine {
    Entry(LogEntry),
    Raw(String),
}

impl LogLine {
    pub fn into_entry(self) -> LogEntry {
        match self {
            LogLine::Entry(entry) => entry,
            LogLine::Raw(line) => LogEntry::from_line(&line),
        }
    }
}

/// Body of a logs request: either a bare array or the file-tail wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LogsPayload {
    Entries(Vec<LogEntry>),
    Wrapped { logs: Vec<LogLine> },
}

impl LogsPayload {
    pub fn into_entries(self) -> Vec<LogEntry> {
        match self {
            LogsPayload::Entries(entries) => entries,
            LogsPayload::Wrapped { logs } => logs.into_iter().map(LogLine::into_entry).collect(),
        }
    }
}
