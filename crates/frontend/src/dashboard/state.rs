//! View models of the admin dashboard.
//!
//! Every snapshot is replaced wholesale on a successful fetch. Fetch errors
//! are recorded next to the snapshots, never inside them, so a failed refresh
//! leaves the previous snapshot exactly as it was.

use super::error::ApiError;
use chrono::{DateTime, Utc};
use contracts::admin::analyzer::AnalyzerResult;
use contracts::admin::logs::LogEntry;
use contracts::admin::rules::{Rule, RuleId};
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// A refreshable part of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Rules,
    Logs,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulesViewModel {
    pub rules: Vec<Rule>,
    pub is_loaded: bool,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl RulesViewModel {
    pub fn replace(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
        self.is_loaded = true;
        self.refreshed_at = Some(Utc::now());
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn title(&self) -> String {
        format!("Rules ({})", self.rules.len())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogsViewModel {
    pub logs: Vec<LogEntry>,
    pub is_loaded: bool,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl LogsViewModel {
    pub fn replace(&mut self, logs: Vec<LogEntry>) {
        self.logs = logs;
        self.is_loaded = true;
        self.refreshed_at = Some(Utc::now());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyzerStatus {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerViewModel {
    pub status: AnalyzerStatus,
    pub output: String,
}

impl AnalyzerViewModel {
    pub const RUNNING_TEXT: &'static str = "running...";

    /// Move to `Running`. Returns `false` when a run is already in progress.
    pub fn begin(&mut self) -> bool {
        if self.status == AnalyzerStatus::Running {
            return false;
        }
        self.status = AnalyzerStatus::Running;
        self.output = Self::RUNNING_TEXT.to_string();
        true
    }

    /// Record the outcome and return to `Idle`, whatever the outcome.
    pub fn settle(&mut self, outcome: &Result<AnalyzerResult, ApiError>) {
        self.output = match outcome {
            Ok(result) => result.pretty(),
            Err(e) => format!("error: {}", e),
        };
        self.status = AnalyzerStatus::Idle;
    }

    pub fn is_running(&self) -> bool {
        self.status == AnalyzerStatus::Running
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub rules: RulesViewModel,
    pub logs: LogsViewModel,
    pub analyzer: AnalyzerViewModel,
    /// Last failed refresh per view; cleared by the next successful one
    pub rules_error: Option<String>,
    pub logs_error: Option<String>,
    /// Last failed user action (toggle)
    pub action_error: Option<String>,
}

impl DashboardState {
    pub fn error_for(&mut self, view: ViewKind) -> &mut Option<String> {
        match view {
            ViewKind::Rules => &mut self.rules_error,
            ViewKind::Logs => &mut self.logs_error,
        }
    }
}

/// Where the dashboard state lives: a signal in the browser, a plain cell in
/// tests.
pub trait DashboardStore: Clone + 'static {
    fn update(&self, f: impl FnOnce(&mut DashboardState));
    fn snapshot(&self) -> DashboardState;
}

impl DashboardStore for RwSignal<DashboardState> {
    fn update(&self, f: impl FnOnce(&mut DashboardState)) {
        Update::update(self, f);
    }

    fn snapshot(&self) -> DashboardState {
        self.get_untracked()
    }
}

impl DashboardStore for Rc<RefCell<DashboardState>> {
    fn update(&self, f: impl FnOnce(&mut DashboardState)) {
        f(&mut self.borrow_mut());
    }

    fn snapshot(&self) -> DashboardState {
        self.borrow().clone()
    }
}

pub fn create_state() -> RwSignal<DashboardState> {
    RwSignal::new(DashboardState::default())
}
