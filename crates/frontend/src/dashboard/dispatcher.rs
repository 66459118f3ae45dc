//! Action dispatcher: user gestures → API calls → refresh of dependent views.

use super::api::AdminApi;
use super::error::ApiError;
use super::state::{DashboardStore, ViewKind};
use super::sync::ViewSync;
use crate::shared::clock::Clock;
use contracts::admin::analyzer::AnalyzerResult;
use contracts::admin::rules::RuleId;
use contracts::system::dashboard_config::AnalyzerRefreshPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleRule,
    RunAnalyzer,
    Refresh,
}

/// Which views each action invalidates.
const INVALIDATIONS: &[(Action, &[ViewKind])] = &[
    (Action::ToggleRule, &[ViewKind::Rules]),
    (Action::RunAnalyzer, &[ViewKind::Rules, ViewKind::Logs]),
    (Action::Refresh, &[ViewKind::Rules, ViewKind::Logs]),
];

impl Action {
    pub fn invalidates(self) -> &'static [ViewKind] {
        INVALIDATIONS
            .iter()
            .find(|(action, _)| *action == self)
            .map(|(_, views)| *views)
            .unwrap_or(&[])
    }
}

pub struct ActionDispatcher<A, S, C> {
    sync: ViewSync<A, S, C>,
    analyzer_refresh: AnalyzerRefreshPolicy,
}

impl<A, S: Clone, C: Clone> Clone for ActionDispatcher<A, S, C> {
    fn clone(&self) -> Self {
        Self {
            sync: self.sync.clone(),
            analyzer_refresh: self.analyzer_refresh,
        }
    }
}

impl<A, S, C> ActionDispatcher<A, S, C>
where
    A: AdminApi + 'static,
    S: DashboardStore,
    C: Clock,
{
    pub fn new(sync: ViewSync<A, S, C>) -> Self {
        let analyzer_refresh = sync.config().analyzer_refresh;
        Self {
            sync,
            analyzer_refresh,
        }
    }

    /// Toggle a rule, then always re-read the rules. The displayed `enabled`
    /// flag only ever comes from a list response. Returns `None` when the view
    /// is gone and nothing was sent.
    pub async fn toggle(&self, id: RuleId) -> Option<Result<(), ApiError>> {
        let live = self.sync.lifecycle().current();
        if !live.is_alive() {
            log::debug!("dashboard torn down, toggle of rule {} skipped", id);
            return None;
        }

        let outcome = self.sync.call(self.sync.api().toggle_rule(id)).await;
        match &outcome {
            Ok(_) => {
                self.sync.apply_for(&live, |s| s.action_error = None);
            }
            Err(e) => {
                log::warn!("Failed to toggle rule {}: {}", id, e);
                let message = e.to_string();
                self.sync.apply_for(&live, |s| s.action_error = Some(message));
            }
        }
        self.sync
            .refresh_for(&live, Action::ToggleRule.invalidates())
            .await;
        Some(outcome.map(|_| ()))
    }

    /// Run the analyzer job. Returns `None` when a run was already in progress
    /// (or the view is gone) and nothing was sent.
    pub async fn run_analyzer(&self) -> Option<Result<AnalyzerResult, ApiError>> {
        let live = self.sync.lifecycle().current();
        let mut started = false;
        self.sync.apply_for(&live, |s| started = s.analyzer.begin());
        if !started {
            return None;
        }

        let outcome = self.sync.call(self.sync.api().run_analyzer()).await;
        match &outcome {
            Ok(_) => log::info!("Analyzer run finished"),
            Err(e) => log::warn!("Analyzer run failed: {}", e),
        }
        self.sync.apply_for(&live, |s| s.analyzer.settle(&outcome));

        let refresh = match self.analyzer_refresh {
            AnalyzerRefreshPolicy::Always => true,
            AnalyzerRefreshPolicy::OnSuccess => outcome.is_ok(),
        };
        if refresh {
            self.sync
                .refresh_for(&live, Action::RunAnalyzer.invalidates())
                .await;
        }
        Some(outcome)
    }

    pub async fn refresh(&self) {
        self.sync.refresh(Action::Refresh.invalidates()).await;
    }
}
