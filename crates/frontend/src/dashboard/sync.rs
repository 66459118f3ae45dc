//! Fetch-and-assign path shared by the polling loop and the action dispatcher.

use super::api::{with_timeout, AdminApi};
use super::error::ApiError;
use super::state::{DashboardState, DashboardStore, ViewKind};
use crate::shared::clock::Clock;
use contracts::system::dashboard_config::DashboardConfig;
use futures::future::join_all;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Liveness of one activation of the dashboard. Once torn down, results of
/// calls started under it are dropped.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn teardown(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// The current [`Liveness`], shared by every clone of a [`ViewSync`].
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    current: Rc<RefCell<Liveness>>,
}

impl Lifecycle {
    pub fn current(&self) -> Liveness {
        self.current.borrow().clone()
    }

    pub fn is_alive(&self) -> bool {
        self.current.borrow().is_alive()
    }

    pub fn teardown(&self) {
        self.current.borrow().teardown();
    }

    /// Start a new activation. The previous one is torn down.
    pub fn renew(&self) -> Liveness {
        let fresh = Liveness::new();
        let previous = self.current.replace(fresh.clone());
        previous.teardown();
        fresh
    }
}

pub struct ViewSync<A, S, C> {
    api: Rc<A>,
    store: S,
    clock: C,
    config: Rc<DashboardConfig>,
    lifecycle: Lifecycle,
}

impl<A, S: Clone, C: Clone> Clone for ViewSync<A, S, C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            store: self.store.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<A, S, C> ViewSync<A, S, C>
where
    A: AdminApi + 'static,
    S: DashboardStore,
    C: Clock,
{
    pub fn new(api: Rc<A>, store: S, clock: C, config: DashboardConfig) -> Self {
        Self {
            api,
            store,
            clock,
            config: Rc::new(config),
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Run one API call under the configured request timeout.
    pub async fn call<T, F>(&self, fut: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        with_timeout(&self.clock, self.config.request_timeout(), fut).await
    }

    /// Write to the state unless `live` has been torn down.
    pub fn apply_for(&self, live: &Liveness, f: impl FnOnce(&mut DashboardState)) -> bool {
        if !live.is_alive() {
            log::debug!("dashboard torn down, dropping late result");
            return false;
        }
        self.store.update(f);
        true
    }

    pub async fn refresh_view(&self, live: &Liveness, view: ViewKind) {
        match view {
            ViewKind::Rules => match self.call(self.api.list_rules()).await {
                Ok(rules) => {
                    self.apply_for(live, |s| {
                        s.rules.replace(rules);
                        s.rules_error = None;
                    });
                }
                Err(e) => self.record_failure(live, view, e),
            },
            ViewKind::Logs => {
                let limit = self.config.logs_limit;
                match self.call(self.api.list_recent_logs(limit)).await {
                    Ok(logs) => {
                        self.apply_for(live, |s| {
                            s.logs.replace(logs);
                            s.logs_error = None;
                        });
                    }
                    Err(e) => self.record_failure(live, view, e),
                }
            }
        }
    }

    /// Refresh several views concurrently; each one is applied as soon as its
    /// own fetch completes.
    pub async fn refresh(&self, views: &[ViewKind]) {
        let live = self.lifecycle.current();
        self.refresh_for(&live, views).await;
    }

    /// Like [`ViewSync::refresh`], bound to a given activation.
    pub async fn refresh_for(&self, live: &Liveness, views: &[ViewKind]) {
        join_all(views.iter().map(|view| self.refresh_view(live, *view))).await;
    }

    fn record_failure(&self, live: &Liveness, view: ViewKind, error: ApiError) {
        log::warn!("Failed to refresh {:?}: {}", view, error);
        self.apply_for(live, |s| *s.error_for(view) = Some(error.to_string()));
    }
}
