//! Scripted API, manual clock and a small harness for async dashboard tests.

use super::api::AdminApi;
use super::error::ApiError;
use super::state::{DashboardState, DashboardStore};
use super::sync::ViewSync;
use crate::shared::clock::Clock;
use async_trait::async_trait;
use contracts::admin::analyzer::AnalyzerResult;
use contracts::admin::logs::LogEntry;
use contracts::admin::rules::{Rule, RuleId, RuleSource};
use contracts::system::dashboard_config::{ApiFlavor, DashboardConfig, EndpointSet};
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

pub fn rule(id: i64, enabled: bool) -> Rule {
    Rule {
        id: RuleId(id),
        rule_type: "regex".to_string(),
        pattern: format!("pattern-{}", id),
        enabled,
        source: RuleSource::Manual,
        comment: None,
    }
}

/// Responses are consumed in order; the last one repeats once the queue
/// would run dry.
struct Script<T> {
    queue: VecDeque<Result<T, ApiError>>,
    gate: Option<oneshot::Receiver<()>>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            gate: None,
        }
    }

    fn next(&mut self) -> Result<T, ApiError> {
        match self.queue.len() {
            0 => Err(ApiError::Network("no scripted response".to_string())),
            1 => self.queue[0].clone(),
            _ => self.queue.pop_front().unwrap(),
        }
    }
}

async fn answer<T: Clone>(script: &RefCell<Script<T>>) -> Result<T, ApiError> {
    let gate = script.borrow_mut().gate.take();
    if let Some(gate) = gate {
        let _ = gate.await;
    }
    script.borrow_mut().next()
}

pub struct MockApi {
    endpoints: EndpointSet,
    calls: RefCell<Vec<String>>,
    rules: RefCell<Script<Vec<Rule>>>,
    logs: RefCell<Script<Vec<LogEntry>>>,
    toggles: RefCell<Script<Value>>,
    analyzer: RefCell<Script<AnalyzerResult>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            endpoints: ApiFlavor::Dashboard.endpoints(),
            calls: RefCell::new(Vec::new()),
            rules: RefCell::new(Script::new()),
            logs: RefCell::new(Script::new()),
            toggles: RefCell::new(Script::new()),
            analyzer: RefCell::new(Script::new()),
        }
    }

    pub fn push_rules(&self, response: Result<Vec<Rule>, ApiError>) {
        self.rules.borrow_mut().queue.push_back(response);
    }

    pub fn push_logs(&self, response: Result<Vec<LogEntry>, ApiError>) {
        self.logs.borrow_mut().queue.push_back(response);
    }

    pub fn push_toggle(&self, response: Result<Value, ApiError>) {
        self.toggles.borrow_mut().queue.push_back(response);
    }

    pub fn push_analyzer(&self, response: Result<AnalyzerResult, ApiError>) {
        self.analyzer.borrow_mut().queue.push_back(response);
    }

    /// Block the next `list_rules` until the returned sender fires.
    pub fn hold_next_rules(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.rules.borrow_mut().gate = Some(rx);
        tx
    }

    pub fn hold_next_logs(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.logs.borrow_mut().gate = Some(rx);
        tx
    }

    pub fn hold_next_analyzer(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.analyzer.borrow_mut().gate = Some(rx);
        tx
    }

    /// Requests issued so far, as `METHOD path`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl AdminApi for MockApi {
    async fn list_rules(&self) -> Result<Vec<Rule>, ApiError> {
        self.record(format!("GET {}", self.endpoints.rules()));
        answer(&self.rules).await
    }

    async fn list_recent_logs(&self, limit: usize) -> Result<Vec<LogEntry>, ApiError> {
        self.record(format!("GET {}", self.endpoints.logs(limit)));
        answer(&self.logs).await
    }

    async fn toggle_rule(&self, id: RuleId) -> Result<Value, ApiError> {
        self.record(format!("POST {}", self.endpoints.toggle(id)));
        answer(&self.toggles).await
    }

    async fn run_analyzer(&self) -> Result<AnalyzerResult, ApiError> {
        self.record(format!("POST {}", self.endpoints.analyzer()));
        answer(&self.analyzer).await
    }
}

/// Clock whose sleeps complete only when the test says so.
#[derive(Clone, Default)]
pub struct ManualClock {
    sleepers: Rc<RefCell<Vec<(Duration, oneshot::Sender<()>)>>>,
}

impl ManualClock {
    /// Wake every live sleeper waiting for exactly `duration`.
    /// Returns how many were woken.
    pub fn elapse(&self, duration: Duration) -> usize {
        let mut sleepers = self.sleepers.borrow_mut();
        let (due, rest): (Vec<_>, Vec<_>) = sleepers
            .drain(..)
            .filter(|(_, tx)| !tx.is_canceled())
            .partition(|(d, _)| *d == duration);
        *sleepers = rest;
        due.into_iter()
            .filter_map(|(_, tx)| tx.send(()).ok())
            .count()
    }

    pub fn pending(&self, duration: Duration) -> usize {
        self.sleepers
            .borrow()
            .iter()
            .filter(|(d, tx)| *d == duration && !tx.is_canceled())
            .count()
    }
}

impl Clock for ManualClock {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel();
        self.sleepers.borrow_mut().push((duration, tx));
        Box::pin(async move {
            let _ = rx.await;
        })
    }
}

pub type TestStore = Rc<RefCell<DashboardState>>;
pub type TestSync = ViewSync<MockApi, TestStore, ManualClock>;

pub struct Harness {
    pub api: Rc<MockApi>,
    pub store: TestStore,
    pub clock: ManualClock,
    pub sync: TestSync,
    pool: RefCell<LocalPool>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        let api = Rc::new(MockApi::new());
        let store: TestStore = Rc::new(RefCell::new(DashboardState::default()));
        let clock = ManualClock::default();
        let sync = ViewSync::new(api.clone(), store.clone(), clock.clone(), config);
        Self {
            api,
            store,
            clock,
            sync,
            pool: RefCell::new(LocalPool::new()),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.store.snapshot()
    }

    /// Spawn `fut` and run everything until no task can make progress.
    pub fn spawn(&self, fut: impl Future<Output = ()> + 'static) {
        self.pool
            .borrow()
            .spawner()
            .spawn_local(fut)
            .expect("spawn test task");
        self.settle();
    }

    pub fn settle(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }
}
