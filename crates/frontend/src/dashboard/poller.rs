//! Polling controller: re-fetch rules and logs on a fixed interval.

use super::api::AdminApi;
use super::state::{DashboardStore, ViewKind};
use super::sync::{Liveness, ViewSync};
use crate::shared::clock::Clock;
use futures::future::{abortable, AbortHandle, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const POLLED_VIEWS: &[ViewKind] = &[ViewKind::Rules, ViewKind::Logs];

/// Handle to a running polling loop. Cancelling (or dropping) it stops the
/// loop and tears its activation down: results that are still in flight are
/// discarded instead of being applied.
#[derive(Debug)]
pub struct PollingHandle {
    abort: AbortHandle,
    live: Liveness,
    finished: Arc<AtomicBool>,
}

impl PollingHandle {
    pub fn cancel(&self) {
        if self.live.is_alive() {
            log::debug!("Polling cancelled");
        }
        self.abort.abort();
        self.live.teardown();
    }

    /// `false` once the handle was cancelled, the activation was superseded
    /// or the loop has exited.
    pub fn is_active(&self) -> bool {
        !self.abort.is_aborted()
            && self.live.is_alive()
            && !self.finished.load(Ordering::Acquire)
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub struct PollingController<A, S, C> {
    sync: ViewSync<A, S, C>,
    interval: Duration,
}

impl<A, S, C> PollingController<A, S, C>
where
    A: AdminApi + 'static,
    S: DashboardStore,
    C: Clock,
{
    pub fn new(sync: ViewSync<A, S, C>) -> Self {
        let interval = sync.config().poll_interval();
        Self { sync, interval }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start polling. The first refresh cycle runs as soon as the returned
    /// future is first polled; the caller spawns it and keeps the handle.
    /// Activating again supersedes the previous activation.
    pub fn activate(&self) -> (PollingHandle, impl Future<Output = ()> + 'static) {
        let sync = self.sync.clone();
        let interval = self.interval;
        let live = self.sync.lifecycle().renew();
        let loop_live = live.clone();

        let cycle = async move {
            let mut in_flight = FuturesUnordered::new();
            // Ошибки не останавливают цикл: следующий тик повторит запрос
            while loop_live.is_alive() {
                in_flight.push(sync.refresh_for(&loop_live, POLLED_VIEWS));
                // the tick starts with the cycle; a slow cycle overlaps the next one
                let mut tick = sync.clock().sleep(interval).fuse();
                loop {
                    futures::select! {
                        _ = tick => break,
                        _ = in_flight.select_next_some() => {}
                    }
                }
            }
        };

        let (task, abort) = abortable(cycle);
        let finished = Arc::new(AtomicBool::new(false));
        let handle = PollingHandle {
            abort,
            live,
            finished: finished.clone(),
        };
        log::debug!("Polling every {:?}", interval);
        (handle, async move {
            let _ = task.await;
            finished.store(true, Ordering::Release);
        })
    }
}
