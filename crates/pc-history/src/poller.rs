//! Periodic history refresh.

use std::sync::Arc;
use std::time::Duration;

use pc_api::PointsApi;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use crate::store::HistoryStore;

/// Default period between history fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Owns the polling task. Dropping the handle stops polling.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn stop(self) {
        drop(self);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<A: PointsApi + 'static> HistoryStore<A> {
    /// Refresh now and then every `interval`.
    ///
    /// Each tick abandons the previous fetch if it is still running. Failures
    /// are logged and the next tick tries again; ticks are skipped while
    /// logged out.
    pub fn start_polling(self: &Arc<Self>, interval: Duration) -> PollerHandle {
        let store = Arc::downgrade(self);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut in_flight = JoinSet::new();
            loop {
                ticker.tick().await;
                in_flight.abort_all();
                while in_flight.try_join_next().is_some() {}

                let Some(store) = store.upgrade() else { break };
                if !store.session().is_logged_in() {
                    tracing::trace!("not logged in; skipping history poll");
                    continue;
                }
                in_flight.spawn(async move {
                    if let Err(error) = store.refresh().await {
                        tracing::warn!(%error, "history poll failed");
                    }
                });
            }
        });

        self.replace_poller(task.abort_handle());
        tracing::debug!(interval = ?interval, "history polling started");
        PollerHandle { task }
    }
}
