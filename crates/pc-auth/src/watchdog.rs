//! Background enforcement of the session invariants.

use std::sync::Arc;
use std::time::Duration;

use pc_api::AuthApi;
use pc_storage::{StorageEvent, StorageEvents};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::session::SessionManager;

/// Default period between invariant checks.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the watchdog task. Dropping the handle stops the task.
#[derive(Debug)]
pub struct WatchdogHandle {
    task: JoinHandle<()>,
}

impl WatchdogHandle {
    pub fn stop(self) {
        drop(self);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for WatchdogHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<A: AuthApi + 'static> SessionManager<A> {
    /// Run [`Self::enforce`] every `interval` and
    /// [`Self::handle_storage_event`] on every change made by another tab.
    ///
    /// The task holds the manager weakly and ends when it is dropped. A second
    /// call replaces the first watchdog.
    pub fn start_watchdog(self: &Arc<Self>, interval: Duration) -> WatchdogHandle {
        let session = Arc::downgrade(self);
        let mut events = self.storage().subscribe();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let Some(session) = session.upgrade() else { break };
                        session.enforce();
                    }
                    event = next_event(&mut events) => {
                        let Some(event) = event else {
                            tracing::debug!("storage event feed closed");
                            events = None;
                            continue;
                        };
                        let Some(session) = session.upgrade() else { break };
                        session.handle_storage_event(&event);
                    }
                }
            }
            tracing::debug!("session watchdog exited");
        });

        self.replace_watchdog(task.abort_handle());
        tracing::debug!(interval = ?interval, "session watchdog started");
        WatchdogHandle { task }
    }
}

async fn next_event(events: &mut Option<StorageEvents>) -> Option<StorageEvent> {
    match events {
        Some(events) => events.recv().await,
        None => std::future::pending().await,
    }
}
