//! The ordered list of checked points, newest first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use pc_api::{ApiError, PointsApi};
use pc_auth::{BearerSource, LogoutHook, LogoutReason};
use pc_core::{CheckRequest, Point};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::Instant;

use crate::error::HistoryError;

/// An immutable view of the history, newest first.
pub type Snapshot = Arc<[Point]>;

/// Holds the history and keeps it in step with the backend.
///
/// Every mutation bumps a generation counter. A fetch only publishes its
/// result if no other mutation started after it, so a slow response can never
/// overwrite a newer one.
pub struct HistoryStore<A> {
    api: A,
    session: Arc<dyn BearerSource>,
    snapshot: watch::Sender<Snapshot>,
    generation: AtomicU64,
    poller: Mutex<Option<AbortHandle>>,
}

impl<A: PointsApi> HistoryStore<A> {
    #[must_use]
    pub fn new(api: A, session: Arc<dyn BearerSource>) -> Self {
        let (snapshot, _) = watch::channel(Snapshot::from(Vec::new()));
        Self {
            api,
            session,
            snapshot,
            generation: AtomicU64::new(0),
            poller: Mutex::new(None),
        }
    }

    /// Validate `(x, y, r)` and [`Self::submit`] it.
    ///
    /// # Errors
    ///
    /// [`HistoryError::Input`] for out-of-bounds values, otherwise as
    /// [`Self::submit`].
    pub async fn check(&self, x: f64, y: f64, r: f64) -> Result<Point, HistoryError> {
        let request = CheckRequest::new(x, y, r)?;
        self.submit(request).await
    }

    /// Send a point to the backend and prepend the acknowledged result.
    ///
    /// The list is only touched after the backend answers. `exec_time` is set
    /// to the measured round trip in seconds.
    ///
    /// # Errors
    ///
    /// [`HistoryError::Session`] without a usable token,
    /// [`HistoryError::Network`] when the call fails. The list is unchanged.
    pub async fn submit(&self, request: CheckRequest) -> Result<Point, HistoryError> {
        let token = self.session.bearer()?;
        let started = Instant::now();
        let record = self
            .api
            .check(&token, &request)
            .await
            .map_err(|error| self.api_failure(error))?;
        let latency = started.elapsed().as_secs_f64();

        let point = Point::from_record(record).with_exec_time(latency);
        self.bump();
        self.snapshot.send_modify(|list| {
            let mut next = Vec::with_capacity(list.len() + 1);
            next.push(point.clone());
            next.extend(list.iter().cloned());
            *list = next.into();
        });
        tracing::debug!(x = point.x, y = point.y, r = point.r, hit = point.result, latency, "point checked");
        Ok(point)
    }

    /// Replace the list with the backend's history.
    ///
    /// If another mutation started while this fetch was in flight, the fetched
    /// list is dropped and the current snapshot is returned instead.
    ///
    /// # Errors
    ///
    /// [`HistoryError::Session`] or [`HistoryError::Network`]; the list is
    /// unchanged.
    pub async fn refresh(&self) -> Result<Snapshot, HistoryError> {
        let token = self.session.bearer()?;
        let generation = self.bump();
        let records = self
            .api
            .history(&token)
            .await
            .map_err(|error| self.api_failure(error))?;

        let fresh: Snapshot = records.into_iter().map(Point::from_record).collect();
        let applied = self.snapshot.send_if_modified(|list| {
            if self.generation.load(Ordering::SeqCst) == generation {
                *list = Arc::clone(&fresh);
                true
            } else {
                false
            }
        });
        if applied {
            tracing::debug!(count = fresh.len(), "history refreshed");
        } else {
            tracing::debug!(generation, "discarding superseded history fetch");
        }
        Ok(self.snapshot())
    }

    /// Delete the history on the backend, then locally.
    ///
    /// # Errors
    ///
    /// [`HistoryError::Session`] or [`HistoryError::Network`]; the list is
    /// unchanged.
    pub async fn clear(&self) -> Result<(), HistoryError> {
        let token = self.session.bearer()?;
        self.api
            .clear(&token)
            .await
            .map_err(|error| self.api_failure(error))?;
        self.clear_local();
        tracing::info!("history cleared");
        Ok(())
    }

    /// Empty the list without contacting the backend.
    pub fn clear_local(&self) {
        self.bump();
        self.snapshot.send_replace(Snapshot::from(Vec::new()));
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.snapshot.borrow())
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub(crate) fn session(&self) -> &Arc<dyn BearerSource> {
        &self.session
    }

    pub(crate) fn replace_poller(&self, handle: AbortHandle) {
        let previous = self
            .poller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Stop the poller, if one is running.
    pub fn stop_polling(&self) {
        if let Some(handle) = self
            .poller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }

    fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn api_failure(&self, error: ApiError) -> HistoryError {
        if error.is_unauthorized() {
            self.session.reject();
        }
        HistoryError::Network(error)
    }
}

impl<A: PointsApi> LogoutHook for HistoryStore<A> {
    fn on_logout(&self, reason: &LogoutReason) {
        tracing::debug!(reason = %reason, "clearing local history on logout");
        self.stop_polling();
        self.clear_local();
    }
}
