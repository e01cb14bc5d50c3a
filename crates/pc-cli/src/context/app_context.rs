use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use pc_api::ApiClient;
use pc_auth::{BearerSource, Navigator, SessionManager, SessionState, SystemClock, ViewTracker};
use pc_config::PointcheckConfig;
use pc_history::HistoryStore;
use pc_storage::{FileStorage, SharedStorage};

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: PointcheckConfig,
    pub storage_dir: PathBuf,
    pub storage: Arc<dyn SharedStorage>,
    pub session: Arc<SessionManager<ApiClient>>,
    pub navigator: Arc<ViewTracker>,
    pub history: Arc<HistoryStore<ApiClient>>,
}

impl AppContext {
    /// Open the shared storage, adopt any stored session and wire the
    /// history store to it.
    pub fn init(config: PointcheckConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let storage_dir = resolve_storage_dir(&config, flags)?;
        let storage: Arc<dyn SharedStorage> = Arc::new(
            FileStorage::open(&storage_dir)
                .with_context(|| format!("failed to open storage at {}", storage_dir.display()))?,
        );
        Self::with_storage(config, storage_dir, storage)
    }

    /// Build the context over an already opened storage.
    pub fn with_storage(
        config: PointcheckConfig,
        storage_dir: PathBuf,
        storage: Arc<dyn SharedStorage>,
    ) -> anyhow::Result<Self> {
        let client = ApiClient::new(&config.api.base_url, config.api.timeout())
            .context("failed to build API client")?;

        let navigator = Arc::new(ViewTracker::new());
        let session = Arc::new(SessionManager::new(
            client.clone(),
            Arc::clone(&storage),
            Arc::new(SystemClock),
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        ));
        let state = session.init();
        tracing::debug!(
            storage = %storage_dir.display(),
            logged_in = state.is_logged_in(),
            "application context ready"
        );

        let history = Arc::new(HistoryStore::new(
            client,
            Arc::clone(&session) as Arc<dyn BearerSource>,
        ));
        session.add_logout_hook(&history);

        Ok(Self {
            config,
            storage_dir,
            storage,
            session,
            navigator,
            history,
        })
    }

    /// Fail early with a readable message when no session is active.
    pub fn require_session(&self) -> anyhow::Result<()> {
        match self.session.state() {
            SessionState::LoggedIn(_) => Ok(()),
            SessionState::LoggedOut { reason: Some(reason) } => {
                anyhow::bail!("{} Run 'pcheck auth login' first.", reason.notice())
            }
            SessionState::LoggedOut { reason: None } => {
                anyhow::bail!("not signed in. Run 'pcheck auth login' first.")
            }
        }
    }

    /// Stop background work before the process exits.
    pub fn shutdown(&self) {
        self.history.stop_polling();
        self.session.teardown();
    }
}

fn resolve_storage_dir(config: &PointcheckConfig, flags: &GlobalFlags) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &flags.storage_dir {
        return Ok(dir.clone());
    }
    config
        .session
        .storage_path()
        .context("no storage directory: set session.storage_dir or pass --storage-dir")
}
