//! App Core for Livemarks.
//!
//! Central struct wiring settings, the SQLite record store, the in-process
//! change feed, the session identity and one live bookmark list.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::backend::{AuthProvider, ChangeFeed, RecordStore};
use crate::database::{Database, SqliteRecordStore};
use crate::managers::add_form::AddBookmarkForm;
use crate::managers::reconciler::{LiveListReconciler, LiveSync};
use crate::platform;
use crate::services::change_feed::LocalChangeFeed;
use crate::services::session_auth::SessionAuth;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::bookmark::Identity;
use crate::types::errors::BookmarkError;

/// Central application struct holding the backend collaborators and the
/// dashboard state of the signed-in session.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub auth: Arc<SessionAuth>,
    pub feed: Arc<LocalChangeFeed>,
    pub store: Arc<SqliteRecordStore>,
    pub reconciler: LiveListReconciler,
    pub form: AddBookmarkForm,
    live: Option<LiveSync>,
}

impl App {
    /// Loads settings from `config_path` (or the platform default) and opens
    /// the database file named there under the data directory.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        settings_engine.load()?;

        let db_path = Self::database_path(&settings_engine.get_settings().storage.database_file);
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        info!(path = %db_path.display(), "opening bookmark database");
        let db = Database::open(&db_path)?;

        Ok(Self::assemble(settings_engine, db))
    }

    /// Builds an app over an in-memory database, for tests and demos.
    pub fn in_memory(settings_engine: SettingsEngine) -> Result<Self, rusqlite::Error> {
        Ok(Self::assemble(settings_engine, Database::open_in_memory()?))
    }

    fn assemble(settings_engine: SettingsEngine, db: Database) -> Self {
        let settings = settings_engine.get_settings().clone();
        let feed = Arc::new(LocalChangeFeed::new());
        let store = Arc::new(SqliteRecordStore::new(db, settings.storage.table).with_feed(feed.clone()));
        let auth = Arc::new(SessionAuth::new());
        let reconciler = LiveListReconciler::new(
            auth.clone() as Arc<dyn AuthProvider>,
            store.clone() as Arc<dyn RecordStore>,
        );
        let form = AddBookmarkForm::new(Duration::from_millis(settings.ui.success_flash_ms));

        Self {
            settings_engine,
            auth,
            feed,
            store,
            reconciler,
            form,
            live: None,
        }
    }

    /// Relative database files live in the platform data directory.
    fn database_path(file: &str) -> PathBuf {
        let path = PathBuf::from(file);
        if path.is_absolute() {
            path
        } else {
            platform::get_data_dir().join(path)
        }
    }

    /// Startup sequence: load the list, then subscribe to the change feed
    /// if sync is enabled.
    pub async fn startup(&mut self) -> Result<(), BookmarkError> {
        self.reconciler.load().await;

        let sync = self.settings_engine.get_settings().sync.clone();
        if sync.enabled && self.live.is_none() {
            let feed = self.feed.clone() as Arc<dyn ChangeFeed>;
            self.live = Some(self.reconciler.go_live(feed, self.store.scope()).await?);
            info!(channel = %sync.channel_name, "dashboard live");
        }
        Ok(())
    }

    /// Shutdown sequence: release the change feed subscription.
    pub fn shutdown(&mut self) {
        self.live = None;
    }

    pub fn is_live(&self) -> bool {
        self.live.as_ref().is_some_and(LiveSync::is_running)
    }

    /// Signs `identity` in and reloads the list for it.
    pub async fn sign_in(&self, identity: Identity) {
        self.auth.sign_in(identity);
        self.reconciler.load().await;
    }

    /// Signs out; the list is reloaded and therefore emptied.
    pub async fn sign_out(&self) -> Option<Identity> {
        let previous = self.auth.sign_out();
        self.reconciler.load().await;
        previous
    }

    /// Another session (a second tab) of the same user against the same
    /// backend. It starts in the loading state; call `load` on it.
    pub fn open_session(&self) -> LiveListReconciler {
        LiveListReconciler::new(
            self.auth.clone() as Arc<dyn AuthProvider>,
            self.store.clone() as Arc<dyn RecordStore>,
        )
    }
}
