//! SQLite-backed [`RecordStore`].
//!
//! Each successful mutation is published to an attached [`LocalChangeFeed`],
//! the way the hosted backend echoes table changes to realtime subscribers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rusqlite::params;
use tracing::debug;
use uuid::Uuid;

use super::connection::Database;
use crate::backend::RecordStore;
use crate::services::change_feed::LocalChangeFeed;
use crate::types::bookmark::{BookmarkRecord, ChangeEvent, NewBookmark};
use crate::types::errors::StoreError;

/// Record store over a single SQLite connection.
pub struct SqliteRecordStore {
    db: Mutex<Database>,
    scope: String,
    feed: Option<Arc<LocalChangeFeed>>,
}

impl SqliteRecordStore {
    /// Creates a store whose changes are announced under `scope` (the table name).
    pub fn new(db: Database, scope: impl Into<String>) -> Self {
        Self {
            db: Mutex::new(db),
            scope: scope.into(),
            feed: None,
        }
    }

    /// Publishes every insert and delete to `feed`.
    pub fn with_feed(mut self, feed: Arc<LocalChangeFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Returns the current UNIX timestamp in milliseconds.
    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    fn db(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn announce(&self, event: ChangeEvent) {
        if let Some(feed) = &self.feed {
            let delivered = feed.publish(&self.scope, event);
            debug!(scope = %self.scope, delivered, "change published");
        }
    }

    /// Reads a single `BookmarkRecord` row into a struct.
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<BookmarkRecord> {
        Ok(BookmarkRecord {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            owner_id: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn list_sync(&self, owner_id: &str) -> Result<Vec<BookmarkRecord>, StoreError> {
        let db = self.db();
        let mut stmt = db.connection().prepare(
            "SELECT id, url, title, owner_id, created_at FROM bookmarks \
             WHERE owner_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(params![owner_id], Self::row_to_record)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn insert_sync(&self, bookmark: NewBookmark) -> Result<BookmarkRecord, StoreError> {
        let record = BookmarkRecord {
            id: Uuid::new_v4().to_string(),
            url: bookmark.url,
            title: bookmark.title,
            owner_id: bookmark.owner_id,
            created_at: Self::now_millis(),
        };
        self.db().connection().execute(
            "INSERT INTO bookmarks (id, url, title, owner_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![record.id, record.url, record.title, record.owner_id, record.created_at],
        )?;
        Ok(record)
    }

    /// Deletes by id within one owner's rows; returns whether a row was removed.
    fn delete_sync(&self, id: &str, owner_id: &str) -> Result<bool, StoreError> {
        let affected = self.db().connection().execute(
            "DELETE FROM bookmarks WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        Ok(affected > 0)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<BookmarkRecord>, StoreError> {
        self.list_sync(owner_id)
    }

    async fn insert(&self, bookmark: NewBookmark) -> Result<BookmarkRecord, StoreError> {
        let record = self.insert_sync(bookmark)?;
        self.announce(ChangeEvent::inserted(record.clone()));
        Ok(record)
    }

    /// Deleting an id that does not exist, or that belongs to another
    /// owner, succeeds and announces nothing.
    async fn delete_by_id(&self, id: &str, owner_id: &str) -> Result<(), StoreError> {
        if self.delete_sync(id, owner_id)? {
            self.announce(ChangeEvent::deleted(id));
        } else {
            debug!(id, owner_id, "no owned bookmark to delete");
        }
        Ok(())
    }
}
