//! Live List Reconciler for Livemarks.
//!
//! Keeps one session's [`LiveList`] consistent with the backend across the
//! initial load, optimistic local inserts and deletes, and change feed events
//! that may echo this session's own mutations in any order.
//!
//! The list sits behind a `std::sync::Mutex` that is only held for the
//! synchronous mutation step, never across an `.await`, so each handler's
//! update is applied as one step.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::live_list::LiveList;
use crate::backend::{AuthProvider, ChangeFeed, FeedSubscription, RecordStore, SubscriptionHandle};
use crate::services::url_validation::validate_entry;
use crate::types::bookmark::{BookmarkRecord, ChangeEvent, NewBookmark};
use crate::types::errors::{BookmarkAction, BookmarkError};

/// Result of a local delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend confirmed the delete and the record is gone locally.
    Deleted,
    /// A delete for the same id was already running; nothing was sent.
    AlreadyInFlight,
}

/// Reconciles the local bookmark list with the record store and change feed.
#[derive(Clone)]
pub struct LiveListReconciler {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn RecordStore>,
    list: Arc<Mutex<LiveList>>,
    deleting: Arc<Mutex<HashSet<String>>>,
}

impl LiveListReconciler {
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            auth,
            store,
            list: Arc::new(Mutex::new(LiveList::new())),
            deleting: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    fn list(&self) -> MutexGuard<'_, LiveList> {
        self.list.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads every bookmark of the current identity, newest first.
    ///
    /// Signed out: the list becomes empty. A failed fetch also leaves the
    /// list empty; the error is logged and not returned.
    pub async fn load(&self) {
        let Some(identity) = self.auth.current_identity().await else {
            self.list().finish_loading_empty();
            return;
        };

        let fetched = self.store.list_by_owner(&identity.user_id).await;
        match fetched {
            Ok(records) => {
                debug!(count = records.len(), "bookmarks loaded");
                self.list().replace_all(records);
            }
            Err(err) => {
                warn!(error = %err, "initial bookmark load failed");
                self.list().finish_loading_empty();
            }
        }
    }

    /// Validates and stores a new bookmark, then prepends it locally.
    ///
    /// Validation runs before the identity check, and both before any backend
    /// call. On any error the list is left untouched.
    pub async fn add_bookmark(&self, title: &str, url: &str) -> Result<BookmarkRecord, BookmarkError> {
        let (title, url) = validate_entry(title, url)?;
        let identity = self
            .auth
            .current_identity()
            .await
            .ok_or(BookmarkError::Unauthorized(BookmarkAction::Add))?;

        let record = self
            .store
            .insert(NewBookmark {
                url,
                title,
                owner_id: identity.user_id,
            })
            .await?;

        self.list().insert_front(record.clone());
        Ok(record)
    }

    /// Deletes a bookmark by id.
    ///
    /// Only one delete per id runs at a time; a repeated request while one is
    /// pending returns [`DeleteOutcome::AlreadyInFlight`]. Removing an id that
    /// is no longer listed (say, a feed event got there first) is a no-op.
    /// The store only removes rows owned by the current identity.
    pub async fn delete_bookmark(&self, id: &str) -> Result<DeleteOutcome, BookmarkError> {
        let identity = self
            .auth
            .current_identity()
            .await
            .ok_or(BookmarkError::Unauthorized(BookmarkAction::Delete))?;

        let Some(_in_flight) = InFlightDelete::acquire(&self.deleting, id) else {
            return Ok(DeleteOutcome::AlreadyInFlight);
        };

        self.store.delete_by_id(id, &identity.user_id).await?;
        self.list().remove(id);
        Ok(DeleteOutcome::Deleted)
    }

    /// Applies one change feed event.
    ///
    /// Insert ownership is checked against the identity current at delivery
    /// time. Returns `true` if the list changed.
    pub async fn apply_remote_event(&self, event: ChangeEvent) -> bool {
        let identity = match &event {
            ChangeEvent::Insert { .. } => self.auth.current_identity().await,
            ChangeEvent::Delete { .. } => None,
        };
        self.list().apply_event(event, identity.as_ref())
    }

    /// Subscribes to `scope` on `feed` and applies its events until the
    /// returned guard is dropped.
    pub async fn go_live(&self, feed: Arc<dyn ChangeFeed>, scope: &str) -> Result<LiveSync, BookmarkError> {
        let FeedSubscription { handle, mut events } = feed.subscribe(scope).await?;

        let reconciler = self.clone();
        let task = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                reconciler.apply_remote_event(event).await;
            }
        });

        info!(subscription = %handle.id(), scope, "live sync started");
        Ok(LiveSync { feed, handle, task })
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.list().set_query(query);
    }

    pub fn clear_query(&self) {
        self.list().clear_query();
    }

    pub fn query(&self) -> String {
        self.list().query().to_string()
    }

    /// Records matching the current search query.
    pub fn visible(&self) -> Vec<BookmarkRecord> {
        self.list().visible().into_iter().cloned().collect()
    }

    /// Every record, unfiltered, in list order.
    pub fn snapshot(&self) -> Vec<BookmarkRecord> {
        self.list().records().to_vec()
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.list().is_loading()
    }

    /// Whether a delete for `id` is currently pending.
    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }
}

/// Marks an id as having a delete in flight until dropped.
struct InFlightDelete {
    set: Arc<Mutex<HashSet<String>>>,
    id: String,
}

impl InFlightDelete {
    fn acquire(set: &Arc<Mutex<HashSet<String>>>, id: &str) -> Option<Self> {
        let inserted = set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string());
        inserted.then(|| Self {
            set: Arc::clone(set),
            id: id.to_string(),
        })
    }
}

impl Drop for InFlightDelete {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

/// A running change feed subscription.
///
/// Dropping it stops event delivery and releases the subscription.
pub struct LiveSync {
    feed: Arc<dyn ChangeFeed>,
    handle: SubscriptionHandle,
    task: JoinHandle<()>,
}

impl LiveSync {
    pub fn handle(&self) -> &SubscriptionHandle {
        &self.handle
    }

    /// Whether events are still being applied.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops syncing. Equivalent to dropping the guard.
    pub fn stop(self) {}
}

impl Drop for LiveSync {
    fn drop(&mut self) {
        self.task.abort();
        self.feed.unsubscribe(&self.handle);
        info!(subscription = %self.handle.id(), "live sync stopped");
    }
}
