//! Boundary contract with the hosted backend.
//!
//! The reconciler only talks to these traits. Reference implementations live
//! in [`crate::services::session_auth`], [`crate::services::change_feed`] and
//! [`crate::database::record_store`].

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::types::bookmark::{BookmarkRecord, ChangeEvent, Identity, NewBookmark};
use crate::types::errors::StoreError;

/// Source of the current authenticated identity.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn current_identity(&self) -> Option<Identity>;
}

/// CRUD access to the remote bookmark table.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<BookmarkRecord>, StoreError>;

    /// Stores a bookmark; the backend assigns `id` and `created_at`.
    async fn insert(&self, bookmark: NewBookmark) -> Result<BookmarkRecord, StoreError>;

    /// Deletes the record `id` if it is owned by `owner_id`. A record that
    /// is absent or owned by someone else is left alone and is not an error.
    async fn delete_by_id(&self, id: &str, owner_id: &str) -> Result<(), StoreError>;
}

/// Subscribable stream of insert/delete notifications for a table scope.
///
/// Delivery is asynchronous and unordered relative to `RecordStore` calls.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    async fn subscribe(&self, scope: &str) -> Result<FeedSubscription, StoreError>;

    /// Releases a subscription. Unknown handles are ignored.
    fn unsubscribe(&self, handle: &SubscriptionHandle);
}

/// Identifies one live subscription on a feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    id: Uuid,
    scope: String,
}

impl SubscriptionHandle {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            scope: scope.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }
}

/// An acquired subscription: the handle to release and the event stream.
#[derive(Debug)]
pub struct FeedSubscription {
    pub handle: SubscriptionHandle,
    pub events: mpsc::UnboundedReceiver<ChangeEvent>,
}
