use serde::{Deserialize, Serialize};

/// A saved bookmark as stored by the backend.
///
/// `id` and `created_at` are assigned by the backend on insert; records are
/// never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub id: String,
    pub url: String,
    pub title: String,
    pub owner_id: String,
    /// UNIX timestamp in milliseconds.
    pub created_at: i64,
}

/// Payload of an insert, before the backend assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    pub owner_id: String,
}

/// The authenticated user of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            display_name: None,
        }
    }

    /// Name shown in the session header: display name if set, else email.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// A change notification delivered by the change feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ChangeEvent {
    Insert {
        record: BookmarkRecord,
        owner_id: String,
    },
    Delete {
        id: String,
    },
}

impl ChangeEvent {
    /// Builds the insert event the backend emits for a stored record.
    pub fn inserted(record: BookmarkRecord) -> Self {
        let owner_id = record.owner_id.clone();
        ChangeEvent::Insert { record, owner_id }
    }

    pub fn deleted(id: impl Into<String>) -> Self {
        ChangeEvent::Delete { id: id.into() }
    }

    /// Id of the record the event refers to.
    pub fn record_id(&self) -> &str {
        match self {
            ChangeEvent::Insert { record, .. } => &record.id,
            ChangeEvent::Delete { id } => id,
        }
    }
}
