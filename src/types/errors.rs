use std::fmt;

use thiserror::Error;

// === ValidationError ===

/// Errors raised while checking bookmark form input. No backend call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title or URL is blank after trimming.
    #[error("Both URL and title are required.")]
    EmptyFields,
    /// The URL does not parse as an absolute http(s) URL.
    #[error("Please enter a valid URL (e.g., https://example.com).")]
    InvalidUrl(String),
}

// === StoreError ===

/// Errors reported by a record store or change feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("Bookmark database error: {0}")]
    Database(String),
    /// The change feed could not be subscribed or delivered to.
    #[error("Change feed error: {0}")]
    Feed(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

// === BookmarkError ===

/// Errors surfaced by bookmark mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookmarkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No authenticated identity at mutation time.
    #[error("You must be logged in to {0} bookmarks.")]
    Unauthorized(BookmarkAction),
    #[error(transparent)]
    Backend(#[from] StoreError),
}

/// Mutation named in a [`BookmarkError::Unauthorized`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkAction {
    Add,
    Delete,
}

impl fmt::Display for BookmarkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkAction::Add => write!(f, "add"),
            BookmarkAction::Delete => write!(f, "delete"),
        }
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
