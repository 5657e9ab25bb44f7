//! Add-bookmark form state.
//!
//! Holds the two input fields and the feedback shown after a submit: a
//! persistent error message, or a success indicator that disappears after
//! `success_flash`.

use std::time::Duration;

use tokio::time::Instant;

use super::reconciler::LiveListReconciler;
use crate::types::bookmark::BookmarkRecord;
use crate::types::errors::BookmarkError;

/// Default time the success indicator stays visible.
pub const DEFAULT_SUCCESS_FLASH: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    /// The last submit failed; the message stays until the next attempt.
    Failed(String),
    Succeeded { at: Instant },
}

pub struct AddBookmarkForm {
    title: String,
    url: String,
    status: FormStatus,
    success_flash: Duration,
}

impl Default for AddBookmarkForm {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_FLASH)
    }
}

impl AddBookmarkForm {
    pub fn new(success_flash: Duration) -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            status: FormStatus::Idle,
            success_flash,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// False while a submit is running or when either field is blank.
    pub fn can_submit(&self) -> bool {
        self.status != FormStatus::Submitting
            && !self.title.trim().is_empty()
            && !self.url.trim().is_empty()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the success indicator should be shown right now.
    pub fn success_visible(&self) -> bool {
        match self.status {
            FormStatus::Succeeded { at } => at.elapsed() < self.success_flash,
            _ => false,
        }
    }

    /// Submits the current fields through `reconciler`.
    ///
    /// On success the fields are cleared; on failure they are kept and the
    /// error message is stored.
    pub async fn submit(&mut self, reconciler: &LiveListReconciler) -> Result<BookmarkRecord, BookmarkError> {
        self.status = FormStatus::Submitting;

        let result = reconciler.add_bookmark(&self.title, &self.url).await;
        match result {
            Ok(record) => {
                self.title.clear();
                self.url.clear();
                self.status = FormStatus::Succeeded { at: Instant::now() };
                Ok(record)
            }
            Err(err) => {
                self.status = FormStatus::Failed(err.to_string());
                Err(err)
            }
        }
    }
}
