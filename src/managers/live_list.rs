//! In-memory state of the bookmark list for one session.
//!
//! [`LiveList`] holds the records newest-first and is the only place they are
//! mutated. Every insert path, local or remote, goes through
//! [`LiveList::insert_front`], which skips ids already present: applying a
//! local insert and its feed echo in either order leaves exactly one copy.
//!
//! New records are prepended rather than sorted in. A record confirmed by
//! the backend is always the newest one, so the list stays ordered by
//! `created_at` descending without re-sorting.

use tracing::debug;

use crate::types::bookmark::{BookmarkRecord, ChangeEvent, Identity};

/// Ordered, de-duplicated bookmark list with a loading flag and search query.
#[derive(Debug, Clone)]
pub struct LiveList {
    records: Vec<BookmarkRecord>,
    loading: bool,
    query: String,
}

impl Default for LiveList {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveList {
    /// Creates an empty list in the loading state.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            query: String::new(),
        }
    }

    /// Replaces the whole sequence with a freshly loaded one and clears loading.
    pub fn replace_all(&mut self, records: Vec<BookmarkRecord>) {
        self.records = records;
        self.loading = false;
    }

    /// Empties the list and clears loading.
    pub fn finish_loading_empty(&mut self) {
        self.replace_all(Vec::new());
    }

    /// Prepends `record` unless a record with the same id is present.
    ///
    /// Returns `true` if the record was added.
    pub fn insert_front(&mut self, record: BookmarkRecord) -> bool {
        if self.contains(&record.id) {
            debug!(id = %record.id, "skipping duplicate bookmark");
            return false;
        }
        self.records.insert(0, record);
        true
    }

    /// Removes the record with `id`. Returns `false` if it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    /// Applies a change feed event on behalf of `current`.
    ///
    /// Inserts owned by anyone other than the current identity are ignored,
    /// as are all inserts when signed out. Returns `true` if the list changed.
    pub fn apply_event(&mut self, event: ChangeEvent, current: Option<&Identity>) -> bool {
        match event {
            ChangeEvent::Insert { record, owner_id } => match current {
                Some(identity) if identity.user_id == owner_id => self.insert_front(record),
                _ => {
                    debug!(id = %record.id, owner_id = %owner_id, "ignoring insert for another owner");
                    false
                }
            },
            ChangeEvent::Delete { id } => self.remove(&id),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Records matching the current query, in list order.
    pub fn visible(&self) -> Vec<&BookmarkRecord> {
        filter_records(&self.records, &self.query)
    }

    pub fn records(&self) -> &[BookmarkRecord] {
        &self.records
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Case-insensitive substring match of `query` against title or URL.
///
/// A blank query matches everything.
pub fn filter_records<'a>(records: &'a [BookmarkRecord], query: &str) -> Vec<&'a BookmarkRecord> {
    if query.trim().is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&needle) || r.url.to_lowercase().contains(&needle)
        })
        .collect()
}
