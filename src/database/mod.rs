//! Livemarks database layer.
//!
//! SQLite connection management, schema migrations, and the
//! [`SqliteRecordStore`] implementation of [`crate::backend::RecordStore`].
//!
//! # Usage
//!
//! ```no_run
//! use livemarks::database::{Database, SqliteRecordStore};
//!
//! let db = Database::open("livemarks.db").expect("failed to open database");
//! let store = SqliteRecordStore::new(db, "bookmarks");
//! ```

pub mod connection;
pub mod migrations;
pub mod record_store;

pub use connection::Database;
pub use record_store::SqliteRecordStore;
