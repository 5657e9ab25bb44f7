use serde::{Deserialize, Serialize};

/// Top-level application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppSettings {
    pub storage: StorageSettings,
    pub sync: SyncSettings,
    pub ui: UiSettings,
}

/// Where bookmarks are persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// SQLite file name, resolved against the data directory when relative.
    pub database_file: String,
    /// Backend table the records live in; also the change feed scope.
    pub table: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_file: "livemarks.db".to_string(),
            table: "bookmarks".to_string(),
        }
    }
}

/// Real-time change feed settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncSettings {
    pub enabled: bool,
    pub channel_name: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            channel_name: "bookmarks-realtime".to_string(),
        }
    }
}

/// Interaction settings for the bookmark views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiSettings {
    /// How long the "Bookmark added" indicator stays visible.
    pub success_flash_ms: u64,
    #[serde(default = "default_rate_limit")]
    pub max_requests_per_second: u32,
}

fn default_rate_limit() -> u32 {
    200
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            success_flash_ms: 2000,
            max_requests_per_second: default_rate_limit(),
        }
    }
}
