// Livemarks platform paths
// Config and data directories per OS, selected with `cfg(target_os)`.
//
// Linux:   $XDG_CONFIG_HOME/livemarks, $XDG_DATA_HOME/livemarks
// macOS:   ~/Library/Application Support/Livemarks (both)
// Windows: %APPDATA%/Livemarks (both)

use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the data directory on every platform.
pub const DATA_DIR_ENV: &str = "LIVEMARKS_DATA_DIR";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Resolves an XDG base directory, falling back to `~/<fallback>`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => fallback.iter().fold(home_dir(), |path, part| path.join(part)),
    }
}

/// Returns the configuration directory for Livemarks.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("Livemarks")
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join("Livemarks")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"]).join("livemarks")
    }
}

/// Returns the data directory for Livemarks.
///
/// `LIVEMARKS_DATA_DIR` wins when set.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        get_config_dir()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"]).join("livemarks")
    }
}
