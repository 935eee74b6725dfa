// Chapter reader platform paths
// Linux:   $XDG_CONFIG_HOME/chapter-reader, $XDG_DATA_HOME/chapter-reader
// macOS:   ~/Library/Application Support/chapter-reader (both)
// Windows: %APPDATA%/chapter-reader (both)

use std::env;
use std::path::PathBuf;

/// Directory name used under every platform base directory.
pub const APP_DIR_NAME: &str = "chapter-reader";

/// Overrides the data directory on every platform when set.
pub const DATA_DIR_ENV: &str = "CHAPTER_READER_DATA_DIR";

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

#[cfg(target_os = "windows")]
fn appdata_dir() -> PathBuf {
    PathBuf::from(
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming")),
    )
}

/// Returns the directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR_NAME),
            _ => home_dir().join(".config").join(APP_DIR_NAME),
        }
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join(APP_DIR_NAME)
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join(APP_DIR_NAME)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        home_dir().join(format!(".{}", APP_DIR_NAME))
    }
}

/// Returns the directory holding the SQLite store.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    #[cfg(target_os = "linux")]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR_NAME),
            _ => home_dir().join(".local").join("share").join(APP_DIR_NAME),
        }
    }
    #[cfg(not(target_os = "linux"))]
    {
        get_config_dir()
    }
}
