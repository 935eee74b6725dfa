use serde::{Deserialize, Serialize};

/// Top-level reader configuration, persisted as `settings.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReaderConfig {
    pub storage: StorageSettings,
    pub timing: TimingSettings,
    pub logging: LoggingSettings,
}

/// Where the persistent store lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// SQLite file path. `None` means `<data dir>/chapter-reader.db`.
    pub database_path: Option<String>,
    /// Origin that scopes every stored key.
    pub origin: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: None,
            origin: "default".to_string(),
        }
    }
}

/// Timer windows, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingSettings {
    /// Quiescence window of the trailing-edge scroll save.
    pub scroll_save_debounce_ms: u64,
    /// Delay before the nav layout is recomputed after a nav toggle.
    pub nav_layout_delay_ms: u64,
    /// Delay before the first progress update after DOM ready.
    pub initial_progress_delay_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            scroll_save_debounce_ms: 500,
            nav_layout_delay_ms: 10,
            initial_progress_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `env_logger` filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
