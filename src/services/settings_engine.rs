// Chapter reader settings engine
// Loads and saves the reader configuration (storage location, timer windows, log level)
// as a JSON file at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ReaderConfig;

/// File name of the config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "settings.json";
/// File name of the SQLite store inside the data directory.
pub const DATABASE_FILE_NAME: &str = "chapter-reader.db";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ReaderConfig, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ReaderConfig;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine persisting the [`ReaderConfig`] as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ReaderConfig,
}

impl SettingsEngine {
    /// Uses `path_override` when given, otherwise `settings.json` in the
    /// platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join(CONFIG_FILE_NAME)
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: ReaderConfig::default(),
        }
    }

    /// Where the persistent store lives under the current settings.
    pub fn database_path(&self) -> PathBuf {
        match &self.settings.storage.database_path {
            Some(p) => PathBuf::from(p),
            None => platform::get_data_dir().join(DATABASE_FILE_NAME),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Reads the config file. A missing file yields defaults; a malformed
    /// one is an error.
    fn load(&mut self) -> Result<ReaderConfig, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            log::debug!("no config at {}, using defaults", self.config_path);
            self.settings = ReaderConfig::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Ok(self.settings.clone())
    }

    /// Writes the config, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &ReaderConfig {
        &self.settings
    }

    /// Updates one value by dot-notation path and saves.
    ///
    /// # Examples
    /// - `"storage.origin"`
    /// - `"timing.scroll_save_debounce_ms"`
    /// - `"logging.level"`
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(SettingsError::InvalidKey(format!("Malformed key '{}'", key)));
        }

        let mut json = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (format!("/{}", parent.replace('.', "/")), leaf),
            None => (String::new(), key),
        };
        let parent = json
            .pointer_mut(&parent_path)
            .and_then(serde_json::Value::as_object_mut)
            .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
        if !parent.contains_key(leaf) {
            return Err(SettingsError::InvalidKey(format!(
                "Key '{}' not found in settings",
                key
            )));
        }
        parent.insert(leaf.to_string(), value);

        self.settings = serde_json::from_value(json).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        self.save()
    }

    /// Restores defaults and saves them.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ReaderConfig::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
