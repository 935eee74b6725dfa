//! Theme engine: the reader's dark/light mode switch.
//!
//! Dark mode is a `dark` class on the page body, persisted as the string
//! `"true"` or `"false"` under `darkMode`.

use serde::{Deserialize, Serialize};

use crate::managers::storage_manager::{read_or_log, write_or_log, StorageManagerTrait};
use crate::types::preferences::DARK_MODE_KEY;
use crate::ui::document::Document;

/// Body class that switches the page into dark mode.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Trait defining the theme engine interface.
pub trait ThemeEngineTrait {
    fn get_theme(&self) -> ThemeMode;
    fn restore(&mut self, store: &dyn StorageManagerTrait, doc: &mut Document);
    fn toggle_dark(&mut self, store: &mut dyn StorageManagerTrait, doc: &mut Document) -> ThemeMode;
}

#[derive(Debug, Default)]
pub struct ThemeEngine {
    current_theme: ThemeMode,
}

impl ThemeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dark(&self) -> bool {
        self.current_theme == ThemeMode::Dark
    }
}

impl ThemeEngineTrait for ThemeEngine {
    fn get_theme(&self) -> ThemeMode {
        self.current_theme
    }

    /// Applies dark mode only when the stored flag is exactly `"true"`.
    fn restore(&mut self, store: &dyn StorageManagerTrait, doc: &mut Document) {
        if read_or_log(store, DARK_MODE_KEY).as_deref() == Some("true") {
            doc.set_body_class(DARK_CLASS, true);
            self.current_theme = ThemeMode::Dark;
        } else {
            self.current_theme = ThemeMode::Light;
        }
    }

    fn toggle_dark(&mut self, store: &mut dyn StorageManagerTrait, doc: &mut Document) -> ThemeMode {
        let dark = doc.toggle_body_class(DARK_CLASS);
        self.current_theme = if dark { ThemeMode::Dark } else { ThemeMode::Light };
        write_or_log(store, DARK_MODE_KEY, if dark { "true" } else { "false" });
        log::debug!("theme switched to {:?}", self.current_theme);
        self.current_theme
    }
}
