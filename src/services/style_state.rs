//! Style State: typography preferences applied to the content container.
//!
//! Values are loaded once per page, clamped on every adjustment, and written
//! through to the store immediately. Nothing here fails loudly: a missing
//! container turns mutators into no-ops and malformed stored values fall
//! back to the defaults.

use crate::managers::storage_manager::{read_or_log, write_or_log, StorageManagerTrait};
use crate::types::preferences::{
    format_number, stored_number_or, StylePreferences, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE,
    DEFAULT_LETTER_SPACING, DEFAULT_LINE_HEIGHT, FONT_FAMILY_KEY, FONT_SIZE_KEY,
    FONT_SIZE_RANGE, LETTER_SPACING_KEY, LETTER_SPACING_RANGE, LINE_HEIGHT_KEY,
    LINE_HEIGHT_RANGE,
};
use crate::ui::document::Document;

/// Trait defining the style state operations.
pub trait StyleStateTrait {
    fn load(&mut self, store: &dyn StorageManagerTrait);
    fn apply(&self, doc: &mut Document);
    fn adjust_font(&mut self, delta: f64, store: &mut dyn StorageManagerTrait, doc: &mut Document);
    fn adjust_line(&mut self, delta: f64, store: &mut dyn StorageManagerTrait, doc: &mut Document);
    fn adjust_letter_spacing(
        &mut self,
        delta: f64,
        store: &mut dyn StorageManagerTrait,
        doc: &mut Document,
    );
    fn change_font_family(&mut self, name: &str, store: &mut dyn StorageManagerTrait, doc: &mut Document);
    fn reset_style(&mut self, store: &mut dyn StorageManagerTrait, doc: &mut Document);
    fn current(&self) -> &StylePreferences;
}

#[derive(Debug, Clone, Default)]
pub struct StyleState {
    prefs: StylePreferences,
}

impl StyleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads from `store` and applies to `doc` in one step.
    pub fn initialize(&mut self, store: &dyn StorageManagerTrait, doc: &mut Document) {
        self.load(store);
        self.apply(doc);
    }

    /// Points the font selector, if any, at the current family.
    pub fn sync_font_select(&self, doc: &mut Document) {
        doc.set_font_select_value(&self.prefs.font_family);
    }

    fn apply_font_size(&self, doc: &mut Document) {
        doc.set_content_style("fontSize", &format!("{}px", format_number(self.prefs.font_size)));
    }

    fn apply_line_height(&self, doc: &mut Document) {
        doc.set_content_style("lineHeight", &format_number(self.prefs.line_height));
    }

    fn apply_font_family(&self, doc: &mut Document) {
        doc.set_content_style("fontFamily", &self.prefs.font_family);
    }

    fn apply_letter_spacing(&self, doc: &mut Document) {
        doc.set_content_style(
            "letterSpacing",
            &format!("{}px", format_number(self.prefs.letter_spacing)),
        );
    }
}

impl StyleStateTrait for StyleState {
    fn load(&mut self, store: &dyn StorageManagerTrait) {
        let font_size = read_or_log(store, FONT_SIZE_KEY);
        let line_height = read_or_log(store, LINE_HEIGHT_KEY);
        let letter_spacing = read_or_log(store, LETTER_SPACING_KEY);
        let font_family = read_or_log(store, FONT_FAMILY_KEY).filter(|f| !f.is_empty());

        self.prefs = StylePreferences {
            font_size: stored_number_or(font_size.as_deref(), DEFAULT_FONT_SIZE, FONT_SIZE_RANGE),
            line_height: stored_number_or(
                line_height.as_deref(),
                DEFAULT_LINE_HEIGHT,
                LINE_HEIGHT_RANGE,
            ),
            font_family: font_family.unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            letter_spacing: stored_number_or(
                letter_spacing.as_deref(),
                DEFAULT_LETTER_SPACING,
                LETTER_SPACING_RANGE,
            ),
        };
        log::debug!("loaded style preferences: {:?}", self.prefs);
    }

    fn apply(&self, doc: &mut Document) {
        if !doc.has_content() {
            return;
        }
        self.apply_font_size(doc);
        self.apply_line_height(doc);
        self.apply_font_family(doc);
        self.apply_letter_spacing(doc);
    }

    fn adjust_font(&mut self, delta: f64, store: &mut dyn StorageManagerTrait, doc: &mut Document) {
        if !doc.has_content() {
            return;
        }
        self.prefs.font_size = FONT_SIZE_RANGE.clamp(self.prefs.font_size + delta);
        self.apply_font_size(doc);
        write_or_log(store, FONT_SIZE_KEY, &format_number(self.prefs.font_size));
    }

    fn adjust_line(&mut self, delta: f64, store: &mut dyn StorageManagerTrait, doc: &mut Document) {
        if !doc.has_content() {
            return;
        }
        self.prefs.line_height = LINE_HEIGHT_RANGE.clamp(self.prefs.line_height + delta);
        self.apply_line_height(doc);
        write_or_log(store, LINE_HEIGHT_KEY, &format_number(self.prefs.line_height));
    }

    fn adjust_letter_spacing(
        &mut self,
        delta: f64,
        store: &mut dyn StorageManagerTrait,
        doc: &mut Document,
    ) {
        if !doc.has_content() {
            return;
        }
        self.prefs.letter_spacing = LETTER_SPACING_RANGE.clamp(self.prefs.letter_spacing + delta);
        self.apply_letter_spacing(doc);
        write_or_log(store, LETTER_SPACING_KEY, &format_number(self.prefs.letter_spacing));
    }

    fn change_font_family(&mut self, name: &str, store: &mut dyn StorageManagerTrait, doc: &mut Document) {
        if !doc.has_content() {
            return;
        }
        self.prefs.font_family = name.to_string();
        self.apply_font_family(doc);
        write_or_log(store, FONT_FAMILY_KEY, name);
    }

    fn reset_style(&mut self, store: &mut dyn StorageManagerTrait, doc: &mut Document) {
        if !doc.has_content() {
            return;
        }
        self.prefs = StylePreferences::default();
        self.apply(doc);
        write_or_log(store, FONT_SIZE_KEY, &format_number(self.prefs.font_size));
        write_or_log(store, LINE_HEIGHT_KEY, &format_number(self.prefs.line_height));
        write_or_log(store, FONT_FAMILY_KEY, &self.prefs.font_family);
        write_or_log(store, LETTER_SPACING_KEY, &format_number(self.prefs.letter_spacing));
    }

    fn current(&self) -> &StylePreferences {
        &self.prefs
    }
}
