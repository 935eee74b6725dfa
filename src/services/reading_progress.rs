//! Reading progress: how far through the chapter the viewport is, 0–100.
//!
//! Recomputed from scratch on every call; nothing is persisted.

use crate::ui::document::{Document, Viewport};

/// Percentage of the scrollable height already scrolled past.
///
/// A page no taller than its viewport counts as fully read.
pub fn compute_progress(viewport: &Viewport) -> f64 {
    let scrollable = viewport.scroll_height - viewport.inner_height;
    if scrollable <= 0.0 {
        return 100.0;
    }
    let progress = viewport.scroll_y / scrollable * 100.0;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 100.0)
}

/// Display form: nearest whole percent with a trailing `%`.
pub fn format_progress(progress: f64) -> String {
    format!("{}%", progress.round() as i64)
}

/// Writes the current progress into the display element, if the page has one.
/// Returns the rendered text.
pub fn update_reading_progress(doc: &mut Document) -> Option<String> {
    let text = format_progress(compute_progress(&doc.viewport()));
    if doc.set_progress_text(&text) {
        Some(text)
    } else {
        None
    }
}
