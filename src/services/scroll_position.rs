//! Scroll Position Store: per-chapter vertical offset, keyed by
//! `scrollPos_{bookId}_{chapterId}`.
//!
//! Saves are expected to arrive through a trailing-edge debounce owned by the
//! page controller. Without both identifiers every operation is a no-op.

use crate::managers::storage_manager::{read_or_log, write_or_log, StorageManagerTrait};
use crate::types::chapter::ChapterContext;
use crate::types::preferences::{format_number, parse_float_prefix};
use crate::ui::document::{Document, ReadyState};

/// What a restore request did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RestoreOutcome {
    /// No identifiers, no record, or an unreadable record.
    Skipped,
    /// Scroll requested immediately.
    Scrolled(f64),
    /// Page still loading; the scroll runs once on the load signal.
    Deferred(f64),
}

/// Trait defining scroll-record operations.
pub trait ScrollPositionStoreTrait {
    fn save(&self, store: &mut dyn StorageManagerTrait, doc: &Document) -> bool;
    fn restore(&mut self, store: &dyn StorageManagerTrait, doc: &mut Document) -> RestoreOutcome;
    fn on_load(&mut self, doc: &mut Document) -> Option<f64>;
    fn clear(&mut self, store: &mut dyn StorageManagerTrait) -> bool;
}

#[derive(Debug, Clone)]
pub struct ScrollPositionStore {
    context: ChapterContext,
    pending_restore: Option<f64>,
}

impl ScrollPositionStore {
    pub fn new(context: ChapterContext) -> Self {
        Self {
            context,
            pending_restore: None,
        }
    }

    pub fn context(&self) -> &ChapterContext {
        &self.context
    }

    pub fn key(&self) -> Option<String> {
        self.context.scroll_key()
    }

    pub fn has_pending_restore(&self) -> bool {
        self.pending_restore.is_some()
    }
}

impl ScrollPositionStoreTrait for ScrollPositionStore {
    /// Writes the document's current vertical offset. Returns whether a write happened.
    fn save(&self, store: &mut dyn StorageManagerTrait, doc: &Document) -> bool {
        let Some(key) = self.key() else {
            return false;
        };
        write_or_log(store, &key, &format_number(doc.viewport().scroll_y));
        true
    }

    fn restore(&mut self, store: &dyn StorageManagerTrait, doc: &mut Document) -> RestoreOutcome {
        let Some(key) = self.key() else {
            return RestoreOutcome::Skipped;
        };
        let Some(saved) = read_or_log(store, &key) else {
            return RestoreOutcome::Skipped;
        };
        let target = match parse_float_prefix(&saved) {
            Some(v) if v.is_finite() => v,
            _ => {
                log::warn!("ignoring unreadable scroll record {}={:?}", key, saved);
                return RestoreOutcome::Skipped;
            }
        };

        if doc.ready_state() == ReadyState::Complete {
            doc.scroll_to(target);
            RestoreOutcome::Scrolled(target)
        } else {
            self.pending_restore = Some(target);
            RestoreOutcome::Deferred(target)
        }
    }

    /// Runs a deferred restore, at most once.
    fn on_load(&mut self, doc: &mut Document) -> Option<f64> {
        let target = self.pending_restore.take()?;
        doc.scroll_to(target);
        Some(target)
    }

    fn clear(&mut self, store: &mut dyn StorageManagerTrait) -> bool {
        let Some(key) = self.key() else {
            log::warn!("cannot clear scroll position: missing bookId or chapterId");
            return false;
        };
        if let Err(e) = store.remove_item(&key) {
            log::warn!("failed to remove '{}' from storage: {}", key, e);
            return false;
        }
        log::info!("cleared scroll position: {}", key);
        true
    }
}
