//! Page controller for the chapter reader.
//!
//! [`ReaderApp`] owns everything scoped to one page session: the store, the
//! document, the preference services and the timer queue. Hosts feed it page
//! events with their current time and drain the resulting patches.

use std::sync::Arc;

use crate::database::connection::Database;
use crate::managers::dropdown_manager::{DropdownManager, DropdownManagerTrait, DropdownState};
use crate::managers::storage_manager::{SqliteStorage, StorageManagerTrait};
use crate::services::nav_layout::{update_nav_right_position, NAV_OPEN_CLASS};
use crate::services::reading_progress::{compute_progress, update_reading_progress};
use crate::services::scheduler::{Debouncer, Millis, TimerQueue};
use crate::services::scroll_position::{RestoreOutcome, ScrollPositionStore, ScrollPositionStoreTrait};
use crate::services::style_state::{StyleState, StyleStateTrait};
use crate::services::theme_engine::{ThemeEngine, ThemeEngineTrait, ThemeMode};
use crate::types::chapter::ChapterContext;
use crate::types::preferences::StylePreferences;
use crate::types::settings::{ReaderConfig, TimingSettings};
use crate::ui::document::{ClickTarget, Document, ReadyState};
use crate::ui::patch::DomPatch;

/// Work deferred onto the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    SaveScroll,
    UpdateNavLayout,
    UpdateReadingProgress,
}

pub struct ReaderApp<S: StorageManagerTrait> {
    timing: TimingSettings,
    store: S,
    document: Document,
    style: StyleState,
    theme: ThemeEngine,
    scroll: ScrollPositionStore,
    dropdown: DropdownManager,
    timers: TimerQueue<TimerTask>,
    scroll_save: Debouncer,
    now: Millis,
}

impl ReaderApp<SqliteStorage> {
    /// Opens the SQLite store described by `config` at `db_path`.
    pub fn open(
        config: &ReaderConfig,
        db_path: &str,
        document: Document,
        context: ChapterContext,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);
        let store = SqliteStorage::new(db, &config.storage.origin);
        Ok(Self::new(store, document, context, config.timing.clone()))
    }
}

impl<S: StorageManagerTrait> ReaderApp<S> {
    /// Starts a page session. Stored preferences are read immediately, before
    /// the page is ready, the way a page script reads them on evaluation.
    pub fn new(store: S, document: Document, context: ChapterContext, timing: TimingSettings) -> Self {
        let mut app = Self {
            scroll_save: Debouncer::new(timing.scroll_save_debounce_ms),
            timing,
            store,
            document,
            style: StyleState::new(),
            theme: ThemeEngine::new(),
            scroll: ScrollPositionStore::new(ChapterContext::none()),
            dropdown: DropdownManager::new(),
            timers: TimerQueue::new(),
            now: 0,
        };
        app.begin_page(context);
        app
    }

    /// Replaces the page with a freshly loaded one, keeping the store.
    pub fn open_page(&mut self, document: Document, context: ChapterContext) {
        self.document = document;
        self.theme = ThemeEngine::new();
        self.dropdown = DropdownManager::new();
        self.timers = TimerQueue::new();
        self.scroll_save = Debouncer::new(self.timing.scroll_save_debounce_ms);
        self.begin_page(context);
    }

    fn begin_page(&mut self, context: ChapterContext) {
        if !context.is_complete() {
            log::warn!("no chapter identifiers supplied, scroll position tracking disabled");
        }
        self.scroll = ScrollPositionStore::new(context);
        self.style.load(&self.store);
    }

    // --- page events ---

    /// DOM ready: restore dark mode, typography, nav layout and scroll
    /// position, then schedule the first progress update.
    pub fn on_dom_content_loaded(&mut self, now: Millis) {
        self.advance_to(now);
        if self.document.ready_state() == ReadyState::Loading {
            self.document.set_ready_state(ReadyState::Interactive);
        }

        self.theme.restore(&self.store, &mut self.document);
        self.style.sync_font_select(&mut self.document);
        self.style.apply(&mut self.document);
        update_nav_right_position(&mut self.document);

        match self.scroll.restore(&self.store, &mut self.document) {
            RestoreOutcome::Scrolled(top) => log::debug!("restored scroll position {}", top),
            RestoreOutcome::Deferred(top) => log::debug!("scroll restore to {} waits for load", top),
            RestoreOutcome::Skipped => {}
        }

        self.timers.schedule(
            self.now + self.timing.initial_progress_delay_ms,
            TimerTask::UpdateReadingProgress,
        );
        self.dropdown.attach(&self.document);
    }

    /// Load complete: reposition navigation and run any deferred restore.
    pub fn on_load(&mut self, now: Millis) {
        self.advance_to(now);
        self.document.set_ready_state(ReadyState::Complete);
        update_nav_right_position(&mut self.document);
        self.scroll.on_load(&mut self.document);
    }

    pub fn on_resize(&mut self, now: Millis, inner_height: f64) {
        self.advance_to(now);
        self.document.set_inner_height(inner_height);
        update_nav_right_position(&mut self.document);
    }

    /// Scroll: feeds the debounced save and, separately, the progress display.
    pub fn on_scroll(&mut self, now: Millis, scroll_y: f64) {
        self.advance_to(now);
        self.document.set_scroll_y(scroll_y);
        self.scroll_save
            .call(self.now, &mut self.timers, TimerTask::SaveScroll);
        update_reading_progress(&mut self.document);
    }

    /// Page click. Returns whether the toggle stopped propagation.
    pub fn on_click(&mut self, now: Millis, target: &ClickTarget) -> bool {
        self.advance_to(now);
        self.dropdown.handle_click(&mut self.document, target)
    }

    /// Flips the `nav-open` body class and schedules a layout pass once the
    /// panel has settled. Returns whether the nav is now open.
    pub fn toggle_nav(&mut self, now: Millis) -> bool {
        self.advance_to(now);
        let open = self.document.toggle_body_class(NAV_OPEN_CLASS);
        self.timers.schedule(
            self.now + self.timing.nav_layout_delay_ms,
            TimerTask::UpdateNavLayout,
        );
        open
    }

    // --- user actions ---

    pub fn adjust_font(&mut self, delta: f64) {
        self.style.adjust_font(delta, &mut self.store, &mut self.document);
    }

    pub fn adjust_line(&mut self, delta: f64) {
        self.style.adjust_line(delta, &mut self.store, &mut self.document);
    }

    pub fn adjust_letter_spacing(&mut self, delta: f64) {
        self.style
            .adjust_letter_spacing(delta, &mut self.store, &mut self.document);
    }

    pub fn change_font_family(&mut self, name: &str) {
        self.style
            .change_font_family(name, &mut self.store, &mut self.document);
    }

    pub fn reset_style(&mut self) {
        self.style.reset_style(&mut self.store, &mut self.document);
    }

    pub fn toggle_dark(&mut self) -> ThemeMode {
        self.theme.toggle_dark(&mut self.store, &mut self.document)
    }

    /// Deletes this chapter's scroll record.
    pub fn clear_scroll_position(&mut self) -> bool {
        self.scroll.clear(&mut self.store)
    }

    pub fn toggle_chapter_dropdown(&mut self) -> Option<DropdownState> {
        self.dropdown.toggle(&mut self.document)
    }

    pub fn update_reading_progress(&mut self) -> Option<String> {
        update_reading_progress(&mut self.document)
    }

    // --- time ---

    /// Fires every timer due at or before `now`, in deadline order.
    /// Returns how many fired.
    pub fn advance_to(&mut self, now: Millis) -> usize {
        self.now = self.now.max(now);
        let mut fired = 0;
        while let Some((id, task)) = self.timers.pop_due(self.now) {
            match task {
                TimerTask::SaveScroll => {
                    self.scroll_save.fired(id);
                    self.scroll.save(&mut self.store, &self.document);
                }
                TimerTask::UpdateNavLayout => {
                    update_nav_right_position(&mut self.document);
                }
                TimerTask::UpdateReadingProgress => {
                    update_reading_progress(&mut self.document);
                }
            }
            fired += 1;
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    // --- accessors ---

    pub fn take_patches(&mut self) -> Vec<DomPatch> {
        self.document.take_patches()
    }

    pub fn style(&self) -> &StylePreferences {
        self.style.current()
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.get_theme()
    }

    pub fn dropdown_state(&self) -> DropdownState {
        self.dropdown.state(&self.document)
    }

    pub fn reading_progress(&self) -> f64 {
        compute_progress(&self.document.viewport())
    }

    pub fn context(&self) -> &ChapterContext {
        self.scroll.context()
    }

    pub fn is_scroll_save_pending(&self) -> bool {
        self.scroll_save.is_pending()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// For hosts reporting measurements (heights, ready state) directly.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
