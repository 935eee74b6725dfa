//! End-to-end page sessions through `ReaderApp`: events in, DOM state and
//! store contents out.

use chapter_reader::app::ReaderApp;
use chapter_reader::managers::dropdown_manager::DropdownState;
use chapter_reader::managers::storage_manager::{MemoryStorage, SqliteStorage, StorageManagerTrait};
use chapter_reader::services::theme_engine::ThemeMode;
use chapter_reader::types::chapter::ChapterContext;
use chapter_reader::types::settings::{ReaderConfig, TimingSettings};
use chapter_reader::ui::document::{ClickTarget, Document, ReadyState, Viewport};
use chapter_reader::ui::patch::{DomPatch, ElementRef};

fn page() -> Document {
    Document::reader_page()
        .with_viewport(Viewport {
            scroll_y: 0.0,
            inner_height: 1000.0,
            scroll_height: 3000.0,
        })
        .with_nav_left_height(Some(40))
}

fn app(store: MemoryStorage) -> ReaderApp<MemoryStorage> {
    ReaderApp::new(store, page(), ChapterContext::new("b1", "c1"), TimingSettings::default())
}

#[test]
fn test_dom_ready_applies_stored_preferences() {
    let mut store = MemoryStorage::new();
    store.set_item("darkMode", "true").unwrap();
    store.set_item("fontSize", "21").unwrap();
    store.set_item("fontFamily", "Verdana, sans-serif").unwrap();
    let mut app = app(store);

    app.on_dom_content_loaded(0);

    let doc = app.document();
    assert!(doc.has_body_class("dark"));
    assert_eq!(app.theme(), ThemeMode::Dark);
    let content = doc.content().unwrap();
    assert_eq!(content.style("fontSize"), Some("21px"));
    assert_eq!(content.style("lineHeight"), Some("1.8"));
    assert_eq!(content.style("fontFamily"), Some("Verdana, sans-serif"));
    assert_eq!(content.style("letterSpacing"), Some("2px"));
    assert_eq!(doc.font_select_value(), Some("Verdana, sans-serif"));
    assert_eq!(doc.nav_right().unwrap().style("top"), Some("calc(100% + 40px)"));
}

#[test]
fn test_first_progress_update_after_dom_ready() {
    let mut app = app(MemoryStorage::new());
    app.on_dom_content_loaded(0);
    assert_eq!(app.document().progress_text(), Some(""));
    assert_eq!(app.next_deadline(), Some(100));

    assert_eq!(app.advance_to(100), 1);
    assert_eq!(app.document().progress_text(), Some("0%"));
}

#[test]
fn test_progress_updates_on_every_scroll() {
    let mut app = app(MemoryStorage::new());
    app.on_dom_content_loaded(0);

    app.on_scroll(200, 1000.0);
    assert_eq!(app.document().progress_text(), Some("50%"));
    app.on_scroll(210, 2000.0);
    assert_eq!(app.document().progress_text(), Some("100%"));
    assert_eq!(app.reading_progress(), 100.0);
}

#[test]
fn test_scroll_burst_writes_once() {
    let mut app = app(MemoryStorage::new());
    app.on_dom_content_loaded(0);

    app.on_scroll(1_000, 100.0);
    app.on_scroll(1_200, 200.0);
    app.on_scroll(1_400, 300.0);
    assert!(app.is_scroll_save_pending());
    assert_eq!(app.next_deadline(), Some(1_900));

    app.advance_to(1_899);
    assert!(app.store().get_item("scrollPos_b1_c1").unwrap().is_none());
    app.advance_to(1_900);
    assert_eq!(app.store().get_item("scrollPos_b1_c1").unwrap().as_deref(), Some("300"));
}

#[test]
fn test_deferred_restore_runs_once_on_load() {
    let mut store = MemoryStorage::new();
    store.set_item("scrollPos_b1_c1", "640").unwrap();
    let mut app = app(store);

    app.on_dom_content_loaded(0);
    assert!(app.document().scroll_requests().is_empty());
    app.on_load(30);
    app.on_load(40);
    assert_eq!(app.document().scroll_requests().len(), 1);
    assert_eq!(app.document().ready_state(), ReadyState::Complete);

    let script = app
        .take_patches()
        .iter()
        .map(DomPatch::to_script)
        .collect::<Vec<_>>()
        .join("\n");
    assert!(script.contains("window.scrollTo({top:640,left:0,behavior:\"smooth\"});"));
}

#[test]
fn test_toggle_nav_lays_out_after_delay() {
    let mut app = app(MemoryStorage::new());
    app.take_patches();

    assert!(app.toggle_nav(500));
    assert!(app.document().has_body_class("nav-open"));
    assert_eq!(app.next_deadline(), Some(510));

    app.document_mut().set_nav_left_height(220);
    app.advance_to(510);
    assert_eq!(app.document().nav_right().unwrap().style("top"), Some("calc(100% + 220px)"));

    assert!(!app.toggle_nav(600));
    assert!(!app.document().has_body_class("nav-open"));
}

#[test]
fn test_resize_repositions_nav() {
    let mut app = app(MemoryStorage::new());
    app.document_mut().set_nav_left_height(75);
    app.on_resize(10, 640.0);
    assert_eq!(app.document().viewport().inner_height, 640.0);
    assert_eq!(app.document().nav_right().unwrap().style("top"), Some("calc(100% + 75px)"));
}

#[test]
fn test_font_adjustment_survives_new_session() {
    let mut app = app(MemoryStorage::new());
    app.on_dom_content_loaded(0);
    app.adjust_font(5.0);
    assert_eq!(app.style().font_size, 21.0);

    let mut next = ReaderApp::new(app.into_store(), page(), ChapterContext::new("b1", "c2"), TimingSettings::default());
    assert_eq!(next.style().font_size, 21.0);
    next.on_dom_content_loaded(0);
    assert_eq!(next.document().content().unwrap().style("fontSize"), Some("21px"));
}

#[test]
fn test_dark_toggle_persists() {
    let mut app = app(MemoryStorage::new());
    app.on_dom_content_loaded(0);
    assert_eq!(app.toggle_dark(), ThemeMode::Dark);
    assert_eq!(app.store().get_item("darkMode").unwrap().as_deref(), Some("true"));
    assert_eq!(app.toggle_dark(), ThemeMode::Light);
    assert_eq!(app.store().get_item("darkMode").unwrap().as_deref(), Some("false"));
}

#[test]
fn test_click_routing_through_app() {
    let mut app = app(MemoryStorage::new());
    app.on_dom_content_loaded(0);

    let toggle = ClickTarget::new(["dropdown-toggle", "chapter-dropdown"]);
    assert!(app.on_click(10, &toggle));
    assert_eq!(app.dropdown_state(), DropdownState::Open);

    assert!(!app.on_click(20, &ClickTarget::new(["content"])));
    assert_eq!(app.dropdown_state(), DropdownState::Closed);
    assert_eq!(app.toggle_chapter_dropdown(), Some(DropdownState::Open));
}

#[test]
fn test_missing_context_skips_scroll_records() {
    let mut store = MemoryStorage::new();
    store.set_item("scrollPos_b1_c1", "500").unwrap();
    let doc = page().with_ready_state(ReadyState::Complete);
    let mut app = ReaderApp::new(store, doc, ChapterContext::none(), TimingSettings::default());

    app.on_dom_content_loaded(0);
    assert!(app.document().scroll_requests().is_empty());
    app.on_scroll(10, 900.0);
    app.advance_to(5_000);
    assert_eq!(app.store().len(), 1);
    // Progress still works without identifiers.
    assert_eq!(app.document().progress_text(), Some("45%"));
}

#[test]
fn test_missing_content_keeps_styles_untouched() {
    let mut app = ReaderApp::new(
        MemoryStorage::new(),
        page().without_content(),
        ChapterContext::new("b1", "c1"),
        TimingSettings::default(),
    );
    app.on_dom_content_loaded(0);
    app.adjust_font(2.0);
    assert!(app.store().get_item("fontSize").unwrap().is_none());
    assert!(!app
        .take_patches()
        .iter()
        .any(|p| matches!(p, DomPatch::SetStyle { target: ElementRef::Content, .. })));
}

#[test]
fn test_open_page_switches_chapter() {
    let mut app = app(MemoryStorage::new());
    app.on_scroll(0, 120.0);
    app.advance_to(500);

    app.open_page(page(), ChapterContext::new("b1", "c2"));
    assert_eq!(app.context().chapter_id.as_deref(), Some("c2"));
    app.on_scroll(1_000, 80.0);
    app.advance_to(1_500);
    assert_eq!(app.store().get_item("scrollPos_b1_c1").unwrap().as_deref(), Some("120"));
    assert_eq!(app.store().get_item("scrollPos_b1_c2").unwrap().as_deref(), Some("80"));
}

#[test]
fn test_open_with_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("reader.db");
    let db_path = db_path.to_str().unwrap();
    let config = ReaderConfig::default();

    let mut app = ReaderApp::open(&config, db_path, page(), ChapterContext::new("b1", "c1")).unwrap();
    app.adjust_line(0.2);
    app.on_scroll(0, 250.0);
    app.advance_to(500);
    drop(app);

    let app: ReaderApp<SqliteStorage> =
        ReaderApp::open(&config, db_path, page(), ChapterContext::new("b1", "c1")).unwrap();
    assert_eq!(app.style().line_height, 2.0);
    assert_eq!(app.store().get_item("scrollPos_b1_c1").unwrap().as_deref(), Some("250"));
}
