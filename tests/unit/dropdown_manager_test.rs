//! Unit tests for the chapter dropdown state machine.

use rstest::rstest;

use chapter_reader::managers::dropdown_manager::{DropdownManager, DropdownManagerTrait, DropdownState};
use chapter_reader::ui::document::{ClickTarget, Document, PageLayout};

fn toggle_click() -> ClickTarget {
    ClickTarget::new(["dropdown-toggle", "chapter-dropdown", "nav-left", "body"])
}

fn menu_click() -> ClickTarget {
    ClickTarget::new(["chapter-link", "dropdown-menu", "chapter-dropdown", "body"])
}

fn outside_click() -> ClickTarget {
    ClickTarget::new(["content", "body"])
}

fn attached() -> (DropdownManager, Document) {
    let doc = Document::reader_page();
    let mut dropdown = DropdownManager::new();
    assert!(dropdown.attach(&doc));
    (dropdown, doc)
}

#[test]
fn test_starts_closed() {
    let (dropdown, doc) = attached();
    assert_eq!(dropdown.state(&doc), DropdownState::Closed);
    assert_eq!(doc.dropdown_menu_display(), Some(""));
}

#[test]
fn test_toggle_click_opens_and_stops_propagation() {
    let (mut dropdown, mut doc) = attached();
    assert!(dropdown.handle_click(&mut doc, &toggle_click()));
    assert_eq!(dropdown.state(&doc), DropdownState::Open);
    assert_eq!(doc.dropdown_menu_display(), Some("block"));

    assert!(dropdown.handle_click(&mut doc, &toggle_click()));
    assert_eq!(dropdown.state(&doc), DropdownState::Closed);
    assert_eq!(doc.dropdown_menu_display(), Some("none"));
}

#[test]
fn test_outside_click_closes() {
    let (mut dropdown, mut doc) = attached();
    dropdown.toggle(&mut doc);
    assert!(!dropdown.handle_click(&mut doc, &outside_click()));
    assert_eq!(dropdown.state(&doc), DropdownState::Closed);
}

#[test]
fn test_inside_click_keeps_open() {
    let (mut dropdown, mut doc) = attached();
    dropdown.toggle(&mut doc);
    assert!(!dropdown.handle_click(&mut doc, &menu_click()));
    assert_eq!(dropdown.state(&doc), DropdownState::Open);
}

#[test]
fn test_outside_click_when_closed_is_idempotent() {
    let (mut dropdown, mut doc) = attached();
    dropdown.handle_click(&mut doc, &outside_click());
    dropdown.handle_click(&mut doc, &outside_click());
    assert_eq!(dropdown.state(&doc), DropdownState::Closed);
    assert_eq!(doc.dropdown_menu_display(), Some("none"));
}

#[test]
fn test_toggle_ignored_before_listener_attached() {
    let mut doc = Document::reader_page();
    let mut dropdown = DropdownManager::new();
    assert!(!dropdown.is_attached());
    // Lands inside the dropdown, so the global handler leaves it alone.
    assert!(!dropdown.handle_click(&mut doc, &toggle_click()));
    assert_eq!(dropdown.state(&doc), DropdownState::Closed);
}

#[test]
fn test_no_toggle_button_means_no_listener() {
    let layout = PageLayout {
        dropdown_toggle: false,
        ..PageLayout::default()
    };
    let doc = Document::from_layout(&layout);
    let mut dropdown = DropdownManager::new();
    assert!(!dropdown.attach(&doc));
}

#[rstest]
#[case::no_dropdown(Document::reader_page().without_dropdown())]
#[case::no_menu(Document::from_layout(&PageLayout { dropdown_menu: false, ..PageLayout::default() }))]
fn test_missing_elements_are_noops(#[case] doc: Document) {
    let mut doc = doc;
    let mut dropdown = DropdownManager::new();
    dropdown.attach(&doc);
    assert_eq!(dropdown.toggle(&mut doc), None);
    dropdown.handle_click(&mut doc, &outside_click());
    assert_eq!(dropdown.state(&doc), DropdownState::Closed);
    assert!(doc.patches().is_empty());
}
