//! Chapter dropdown: a two-state (closed/open) menu.
//!
//! The state lives in the menu's inline `display` style, exactly where the
//! page keeps it, so a host-side change is never out of sync with ours.

use crate::ui::document::{ClickTarget, Document, DROPDOWN_CLASS, DROPDOWN_TOGGLE_CLASS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownState {
    Closed,
    Open,
}

/// Trait defining dropdown transitions.
pub trait DropdownManagerTrait {
    fn state(&self, doc: &Document) -> DropdownState;
    fn toggle(&mut self, doc: &mut Document) -> Option<DropdownState>;
    fn handle_click(&mut self, doc: &mut Document, target: &ClickTarget) -> bool;
}

/// Tracks whether the toggle's click listener is installed.
#[derive(Debug, Default)]
pub struct DropdownManager {
    toggle_listener: bool,
}

impl DropdownManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the toggle listener if the page has a toggle button.
    pub fn attach(&mut self, doc: &Document) -> bool {
        self.toggle_listener = doc.has_dropdown_toggle();
        self.toggle_listener
    }

    pub fn is_attached(&self) -> bool {
        self.toggle_listener
    }

    /// Closes the menu when the click landed outside the dropdown. Idempotent.
    pub fn close_if_outside(&mut self, doc: &mut Document, target: &ClickTarget) -> bool {
        if !doc.has_dropdown() || target.is_within(DROPDOWN_CLASS) {
            return false;
        }
        if doc.has_dropdown_menu() {
            doc.set_dropdown_menu_display("none");
        }
        true
    }
}

impl DropdownManagerTrait for DropdownManager {
    fn state(&self, doc: &Document) -> DropdownState {
        match doc.dropdown_menu_display() {
            Some("block") => DropdownState::Open,
            _ => DropdownState::Closed,
        }
    }

    /// Flips the menu between `block` and `none`. `None` when there is no menu.
    fn toggle(&mut self, doc: &mut Document) -> Option<DropdownState> {
        let next = match doc.dropdown_menu_display()? {
            "block" => ("none", DropdownState::Closed),
            _ => ("block", DropdownState::Open),
        };
        doc.set_dropdown_menu_display(next.0);
        Some(next.1)
    }

    /// Dispatches a page click. A click on the toggle (when its listener is
    /// installed) toggles the menu and stops propagation, so the global
    /// outside-click handler does not see it. Returns whether propagation was stopped.
    fn handle_click(&mut self, doc: &mut Document, target: &ClickTarget) -> bool {
        if self.toggle_listener && target.is_within(DROPDOWN_TOGGLE_CLASS) {
            self.toggle(doc);
            return true;
        }
        self.close_if_outside(doc, target);
        false
    }
}
