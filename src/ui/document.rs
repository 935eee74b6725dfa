//! Headless model of the reader page.
//!
//! Every designated element is optional; operations against a missing
//! element report `false` and change nothing. Each successful mutation is
//! also recorded as a [`DomPatch`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::patch::{DomPatch, ElementRef, ScrollBehavior};

/// Class on the dropdown's bounding element.
pub const DROPDOWN_CLASS: &str = "chapter-dropdown";
/// Class on the button that opens the dropdown.
pub const DROPDOWN_TOGGLE_CLASS: &str = "dropdown-toggle";

/// Loading phase of the page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// Scroll geometry in CSS pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub inner_height: f64,
    /// Full height of the document body.
    pub scroll_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            inner_height: 800.0,
            scroll_height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledElement {
    style: BTreeMap<String, String>,
}

impl StyledElement {
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dropdown {
    pub menu: Option<StyledElement>,
    pub has_toggle: bool,
}

/// A smooth-scroll request issued by the page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub left: f64,
    pub behavior: ScrollBehavior,
}

/// The node a click landed on, as the list of classes/ids from the target
/// up to the root (the event's composed path).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClickTarget {
    pub path: Vec<String>,
}

impl ClickTarget {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the click happened inside an element carrying `class`.
    pub fn is_within(&self, class: &str) -> bool {
        self.path.iter().any(|p| p == class)
    }
}

/// Which elements a page contains, plus its initial geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageLayout {
    pub content: bool,
    pub progress_display: bool,
    pub dropdown: bool,
    pub dropdown_menu: bool,
    pub dropdown_toggle: bool,
    pub nav_left_height: Option<u32>,
    pub nav_right: bool,
    pub font_select: bool,
    pub viewport: Viewport,
    pub ready_state: ReadyState,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            content: true,
            progress_display: true,
            dropdown: true,
            dropdown_menu: true,
            dropdown_toggle: true,
            nav_left_height: Some(0),
            nav_right: true,
            font_select: true,
            viewport: Viewport::default(),
            ready_state: ReadyState::Interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    ready_state: ReadyState,
    viewport: Viewport,
    body_classes: BTreeSet<String>,
    content: Option<StyledElement>,
    progress_display: Option<String>,
    dropdown: Option<Dropdown>,
    nav_left_height: Option<u32>,
    nav_right: Option<StyledElement>,
    font_select: Option<String>,
    scroll_requests: Vec<ScrollRequest>,
    patches: Vec<DomPatch>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A loading page with none of the designated elements.
    pub fn new() -> Self {
        Self {
            ready_state: ReadyState::Loading,
            viewport: Viewport::default(),
            body_classes: BTreeSet::new(),
            content: None,
            progress_display: None,
            dropdown: None,
            nav_left_height: None,
            nav_right: None,
            font_select: None,
            scroll_requests: Vec::new(),
            patches: Vec::new(),
        }
    }

    /// A fully populated reader page.
    pub fn reader_page() -> Self {
        Self::from_layout(&PageLayout::default())
    }

    pub fn from_layout(layout: &PageLayout) -> Self {
        let mut doc = Self::new();
        doc.ready_state = layout.ready_state;
        doc.viewport = layout.viewport;
        doc.content = layout.content.then(StyledElement::default);
        doc.progress_display = layout.progress_display.then(String::new);
        doc.dropdown = layout.dropdown.then(|| Dropdown {
            menu: layout.dropdown_menu.then(StyledElement::default),
            has_toggle: layout.dropdown_toggle,
        });
        doc.nav_left_height = layout.nav_left_height;
        doc.nav_right = layout.nav_right.then(StyledElement::default);
        doc.font_select = layout.font_select.then(String::new);
        doc
    }

    pub fn with_ready_state(mut self, state: ReadyState) -> Self {
        self.ready_state = state;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn without_content(mut self) -> Self {
        self.content = None;
        self
    }

    pub fn without_dropdown(mut self) -> Self {
        self.dropdown = None;
        self
    }

    pub fn with_nav_left_height(mut self, height: Option<u32>) -> Self {
        self.nav_left_height = height;
        self
    }

    // --- lifecycle & geometry ---

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y;
    }

    pub fn set_inner_height(&mut self, inner_height: f64) {
        self.viewport.inner_height = inner_height;
    }

    pub fn set_scroll_height(&mut self, scroll_height: f64) {
        self.viewport.scroll_height = scroll_height;
    }

    pub fn set_nav_left_height(&mut self, height: u32) {
        if self.nav_left_height.is_some() {
            self.nav_left_height = Some(height);
        }
    }

    // --- body classes ---

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn set_body_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.body_classes.insert(class.to_string());
        } else {
            self.body_classes.remove(class);
        }
        self.patches.push(DomPatch::SetClass {
            target: ElementRef::Body,
            class: class.to_string(),
            enabled,
        });
    }

    /// Flips `class` on the body and returns whether it is now present.
    pub fn toggle_body_class(&mut self, class: &str) -> bool {
        let enabled = !self.has_body_class(class);
        self.set_body_class(class, enabled);
        enabled
    }

    // --- content container ---

    pub fn content(&self) -> Option<&StyledElement> {
        self.content.as_ref()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn set_content_style(&mut self, property: &str, value: &str) -> bool {
        set_style(&mut self.content, ElementRef::Content, property, value, &mut self.patches)
    }

    // --- progress display ---

    pub fn progress_text(&self) -> Option<&str> {
        self.progress_display.as_deref()
    }

    pub fn set_progress_text(&mut self, text: &str) -> bool {
        match self.progress_display.as_mut() {
            Some(current) => {
                *current = text.to_string();
                self.patches.push(DomPatch::SetText {
                    target: ElementRef::ProgressDisplay,
                    text: text.to_string(),
                });
                true
            }
            None => false,
        }
    }

    // --- dropdown ---

    pub fn has_dropdown(&self) -> bool {
        self.dropdown.is_some()
    }

    pub fn has_dropdown_toggle(&self) -> bool {
        self.dropdown.as_ref().map_or(false, |d| d.has_toggle)
    }

    pub fn has_dropdown_menu(&self) -> bool {
        self.dropdown.as_ref().map_or(false, |d| d.menu.is_some())
    }

    /// Inline `display` of the dropdown menu (`""` when never set).
    pub fn dropdown_menu_display(&self) -> Option<&str> {
        let menu = self.dropdown.as_ref()?.menu.as_ref()?;
        Some(menu.style("display").unwrap_or(""))
    }

    pub fn set_dropdown_menu_display(&mut self, value: &str) -> bool {
        let menu = self.dropdown.as_mut().and_then(|d| d.menu.as_mut());
        match menu {
            Some(menu) => {
                menu.style.insert("display".to_string(), value.to_string());
                self.patches.push(DomPatch::SetStyle {
                    target: ElementRef::DropdownMenu,
                    property: "display".to_string(),
                    value: value.to_string(),
                });
                true
            }
            None => false,
        }
    }

    // --- navigation ---

    pub fn nav_left_height(&self) -> Option<u32> {
        self.nav_left_height
    }

    pub fn nav_right(&self) -> Option<&StyledElement> {
        self.nav_right.as_ref()
    }

    pub fn set_nav_right_style(&mut self, property: &str, value: &str) -> bool {
        set_style(&mut self.nav_right, ElementRef::NavRight, property, value, &mut self.patches)
    }

    // --- font selector ---

    pub fn font_select_value(&self) -> Option<&str> {
        self.font_select.as_deref()
    }

    pub fn set_font_select_value(&mut self, value: &str) -> bool {
        match self.font_select.as_mut() {
            Some(current) => {
                *current = value.to_string();
                self.patches.push(DomPatch::SetSelectValue {
                    target: ElementRef::FontSelect,
                    value: value.to_string(),
                });
                true
            }
            None => false,
        }
    }

    // --- scrolling ---

    /// Requests a smooth scroll to `top`, horizontal offset 0. The host
    /// reports the resulting position back through scroll events.
    pub fn scroll_to(&mut self, top: f64) {
        let request = ScrollRequest {
            top,
            left: 0.0,
            behavior: ScrollBehavior::Smooth,
        };
        self.scroll_requests.push(request);
        self.patches.push(DomPatch::ScrollTo {
            top: request.top,
            left: request.left,
            behavior: request.behavior,
        });
    }

    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    pub fn last_scroll_request(&self) -> Option<&ScrollRequest> {
        self.scroll_requests.last()
    }

    // --- patches ---

    pub fn patches(&self) -> &[DomPatch] {
        &self.patches
    }

    pub fn take_patches(&mut self) -> Vec<DomPatch> {
        std::mem::take(&mut self.patches)
    }
}

fn set_style(
    element: &mut Option<StyledElement>,
    target: ElementRef,
    property: &str,
    value: &str,
    patches: &mut Vec<DomPatch>,
) -> bool {
    match element.as_mut() {
        Some(el) => {
            el.style.insert(property.to_string(), value.to_string());
            patches.push(DomPatch::SetStyle {
                target,
                property: property.to_string(),
                value: value.to_string(),
            });
            true
        }
        None => false,
    }
}
