//! Serializable record of every change made to the page.
//!
//! A host that owns a real page (a webview, a test harness) drains these and
//! replays them; [`render_script`] turns them into JavaScript for hosts that
//! can evaluate scripts.

use serde::{Deserialize, Serialize};

/// The designated page elements the reader touches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ElementRef {
    Body,
    Content,
    ProgressDisplay,
    DropdownMenu,
    NavRight,
    FontSelect,
}

impl ElementRef {
    /// CSS selector locating the element in the reader page.
    pub fn selector(&self) -> &'static str {
        match self {
            ElementRef::Body => "body",
            ElementRef::Content => "#content",
            ElementRef::ProgressDisplay => "#readingProgress",
            ElementRef::DropdownMenu => ".chapter-dropdown .dropdown-menu",
            ElementRef::NavRight => ".nav-right",
            ElementRef::FontSelect => ".controls select",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

impl ScrollBehavior {
    fn as_str(&self) -> &'static str {
        match self {
            ScrollBehavior::Auto => "auto",
            ScrollBehavior::Smooth => "smooth",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomPatch {
    SetStyle {
        target: ElementRef,
        property: String,
        value: String,
    },
    SetText {
        target: ElementRef,
        text: String,
    },
    SetClass {
        target: ElementRef,
        class: String,
        enabled: bool,
    },
    SetSelectValue {
        target: ElementRef,
        value: String,
    },
    ScrollTo {
        top: f64,
        left: f64,
        behavior: ScrollBehavior,
    },
}

/// Quotes a string as a JavaScript literal.
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

impl DomPatch {
    /// Renders the patch as a self-contained JavaScript statement that does
    /// nothing when its target is missing.
    pub fn to_script(&self) -> String {
        match self {
            DomPatch::SetStyle {
                target,
                property,
                value,
            } => format!(
                "(function(e){{if(e)e.style[{}]={};}})(document.querySelector({}));",
                js_str(property),
                js_str(value),
                js_str(target.selector())
            ),
            DomPatch::SetText { target, text } => format!(
                "(function(e){{if(e)e.textContent={};}})(document.querySelector({}));",
                js_str(text),
                js_str(target.selector())
            ),
            DomPatch::SetClass {
                target,
                class,
                enabled,
            } => format!(
                "(function(e){{if(e)e.classList.toggle({},{});}})(document.querySelector({}));",
                js_str(class),
                enabled,
                js_str(target.selector())
            ),
            DomPatch::SetSelectValue { target, value } => format!(
                "(function(e){{if(e)e.value={};}})(document.querySelector({}));",
                js_str(value),
                js_str(target.selector())
            ),
            DomPatch::ScrollTo {
                top,
                left,
                behavior,
            } => format!(
                "window.scrollTo({{top:{},left:{},behavior:{}}});",
                top,
                left,
                js_str(behavior.as_str())
            ),
        }
    }
}

/// Concatenates the scripts of `patches`, one statement per line.
pub fn render_script(patches: &[DomPatch]) -> String {
    patches
        .iter()
        .map(DomPatch::to_script)
        .collect::<Vec<_>>()
        .join("\n")
}
