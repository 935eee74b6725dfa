// Chapter reader page surface
// Headless document model and the patches it emits for a rendering host.

pub mod document;
pub mod patch;

pub use document::{ClickTarget, Document, PageLayout, ReadyState, Viewport};
pub use patch::{render_script, DomPatch, ElementRef, ScrollBehavior};
