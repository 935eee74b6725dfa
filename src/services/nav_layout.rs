//! Navigation layout: keeps `.nav-right` directly below `.nav-left`.

use crate::ui::document::Document;

/// Body class set while the navigation panel is open.
pub const NAV_OPEN_CLASS: &str = "nav-open";

/// `top` value placing the dependent element `height` px below its normal position.
pub fn nav_right_top(height: u32) -> String {
    format!("calc(100% + {}px)", height)
}

/// Repositions nav-right from nav-left's measured height. No-op when
/// either element is missing.
pub fn update_nav_right_position(doc: &mut Document) -> bool {
    let Some(height) = doc.nav_left_height() else {
        return false;
    };
    if doc.nav_right().is_none() {
        return false;
    }
    doc.set_nav_right_style("top", &nav_right_top(height))
}
