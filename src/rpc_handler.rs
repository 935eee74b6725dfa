//! RPC method handler for the chapter reader's JSON protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested. Every method
//! that can touch the page answers with the patches it produced and their
//! JavaScript rendering.

use serde_json::{json, Map, Value};

use crate::app::ReaderApp;
use crate::managers::dropdown_manager::DropdownState;
use crate::managers::storage_manager::StorageManagerTrait;
use crate::services::reading_progress::format_progress;
use crate::services::scheduler::Millis;
use crate::types::chapter::ChapterContext;
use crate::ui::document::{ClickTarget, Document, PageLayout};
use crate::ui::patch::render_script;

fn f64_param(params: &Value, name: &str) -> Result<f64, String> {
    params
        .get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| format!("missing {}", name))
}

fn opt_f64_param(params: &Value, name: &str) -> Option<f64> {
    params.get(name).and_then(Value::as_f64)
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing {}", name))
}

fn dropdown_state_json(state: Option<DropdownState>) -> Value {
    match state {
        Some(DropdownState::Open) => json!("open"),
        Some(DropdownState::Closed) => json!("closed"),
        None => Value::Null,
    }
}

/// Attaches the drained patches (and their script) to `result`.
fn with_patches<S: StorageManagerTrait>(app: &mut ReaderApp<S>, result: Value) -> Value {
    let patches = app.take_patches();
    let mut obj = match result {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    };
    obj.insert("script".to_string(), json!(render_script(&patches)));
    obj.insert("patches".to_string(), json!(patches));
    Value::Object(obj)
}

/// Dispatch one method call at host time `now`.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method<S: StorageManagerTrait>(
    app: &mut ReaderApp<S>,
    method: &str,
    params: &Value,
    now: Millis,
) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Page lifecycle ───
        "page.open" => {
            let context = ChapterContext {
                book_id: params.get("book_id").and_then(Value::as_str).map(String::from),
                chapter_id: params.get("chapter_id").and_then(Value::as_str).map(String::from),
            };
            let layout: PageLayout = match params.get("layout") {
                Some(v) => serde_json::from_value(v.clone()).map_err(|e| format!("invalid layout: {}", e))?,
                None => PageLayout::default(),
            };
            app.open_page(Document::from_layout(&layout), context);
            app.advance_to(now);
            let result = json!({"scroll_tracking": app.context().is_complete()});
            Ok(with_patches(app, result))
        }
        "page.dom_content_loaded" => {
            app.on_dom_content_loaded(now);
            Ok(with_patches(app, Value::Null))
        }
        "page.load" => {
            app.on_load(now);
            Ok(with_patches(app, Value::Null))
        }
        "page.resize" => {
            let inner_height = f64_param(params, "inner_height")?;
            if let Some(h) = opt_f64_param(params, "scroll_height") {
                app.document_mut().set_scroll_height(h);
            }
            if let Some(h) = params.get("nav_left_height").and_then(Value::as_u64) {
                app.document_mut().set_nav_left_height(h as u32);
            }
            app.on_resize(now, inner_height);
            Ok(with_patches(app, Value::Null))
        }
        "page.scroll" => {
            let scroll_y = f64_param(params, "scroll_y")?;
            if let Some(h) = opt_f64_param(params, "scroll_height") {
                app.document_mut().set_scroll_height(h);
            }
            if let Some(h) = opt_f64_param(params, "inner_height") {
                app.document_mut().set_inner_height(h);
            }
            app.on_scroll(now, scroll_y);
            Ok(with_patches(app, Value::Null))
        }
        "page.click" => {
            let path = params
                .get("path")
                .and_then(Value::as_array)
                .ok_or("missing path")?;
            let target = ClickTarget::new(path.iter().filter_map(Value::as_str));
            let stopped = app.on_click(now, &target);
            Ok(with_patches(app, json!({"propagation_stopped": stopped})))
        }
        "nav.toggle" => {
            let open = app.toggle_nav(now);
            Ok(with_patches(app, json!({"open": open})))
        }

        // ─── Typography ───
        "style.get" => serde_json::to_value(app.style()).map_err(|e| e.to_string()),
        "style.adjust_font" => {
            let delta = f64_param(params, "delta")?;
            app.advance_to(now);
            app.adjust_font(delta);
            let result = json!({"font_size": app.style().font_size});
            Ok(with_patches(app, result))
        }
        "style.adjust_line" => {
            let delta = f64_param(params, "delta")?;
            app.advance_to(now);
            app.adjust_line(delta);
            let result = json!({"line_height": app.style().line_height});
            Ok(with_patches(app, result))
        }
        "style.adjust_letter_spacing" => {
            let delta = f64_param(params, "delta")?;
            app.advance_to(now);
            app.adjust_letter_spacing(delta);
            let result = json!({"letter_spacing": app.style().letter_spacing});
            Ok(with_patches(app, result))
        }
        "style.font_family" => {
            let name = str_param(params, "name")?;
            app.advance_to(now);
            app.change_font_family(name);
            let result = json!({"font_family": app.style().font_family});
            Ok(with_patches(app, result))
        }
        "style.reset" => {
            app.advance_to(now);
            app.reset_style();
            Ok(with_patches(app, Value::Null))
        }

        // ─── Theme, scroll record, dropdown ───
        "theme.toggle_dark" => {
            app.advance_to(now);
            let mode = app.toggle_dark();
            Ok(with_patches(app, json!({"theme": mode})))
        }
        "scroll.clear" => {
            app.advance_to(now);
            let cleared = app.clear_scroll_position();
            Ok(with_patches(app, json!({"cleared": cleared})))
        }
        "dropdown.toggle" => {
            app.advance_to(now);
            let state = app.toggle_chapter_dropdown();
            Ok(with_patches(app, json!({"state": dropdown_state_json(state)})))
        }
        "progress.get" => {
            let progress = app.reading_progress();
            Ok(json!({"progress": progress, "text": format_progress(progress)}))
        }
        "timers.advance" => {
            let fired = app.advance_to(now);
            let result = json!({"fired": fired, "next_deadline": app.next_deadline()});
            Ok(with_patches(app, result))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
