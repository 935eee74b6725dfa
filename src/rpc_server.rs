//! Chapter reader RPC server, newline-delimited JSON over stdin/stdout.
//!
//! Request:  {"id":1, "method":"page.scroll", "params":{"scroll_y":500}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Timer output (debounced saves, delayed layout passes) arrives unprompted as
//! {"event":"patches", ...}.

use std::io::{self, Write};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};

use chapter_reader::app::ReaderApp;
use chapter_reader::managers::storage_manager::StorageManagerTrait;
use chapter_reader::rpc_handler::handle_method;
use chapter_reader::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use chapter_reader::types::chapter::ChapterContext;
use chapter_reader::types::settings::ReaderConfig;
use chapter_reader::ui::document::Document;
use chapter_reader::ui::patch::render_script;

/// Points the server at a specific `settings.json`.
const CONFIG_ENV: &str = "CHAPTER_READER_CONFIG";

/// Fixed one-second window request limiter.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    fn check(&mut self) -> bool {
        if self.window_start.elapsed() >= Duration::from_secs(1) {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn emit(value: &Value) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}", value);
    let _ = out.flush();
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

fn respond<S: StorageManagerTrait>(
    app: &mut ReaderApp<S>,
    limiter: &mut RateLimiter,
    line: &str,
    now: u64,
) {
    let req: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            emit(&json!({"id": null, "error": format!("parse error: {}", e)}));
            return;
        }
    };
    let id = req.get("id").cloned().unwrap_or(Value::Null);

    if !limiter.check() {
        emit(&json!({"id": id, "error": "rate limit exceeded"}));
        return;
    }

    let method = req.get("method").and_then(Value::as_str).unwrap_or("");
    let params = req.get("params").cloned().unwrap_or_else(|| json!({}));
    log::debug!("rpc {} at {}ms", method, now);

    let response = match handle_method(app, method, &params, now) {
        Ok(result) => json!({"id": id, "result": result}),
        Err(err) => json!({"id": id, "error": err}),
    };
    emit(&response);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut settings = SettingsEngine::new(std::env::var(CONFIG_ENV).ok());
    let loaded = settings.load();
    let config = loaded.as_ref().cloned().unwrap_or_else(|_| ReaderConfig::default());

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();
    if let Err(e) = &loaded {
        log::warn!("using default configuration: {}", e);
    }

    let db_path = settings.database_path();
    let mut app = match ReaderApp::open(
        &config,
        &db_path.to_string_lossy(),
        Document::new(),
        ChapterContext::none(),
    ) {
        Ok(app) => app,
        Err(e) => {
            log::error!("failed to open store at {}: {}", db_path.display(), e);
            std::process::exit(1);
        }
    };
    log::info!("store opened at {}", db_path.display());

    let start = Instant::now();
    let elapsed_ms = || start.elapsed().as_millis() as u64;

    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));

    let mut limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = app
            .next_deadline()
            .map(|ms| start + Duration::from_millis(ms));

        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(l)) => l,
                    Ok(None) => break,
                    Err(e) => {
                        log::error!("stdin read failed: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                respond(&mut app, &mut limiter, &line, elapsed_ms());
            }
            _ = sleep_until_deadline(deadline) => {
                let fired = app.advance_to(elapsed_ms());
                let patches = app.take_patches();
                if !patches.is_empty() {
                    emit(&json!({
                        "event": "patches",
                        "fired": fired,
                        "script": render_script(&patches),
                        "patches": patches,
                    }));
                }
            }
        }
    }

    // Run outstanding timers so a pending scroll save is not lost.
    while let Some(deadline) = app.next_deadline() {
        app.advance_to(deadline);
    }
    log::info!("stdin closed, shutting down");
}
