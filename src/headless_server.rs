//! Tabshell headless driver: the control channel over stdin/stdout.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Input:  {"kind":"new-tab","payload":{"url":"https://example.com"}}
//!         An optional numeric "sender" field impersonates another surface id;
//!         such commands are dropped unless it matches the control surface (0).
//!         A "sender" that is not a u32 drops the whole line.
//!         {"kind":"window-resize","payload":{"width":1280,"height":720}} resizes
//!         the simulated host window.
//! Output: every push to the control surface, e.g.
//!         {"kind":"active-update","payload":1}
//!
//! Content surfaces are in-memory: loads complete immediately and history is
//! tracked, so navigation actions behave like a real engine's.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};
use tracing::warn;

use tabshell::command_handler::handle_command;
use tabshell::managers::tab_multiplexer::{TabMultiplexer, TabMultiplexerTrait};
use tabshell::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use tabshell::surface::memory::MemorySurfaceFactory;
use tabshell::surface::ControlSurface;
use tabshell::types::geometry::{Bounds, Size};
use tabshell::types::message::{ControlCommand, ShellMessage};
use tabshell::types::tab::SurfaceId;

const CONTROL_ID: SurfaceId = SurfaceId(0);

/// Control surface that writes each push to stdout as one JSON line.
struct StdoutControlSurface;

impl ControlSurface for StdoutControlSurface {
    fn id(&self) -> SurfaceId {
        CONTROL_ID
    }

    fn post(&mut self, message: &ShellMessage) {
        match serde_json::to_string(message) {
            Ok(line) => emit_line(&line),
            Err(e) => warn!(error = %e, "failed to serialize push"),
        }
    }

    fn set_bounds(&mut self, _bounds: Bounds) {}

    fn open_devtools(&mut self) {}

    fn destroy(&mut self) {}
}

fn emit_line(line: &str) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", line);
    let _ = stdout.flush();
}

/// Take the optional `sender` field off a request.
///
/// Absent means the control surface. A present value must be a `u32`; anything
/// else yields `None` and the line must be dropped.
fn parse_sender(request: &mut Value) -> Option<SurfaceId> {
    let Some(raw) = request.as_object_mut().and_then(|obj| obj.remove("sender")) else {
        return Some(CONTROL_ID);
    };
    raw.as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .map(SurfaceId)
}

fn main() {
    tabshell::logging::init("tabshell=info");

    let mut config = ConfigEngine::new(None);
    if let Err(e) = config.load() {
        warn!(error = %e, path = config.config_path(), "using default options");
    }
    let options = config.into_options();

    let mut mux = TabMultiplexer::new(options, MemorySurfaceFactory::new(1), StdoutControlSurface);

    let ready = json!({"kind": "host-ready", "payload": {"version": env!("CARGO_PKG_VERSION")}});
    emit_line(&ready.to_string());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let mut request: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "parse error");
                continue;
            }
        };

        let Some(sender) = parse_sender(&mut request) else {
            warn!("invalid sender field, line dropped");
            continue;
        };

        if request.get("kind").and_then(|k| k.as_str()) == Some("window-resize") {
            match serde_json::from_value::<Size>(request["payload"].clone()) {
                Ok(size) => mux.resize(size),
                Err(e) => warn!(error = %e, "invalid window-resize payload"),
            }
            continue;
        }

        match serde_json::from_value::<ControlCommand>(request) {
            Ok(command) => {
                handle_command(&mut mux, sender, command);
                mux.pump_surface_events();
            }
            Err(e) => warn!(error = %e, "unknown command"),
        }
    }

    mux.shutdown();
}
