//! Control-channel command dispatch.
//!
//! Every command carries the id of the surface that sent it. Only the
//! registered control surface may drive the multiplexer; anything else is
//! dropped before dispatch. Failures are logged and never reported back, the
//! control surface only ever observes state pushes.

use tracing::{debug, error, warn};

use crate::managers::tab_multiplexer::{TabMultiplexer, TabMultiplexerTrait};
use crate::surface::{ControlSurface, SurfaceFactory};
use crate::types::message::ControlCommand;
use crate::types::tab::{SurfaceId, TabMetadata};

/// Dispatch one command from `sender`.
///
/// Returns `false` when the command was dropped: unauthorized sender or a
/// host window that is already closed.
pub fn handle_command<F, C>(
    mux: &mut TabMultiplexer<F, C>,
    sender: SurfaceId,
    command: ControlCommand,
) -> bool
where
    F: SurfaceFactory,
    C: ControlSurface,
{
    if sender != mux.control_id() {
        warn!(
            sender = %sender,
            channel = command.channel(),
            "command from unregistered surface dropped"
        );
        return false;
    }
    if mux.is_closed() {
        debug!(channel = command.channel(), "command after shutdown dropped");
        return false;
    }
    debug!(channel = command.channel(), "control command");

    match command {
        ControlCommand::ControlReady => mux.control_ready(),
        ControlCommand::UrlChange { url } => {
            if let Some(active) = mux.active_tab() {
                mux.update_tab_config(active, TabMetadata::url(url));
            }
        }
        ControlCommand::UrlEnter { url } => {
            if let Some(active) = mux.active_tab() {
                mux.navigate(active, &url);
            }
        }
        ControlCommand::Act { action } => mux.act(&action),
        ControlCommand::NewTab { url, options } => {
            if let Err(e) = mux.create_tab(url.as_deref(), None, options.as_ref()) {
                error!(error = %e, "new-tab failed");
            }
        }
        ControlCommand::SwitchTab { tab_id } => mux.switch_to(tab_id),
        ControlCommand::CloseTab { tab_id } => mux.close_tab(tab_id),
    }
    true
}

/// Parse a raw JSON message body and dispatch it.
///
/// Malformed bodies are logged and dropped.
pub fn handle_message<F, C>(mux: &mut TabMultiplexer<F, C>, sender: SurfaceId, body: &str) -> bool
where
    F: SurfaceFactory,
    C: ControlSurface,
{
    match serde_json::from_str::<ControlCommand>(body) {
        Ok(command) => handle_command(mux, sender, command),
        Err(e) => {
            warn!(sender = %sender, body_len = body.len(), error = %e, "malformed control message");
            false
        }
    }
}
