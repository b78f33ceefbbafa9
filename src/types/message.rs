//! Wire vocabulary of the message channel between the shell and its control surface.
//!
//! Both directions use the same envelope, `{"kind": "...", "payload": ...}`:
//!
//! ```json
//! {"kind":"url-enter","payload":{"url":"https://example.com"}}
//! {"kind":"tabs-update","payload":{"confs":{"1":{"title":"New tab"}},"tabs":[1]}}
//! ```

use serde::{Deserialize, Serialize};

use super::options::SurfaceOptions;
use super::tab::{TabId, TabsSnapshot};

/// A command sent by the control surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum ControlCommand {
    /// The control surface finished loading and wants state pushes.
    ControlReady,
    /// Live edit of the address bar; no navigation.
    UrlChange { url: String },
    /// Navigate the active tab.
    UrlEnter { url: String },
    /// Run a named navigation action (`goBack`, `goForward`, `reload`, `stop`).
    Act { action: String },
    /// Open a new tab at the end of the tab list.
    NewTab {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        options: Option<SurfaceOptions>,
    },
    SwitchTab {
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
    CloseTab {
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
}

impl ControlCommand {
    /// Channel name as it appears on the wire, for logging.
    pub fn channel(&self) -> &'static str {
        match self {
            ControlCommand::ControlReady => "control-ready",
            ControlCommand::UrlChange { .. } => "url-change",
            ControlCommand::UrlEnter { .. } => "url-enter",
            ControlCommand::Act { .. } => "act",
            ControlCommand::NewTab { .. } => "new-tab",
            ControlCommand::SwitchTab { .. } => "switch-tab",
            ControlCommand::CloseTab { .. } => "close-tab",
        }
    }
}

/// A state push from the shell to the control surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum ShellMessage {
    /// The active tab pointer changed.
    ActiveUpdate(TabId),
    /// Full tab list and metadata mapping.
    TabsUpdate(TabsSnapshot),
}
