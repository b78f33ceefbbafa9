use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::popup::{PopupDecision, PopupRequest};

/// Creation options for a single surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceOptions {
    pub user_agent: Option<String>,
    pub devtools: bool,
    pub transparent: bool,
    pub autoplay: bool,
    pub clipboard: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            devtools: cfg!(debug_assertions),
            transparent: false,
            autoplay: true,
            clipboard: true,
        }
    }
}

/// Replacement for the built-in popup interception policy.
#[derive(Clone)]
pub struct PopupOverride(Arc<dyn Fn(&PopupRequest) -> PopupDecision + Send + Sync>);

impl PopupOverride {
    pub fn new(f: impl Fn(&PopupRequest) -> PopupDecision + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn decide(&self, request: &PopupRequest) -> PopupDecision {
        (self.0)(request)
    }
}

impl fmt::Debug for PopupOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PopupOverride(..)")
    }
}

/// Options accepted when the shell is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellOptions {
    /// Initial window width.
    pub width: u32,
    /// Initial window height.
    pub height: u32,
    /// Height of the fixed control band at the top of the window.
    pub control_height: u32,
    /// URL the control surface is loaded from.
    pub control_panel: String,
    /// URL of the first tab, opened when the control surface reports ready.
    pub start_page: String,
    /// URL loaded by tabs opened without one.
    pub blank_page: String,
    /// Title given to every freshly created tab.
    pub blank_title: String,
    /// Open developer tools for the control surface and every tab.
    pub debug: bool,
    pub control_surface: SurfaceOptions,
    pub surface_defaults: SurfaceOptions,
    #[serde(skip)]
    pub popup_override: Option<PopupOverride>,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 800,
            control_height: 130,
            control_panel: "tabshell://localhost/control".to_string(),
            start_page: String::new(),
            blank_page: "about:blank".to_string(),
            blank_title: "about:blank".to_string(),
            debug: false,
            control_surface: SurfaceOptions::default(),
            surface_defaults: SurfaceOptions::default(),
            popup_override: None,
        }
    }
}

// The popup override is a closure and takes no part in equality.
impl PartialEq for ShellOptions {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.control_height == other.control_height
            && self.control_panel == other.control_panel
            && self.start_page == other.start_page
            && self.blank_page == other.blank_page
            && self.blank_title == other.blank_title
            && self.debug == other.debug
            && self.control_surface == other.control_surface
            && self.surface_defaults == other.surface_defaults
    }
}
