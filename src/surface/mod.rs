//! Surface abstraction.
//!
//! A content surface is one embeddable rendering unit (one tab). The control
//! surface is the single privileged surface that renders the tab strip and
//! address bar. The multiplexer only talks to both through these traits, so the
//! platform backend (`ui`, wry) and the in-memory backend (`memory`) are
//! interchangeable.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::types::errors::ShellError;
use crate::types::geometry::Bounds;
use crate::types::message::ShellMessage;
use crate::types::options::SurfaceOptions;
use crate::types::popup::PopupRequest;
use crate::types::tab::SurfaceId;

pub mod memory;

/// Lifecycle events emitted by a content surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    LoadStarted,
    NavigationStarted { href: String, main_frame: bool },
    Redirected { href: String },
    TitleChanged(String),
    /// Candidate icon URLs, best first.
    FaviconChanged(Vec<String>),
    LoadStopped,
    DomReady,
    NewWindowRequested(PopupRequest),
}

/// Shared sink that surfaces push events into; the multiplexer drains it.
#[derive(Debug, Clone, Default)]
pub struct SurfaceEventQueue {
    events: Arc<Mutex<Vec<(SurfaceId, SurfaceEvent)>>>,
}

impl SurfaceEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, surface: SurfaceId, event: SurfaceEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push((surface, event));
        }
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<(SurfaceId, SurfaceEvent)> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Navigation actions the control surface may invoke on the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    GoBack,
    GoForward,
    Reload,
    Stop,
}

impl FromStr for NavAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goBack" => Ok(NavAction::GoBack),
            "goForward" => Ok(NavAction::GoForward),
            "reload" => Ok(NavAction::Reload),
            "stop" => Ok(NavAction::Stop),
            other => Err(format!("unknown navigation action: {}", other)),
        }
    }
}

/// A single embeddable rendering surface.
pub trait ContentSurface {
    fn id(&self) -> SurfaceId;
    fn load_url(&mut self, url: &str);
    /// Currently committed URL, `None` while nothing has been loaded.
    fn url(&self) -> Option<String>;
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn reload(&mut self);
    fn stop(&mut self);
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn set_bounds(&mut self, bounds: Bounds);
    /// Attach (`true`) or detach (`false`) the surface from the host window.
    fn set_visible(&mut self, visible: bool);
    fn focus(&mut self);
    fn open_devtools(&mut self);
    /// Route this surface's lifecycle events into `queue`. Every call adds a
    /// listener, so callers must bind once per surface.
    fn bind_events(&mut self, queue: SurfaceEventQueue);
    fn destroy(&mut self);
}

/// Allocates content surfaces.
pub trait SurfaceFactory {
    type Surface: ContentSurface;

    fn create(&mut self, options: &SurfaceOptions) -> Result<Self::Surface, ShellError>;
}

/// The single privileged surface receiving state pushes.
pub trait ControlSurface {
    fn id(&self) -> SurfaceId;
    fn post(&mut self, message: &ShellMessage);
    fn set_bounds(&mut self, bounds: Bounds);
    fn open_devtools(&mut self);
    fn destroy(&mut self);
}
