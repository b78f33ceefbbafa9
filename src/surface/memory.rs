//! In-memory surface backend.
//!
//! Surfaces keep a linear history and complete every load synchronously,
//! emitting the same event sequence a real engine reports for a successful
//! top-level load. Used by the headless driver and the test suites.

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::{ContentSurface, ControlSurface, SurfaceEvent, SurfaceEventQueue, SurfaceFactory};
use crate::types::errors::ShellError;
use crate::types::geometry::Bounds;
use crate::types::message::ShellMessage;
use crate::types::options::SurfaceOptions;
use crate::types::tab::SurfaceId;

/// A content surface without a rendering engine.
#[derive(Debug)]
pub struct MemorySurface {
    id: SurfaceId,
    options: SurfaceOptions,
    history: Vec<String>,
    index: usize,
    listeners: Vec<SurfaceEventQueue>,
    bounds: Option<Bounds>,
    visible: bool,
    focus_count: usize,
    reload_count: usize,
    stop_count: usize,
    devtools_open: bool,
    destroyed: bool,
}

impl MemorySurface {
    pub fn new(id: SurfaceId, options: SurfaceOptions) -> Self {
        Self {
            id,
            options,
            history: Vec::new(),
            index: 0,
            listeners: Vec::new(),
            bounds: None,
            visible: false,
            focus_count: 0,
            reload_count: 0,
            stop_count: 0,
            devtools_open: false,
            destroyed: false,
        }
    }

    /// Deliver `event` to every bound listener, as the engine would.
    pub fn emit(&self, event: SurfaceEvent) {
        for queue in &self.listeners {
            queue.push(self.id, event.clone());
        }
    }

    fn commit(&self, href: &str) {
        self.emit(SurfaceEvent::LoadStarted);
        self.emit(SurfaceEvent::NavigationStarted {
            href: href.to_string(),
            main_frame: true,
        });
        self.emit(SurfaceEvent::DomReady);
        self.emit(SurfaceEvent::LoadStopped);
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count
    }

    pub fn reload_count(&self) -> usize {
        self.reload_count
    }

    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    pub fn devtools_open(&self) -> bool {
        self.devtools_open
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl ContentSurface for MemorySurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn load_url(&mut self, url: &str) {
        if !self.history.is_empty() {
            self.history.truncate(self.index + 1);
        }
        self.history.push(url.to_string());
        self.index = self.history.len() - 1;
        self.commit(url);
    }

    fn url(&self) -> Option<String> {
        self.history.get(self.index).cloned()
    }

    fn go_back(&mut self) {
        if self.can_go_back() {
            self.index -= 1;
            let href = self.history[self.index].clone();
            self.commit(&href);
        }
    }

    fn go_forward(&mut self) {
        if self.can_go_forward() {
            self.index += 1;
            let href = self.history[self.index].clone();
            self.commit(&href);
        }
    }

    fn reload(&mut self) {
        self.reload_count += 1;
        self.emit(SurfaceEvent::LoadStarted);
        self.emit(SurfaceEvent::LoadStopped);
    }

    fn stop(&mut self) {
        self.stop_count += 1;
    }

    fn can_go_back(&self) -> bool {
        self.index > 0
    }

    fn can_go_forward(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn focus(&mut self) {
        self.focus_count += 1;
    }

    fn open_devtools(&mut self) {
        self.devtools_open = true;
    }

    fn bind_events(&mut self, queue: SurfaceEventQueue) {
        self.listeners.push(queue);
    }

    fn destroy(&mut self) {
        debug!(surface = %self.id, "memory surface destroyed");
        self.listeners.clear();
        self.visible = false;
        self.destroyed = true;
    }
}

/// Hands out `MemorySurface`s with monotonically increasing ids.
#[derive(Debug)]
pub struct MemorySurfaceFactory {
    next_id: u32,
    available: bool,
    created: usize,
}

impl MemorySurfaceFactory {
    /// Ids start at `first_id`; keep it clear of the control surface's id.
    pub fn new(first_id: u32) -> Self {
        Self {
            next_id: first_id,
            available: true,
            created: 0,
        }
    }

    /// Make subsequent `create` calls fail, as a platform out of resources would.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn created(&self) -> usize {
        self.created
    }
}

impl Default for MemorySurfaceFactory {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SurfaceFactory for MemorySurfaceFactory {
    type Surface = MemorySurface;

    fn create(&mut self, options: &SurfaceOptions) -> Result<MemorySurface, ShellError> {
        if !self.available {
            return Err(ShellError::SurfaceCreation(
                "memory backend marked unavailable".to_string(),
            ));
        }
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.created += 1;
        Ok(MemorySurface::new(id, options.clone()))
    }
}

/// Control surface that records every message posted to it.
#[derive(Debug, Clone)]
pub struct MemoryControlSurface {
    id: SurfaceId,
    outbox: Arc<Mutex<Vec<ShellMessage>>>,
    bounds: Option<Bounds>,
    devtools_open: bool,
    destroyed: bool,
}

impl MemoryControlSurface {
    pub fn new(id: SurfaceId) -> Self {
        Self {
            id,
            outbox: Arc::new(Mutex::new(Vec::new())),
            bounds: None,
            devtools_open: false,
            destroyed: false,
        }
    }

    /// Every message received so far, oldest first.
    pub fn sent(&self) -> Vec<ShellMessage> {
        self.outbox.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Forget recorded messages.
    pub fn clear(&self) {
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.clear();
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn devtools_open(&self) -> bool {
        self.devtools_open
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl ControlSurface for MemoryControlSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn post(&mut self, message: &ShellMessage) {
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push(message.clone());
        }
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    fn open_devtools(&mut self) {
        self.devtools_open = true;
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}
