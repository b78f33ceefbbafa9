use std::collections::HashMap;

use tracing::{debug, error, warn};

use crate::managers::layout;
use crate::managers::metadata_store::{MetadataStoreTrait, TabMetadataStore};
use crate::managers::popup_policy;
use crate::observer::{ShellObserver, TabCreated};
use crate::surface::{
    ContentSurface, ControlSurface, NavAction, SurfaceEvent, SurfaceEventQueue, SurfaceFactory,
};
use crate::types::errors::ShellError;
use crate::types::geometry::Size;
use crate::types::message::ShellMessage;
use crate::types::options::{ShellOptions, SurfaceOptions};
use crate::types::popup::{PopupDecision, PopupRequest};
use crate::types::tab::{SurfaceId, TabId, TabMetadata, TabsSnapshot};

/// Trait defining the tab multiplexer interface.
pub trait TabMultiplexerTrait {
    fn create_tab(
        &mut self,
        url: Option<&str>,
        insert_after: Option<TabId>,
        options: Option<&SurfaceOptions>,
    ) -> Result<TabId, ShellError>;
    fn switch_to(&mut self, tab_id: TabId);
    fn close_tab(&mut self, tab_id: TabId);
    fn navigate(&mut self, tab_id: TabId, url: &str);
    fn update_tab_config(&mut self, tab_id: TabId, patch: TabMetadata);
    fn recompute_layout(&mut self);
    fn shutdown(&mut self);
    fn active_tab(&self) -> Option<TabId>;
    fn tab_order(&self) -> &[TabId];
    fn tab_count(&self) -> usize;
    fn metadata(&self, tab_id: TabId) -> Option<&TabMetadata>;
    fn snapshot(&self) -> TabsSnapshot;
}

struct TabRecord<S> {
    surface: S,
    /// Set once the surface's events are routed to this multiplexer.
    initialized: bool,
}

/// Owns the content surfaces of one host window and keeps the control
/// surface in sync with them.
///
/// Invariants, held between any two calls:
/// - the tab order and the metadata keys have the same members;
/// - while any tab exists, the active tab is one of them;
/// - while the window is open, at least one tab exists once the control
///   surface has reported ready.
pub struct TabMultiplexer<F: SurfaceFactory, C: ControlSurface> {
    options: ShellOptions,
    factory: F,
    control: C,
    /// Pushes are only delivered after the control surface reported ready.
    channel_open: bool,
    tabs: HashMap<TabId, TabRecord<F::Surface>>,
    store: TabMetadataStore,
    active: Option<TabId>,
    window: Size,
    events: SurfaceEventQueue,
    observers: Vec<Box<dyn ShellObserver>>,
    closed: bool,
}

impl<F: SurfaceFactory, C: ControlSurface> TabMultiplexer<F, C> {
    pub fn new(options: ShellOptions, factory: F, mut control: C) -> Self {
        let window = Size::new(options.width, options.height);
        control.set_bounds(layout::control_bounds(window, options.control_height));
        if options.debug {
            control.open_devtools();
        }
        debug!(control = %control.id(), ?window, "tab multiplexer created");
        Self {
            options,
            factory,
            control,
            channel_open: false,
            tabs: HashMap::new(),
            store: TabMetadataStore::new(),
            active: None,
            window,
            events: SurfaceEventQueue::new(),
            observers: Vec::new(),
            closed: false,
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn ShellObserver>) {
        self.observers.push(observer);
    }

    pub fn options(&self) -> &ShellOptions {
        &self.options
    }

    pub fn control_id(&self) -> SurfaceId {
        self.control.id()
    }

    pub fn control_surface(&self) -> &C {
        &self.control
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn surface(&self, tab_id: TabId) -> Option<&F::Surface> {
        self.tabs.get(&tab_id).map(|r| &r.surface)
    }

    pub fn surface_mut(&mut self, tab_id: TabId) -> Option<&mut F::Surface> {
        self.tabs.get_mut(&tab_id).map(|r| &mut r.surface)
    }

    /// Queue shared by every bound surface. Backends that deliver events from
    /// callbacks push here and then call [`Self::pump_surface_events`].
    pub fn event_queue(&self) -> &SurfaceEventQueue {
        &self.events
    }

    pub fn window_size(&self) -> Size {
        self.window
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_channel_open(&self) -> bool {
        self.channel_open
    }

    /// The control surface finished loading. The first call opens the channel
    /// and creates the start tab; later calls only resend the current state.
    pub fn control_ready(&mut self) {
        if self.closed {
            return;
        }
        let first = !self.channel_open;
        self.channel_open = true;
        if self.store.is_empty() {
            let start_page = self.options.start_page.clone();
            let url = Some(start_page.as_str()).filter(|u| !u.is_empty());
            if let Err(e) = self.create_tab(url, None, None) {
                error!(error = %e, "failed to open start tab");
            }
        } else {
            debug!(first, "control surface re-registered, resending state");
            self.push_snapshot();
            if let Some(active) = self.active {
                self.push(ShellMessage::ActiveUpdate(active));
            }
        }
        for observer in self.observers.iter_mut() {
            observer.on_control_ready();
        }
    }

    /// Run a named navigation action on the active tab.
    pub fn act(&mut self, action_name: &str) {
        let action = match action_name.parse::<NavAction>() {
            Ok(action) => action,
            Err(e) => {
                warn!(action = action_name, "{}", e);
                return;
            }
        };
        let Some(record) = self.active.and_then(|id| self.tabs.get_mut(&id)) else {
            warn!(action = action_name, "no active tab for navigation action");
            return;
        };
        let surface = &mut record.surface;
        match action {
            NavAction::GoBack => surface.go_back(),
            NavAction::GoForward => surface.go_forward(),
            NavAction::Reload => {
                if surface.url().map_or(true, |u| u.is_empty()) {
                    debug!(tab_id = %surface.id(), "reload skipped, nothing loaded yet");
                    return;
                }
                surface.reload();
            }
            NavAction::Stop => surface.stop(),
        }
    }

    /// The host window's content area changed size.
    pub fn resize(&mut self, window: Size) {
        self.window = window;
        self.control
            .set_bounds(layout::control_bounds(window, self.options.control_height));
        self.recompute_layout();
    }

    /// Apply one lifecycle event reported by the surface `tab_id`.
    /// Events from surfaces that are no longer tabs are dropped.
    pub fn handle_surface_event(&mut self, tab_id: TabId, event: SurfaceEvent) {
        if self.closed || !self.tabs.contains_key(&tab_id) {
            debug!(tab_id = %tab_id, ?event, "dropping event for closed surface");
            return;
        }
        match event {
            SurfaceEvent::LoadStarted => self.update_tab_config(tab_id, TabMetadata::loading(true)),
            SurfaceEvent::NavigationStarted { href, main_frame } => {
                if main_frame {
                    self.location_changed(tab_id, href);
                }
            }
            SurfaceEvent::Redirected { href } => self.location_changed(tab_id, href),
            SurfaceEvent::TitleChanged(title) => {
                self.update_tab_config(tab_id, TabMetadata::title(title))
            }
            SurfaceEvent::FaviconChanged(icons) => {
                if let Some(first) = icons.into_iter().next() {
                    self.update_tab_config(tab_id, TabMetadata::favicon(first));
                }
            }
            SurfaceEvent::LoadStopped => {
                self.update_tab_config(tab_id, TabMetadata::loading(false))
            }
            SurfaceEvent::DomReady => {
                if self.active == Some(tab_id) {
                    if let Some(record) = self.tabs.get_mut(&tab_id) {
                        record.surface.focus();
                    }
                }
            }
            SurfaceEvent::NewWindowRequested(request) => {
                self.intercept_popup(tab_id, &request);
            }
        }
    }

    /// Drain and apply queued surface events, including any raised while
    /// applying them. Returns how many were applied.
    pub fn pump_surface_events(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let batch = self.events.drain();
            if batch.is_empty() {
                return applied;
            }
            for (tab_id, event) in batch {
                self.handle_surface_event(tab_id, event);
                applied += 1;
            }
        }
    }

    /// Popup interception for a request raised by `opener`.
    pub fn intercept_popup(&mut self, opener: TabId, request: &PopupRequest) -> PopupDecision {
        let decision = popup_policy::resolve(request, self.options.popup_override.as_ref());
        debug!(opener = %opener, url = %request.url, ?decision, "popup requested");
        if let PopupDecision::OpenTab { .. } = decision {
            if let Err(e) = self.create_tab(Some(&request.url), Some(opener), None) {
                error!(error = %e, url = %request.url, "failed to open popup tab");
            }
        }
        decision
    }

    fn location_changed(&mut self, tab_id: TabId, href: String) {
        self.update_tab_config(tab_id, TabMetadata::location(href.clone()));
        for observer in self.observers.iter_mut() {
            observer.on_url_updated(tab_id, &href);
        }
    }

    fn push(&mut self, message: ShellMessage) {
        if self.channel_open && !self.closed {
            self.control.post(&message);
        }
    }

    fn push_snapshot(&mut self) {
        let snapshot = self.store.snapshot();
        self.push(ShellMessage::TabsUpdate(snapshot));
    }

    fn set_active(&mut self, tab_id: Option<TabId>) {
        self.active = tab_id;
        self.recompute_layout();
        if let Some(id) = tab_id {
            self.push(ShellMessage::ActiveUpdate(id));
        }
    }

    /// Detach the visible surface, attach `tab_id`, and make it active.
    fn show(&mut self, tab_id: TabId) {
        if let Some(current) = self.active.filter(|id| *id != tab_id) {
            if let Some(record) = self.tabs.get_mut(&current) {
                record.surface.set_visible(false);
            }
        }
        if let Some(record) = self.tabs.get_mut(&tab_id) {
            record.surface.set_visible(true);
        }
        self.set_active(Some(tab_id));
    }
}

impl<F: SurfaceFactory, C: ControlSurface> TabMultiplexerTrait for TabMultiplexer<F, C> {
    /// Open a tab after `insert_after` (or at the end), make it active and load
    /// `url`, falling back to the configured blank page.
    fn create_tab(
        &mut self,
        url: Option<&str>,
        insert_after: Option<TabId>,
        options: Option<&SurfaceOptions>,
    ) -> Result<TabId, ShellError> {
        if self.closed {
            return Err(ShellError::Closed);
        }
        let surface_options = options.unwrap_or(&self.options.surface_defaults).clone();
        let surface = self.factory.create(&surface_options)?;
        let tab_id = surface.id();
        self.tabs.insert(
            tab_id,
            TabRecord {
                surface,
                initialized: false,
            },
        );
        self.store.insert(
            tab_id,
            insert_after,
            TabMetadata::title(self.options.blank_title.clone()),
        );
        self.push_snapshot();

        let previous_active = self.active;
        self.show(tab_id);

        let opened_url = url.filter(|u| !u.is_empty()).map(str::to_string);
        let target = opened_url
            .clone()
            .unwrap_or_else(|| self.options.blank_page.clone());
        self.navigate(tab_id, &target);
        self.update_tab_config(tab_id, TabMetadata::default());

        debug!(tab_id = %tab_id, url = %target, "tab created");
        let event = TabCreated {
            tab_id,
            opened_url,
            previous_active,
        };
        for observer in self.observers.iter_mut() {
            observer.on_tab_created(&event);
        }
        Ok(tab_id)
    }

    /// Make `tab_id` the visible tab and focus it. Unknown ids are ignored.
    fn switch_to(&mut self, tab_id: TabId) {
        if self.closed {
            return;
        }
        if !self.tabs.contains_key(&tab_id) {
            warn!(tab_id = %tab_id, "switch to unknown tab ignored");
            return;
        }
        self.show(tab_id);
        if let Some(record) = self.tabs.get_mut(&tab_id) {
            record.surface.focus();
        }
    }

    /// Close a tab, activating its successor (next slot, wrapping to the first)
    /// when it was active. Closing the last tab opens a fresh blank one.
    fn close_tab(&mut self, tab_id: TabId) {
        if self.closed {
            return;
        }
        let was_active = self.active == Some(tab_id);
        let Some((slot, _)) = self.store.remove(tab_id) else {
            debug!(tab_id = %tab_id, "close of unknown tab ignored");
            return;
        };
        if let Some(mut record) = self.tabs.remove(&tab_id) {
            record.surface.destroy();
        }
        debug!(tab_id = %tab_id, slot, "tab closed");

        if self.store.is_empty() {
            self.active = None;
            self.push_snapshot();
            if let Err(e) = self.create_tab(None, None, None) {
                error!(error = %e, "failed to replace the last closed tab");
            }
            return;
        }

        self.push_snapshot();
        if was_active {
            let order = self.store.order();
            let successor = order.get(slot).copied().unwrap_or(order[0]);
            self.switch_to(successor);
        }
    }

    /// Load `url` in `tab_id`. The first load also routes the surface's events
    /// here; later loads only reissue the navigation.
    fn navigate(&mut self, tab_id: TabId, url: &str) {
        if self.closed || url.is_empty() {
            return;
        }
        let Some(record) = self.tabs.get_mut(&tab_id) else {
            warn!(tab_id = %tab_id, url, "navigate on unknown tab ignored");
            return;
        };
        if record.initialized {
            record.surface.load_url(url);
            return;
        }
        record.surface.bind_events(self.events.clone());
        record.initialized = true;
        record.surface.load_url(url);
        if self.options.debug {
            record.surface.open_devtools();
        }
        self.recompute_layout();
    }

    /// Merge `patch` into the tab's metadata, refreshing the history flags from
    /// the live surface, and push the full snapshot.
    fn update_tab_config(&mut self, tab_id: TabId, patch: TabMetadata) {
        let Some(record) = self.tabs.get(&tab_id) else {
            debug!(tab_id = %tab_id, "metadata update for unknown tab ignored");
            return;
        };
        let mut merged = TabMetadata {
            can_go_back: Some(record.surface.can_go_back()),
            can_go_forward: Some(record.surface.can_go_forward()),
            ..Default::default()
        };
        merged.merge(patch);
        self.store.merge(tab_id, merged);
        self.push_snapshot();
    }

    /// Size the active surface to the area under the control band.
    fn recompute_layout(&mut self) {
        let bounds = layout::content_bounds(self.window, self.options.control_height);
        if let Some(record) = self.active.and_then(|id| self.tabs.get_mut(&id)) {
            record.surface.set_bounds(bounds);
        }
    }

    /// Destroy every surface, the control surface included, and stop
    /// listening. Idempotent.
    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.channel_open = false;
        for (_, mut record) in self.tabs.drain() {
            record.surface.destroy();
        }
        self.store = TabMetadataStore::new();
        self.active = None;
        self.events.drain();
        self.control.destroy();
        debug!("tab multiplexer shut down");
        for observer in self.observers.iter_mut() {
            observer.on_closed();
        }
    }

    fn active_tab(&self) -> Option<TabId> {
        self.active
    }

    fn tab_order(&self) -> &[TabId] {
        self.store.order()
    }

    fn tab_count(&self) -> usize {
        self.store.len()
    }

    fn metadata(&self, tab_id: TabId) -> Option<&TabMetadata> {
        self.store.get(tab_id)
    }

    fn snapshot(&self) -> TabsSnapshot {
        self.store.snapshot()
    }
}
