//! `wry` implementations of the surface traits.
//!
//! Every surface is a child WebView of the single tao host window. WebView
//! callbacks never touch the multiplexer directly: they push into the bound
//! event queues and wake the event loop through an `EventLoopProxy`.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use tracing::{debug, warn};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{NewWindowResponse, PageLoadEvent, Rect, WebView, WebViewBuilder};

use super::control_panel::{CONTROL_BRIDGE_JS, CONTROL_PANEL_HTML};
use crate::managers::popup_policy;
use crate::surface::{
    ContentSurface, ControlSurface, SurfaceEvent, SurfaceEventQueue, SurfaceFactory,
};
use crate::types::errors::ShellError;
use crate::types::geometry::Bounds;
use crate::types::message::ShellMessage;
use crate::types::options::{PopupOverride, ShellOptions, SurfaceOptions};
use crate::types::popup::{Disposition, PopupDecision, PopupRequest};
use crate::types::tab::SurfaceId;

/// Events delivered to the tao event loop.
#[derive(Debug)]
pub enum UserEvent {
    /// A WebView posted a message through `window.ipc`.
    Ipc { sender: SurfaceId, body: String },
    /// At least one surface event was queued.
    SurfaceActivity,
}

fn to_rect(bounds: Bounds) -> Rect {
    Rect {
        position: LogicalPosition::new(bounds.x, bounds.y).into(),
        size: LogicalSize::new(bounds.width, bounds.height).into(),
    }
}

/// Fans one surface's events out to its bound queues.
#[derive(Clone)]
struct Emitter {
    id: SurfaceId,
    listeners: Arc<Mutex<Vec<SurfaceEventQueue>>>,
    proxy: EventLoopProxy<UserEvent>,
}

impl Emitter {
    fn emit(&self, event: SurfaceEvent) {
        let delivered = match self.listeners.lock() {
            Ok(listeners) => {
                for queue in listeners.iter() {
                    queue.push(self.id, event.clone());
                }
                !listeners.is_empty()
            }
            Err(_) => false,
        };
        if delivered {
            let _ = self.proxy.send_event(UserEvent::SurfaceActivity);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PendingMove {
    Back,
    Forward,
    Reload,
}

/// Session history as observed from page-load callbacks; wry does not expose
/// the engine's own back/forward list.
#[derive(Debug, Default)]
struct HistoryTracker {
    entries: Vec<String>,
    index: usize,
    pending: Option<PendingMove>,
}

impl HistoryTracker {
    fn record(&mut self, url: &str) {
        match self.pending.take() {
            Some(PendingMove::Back) if self.index > 0 => self.index -= 1,
            Some(PendingMove::Forward) if self.index + 1 < self.entries.len() => self.index += 1,
            Some(PendingMove::Reload) => {}
            _ => {
                if self.current() == Some(url) {
                    return;
                }
                if !self.entries.is_empty() {
                    self.entries.truncate(self.index + 1);
                }
                self.entries.push(url.to_string());
                self.index = self.entries.len() - 1;
            }
        }
    }

    fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    fn can_go_back(&self) -> bool {
        self.index > 0
    }

    fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

/// A tab backed by a child WebView.
pub struct WrySurface {
    id: SurfaceId,
    webview: Option<WebView>,
    listeners: Arc<Mutex<Vec<SurfaceEventQueue>>>,
    history: Arc<Mutex<HistoryTracker>>,
}

impl WrySurface {
    fn script(&self, js: &str) {
        if let Some(webview) = &self.webview {
            if let Err(e) = webview.evaluate_script(js) {
                warn!(surface = %self.id, error = %e, "script evaluation failed");
            }
        }
    }

    fn expect_move(&self, pending: PendingMove) {
        if let Ok(mut history) = self.history.lock() {
            history.pending = Some(pending);
        }
    }
}

impl ContentSurface for WrySurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn load_url(&mut self, url: &str) {
        if let Some(webview) = &self.webview {
            if let Err(e) = webview.load_url(url) {
                warn!(surface = %self.id, url, error = %e, "load failed");
            }
        }
    }

    fn url(&self) -> Option<String> {
        self.history
            .lock()
            .ok()
            .and_then(|h| h.current().map(str::to_string))
    }

    fn go_back(&mut self) {
        if self.can_go_back() {
            self.expect_move(PendingMove::Back);
            self.script("history.back()");
        }
    }

    fn go_forward(&mut self) {
        if self.can_go_forward() {
            self.expect_move(PendingMove::Forward);
            self.script("history.forward()");
        }
    }

    fn reload(&mut self) {
        self.expect_move(PendingMove::Reload);
        self.script("location.reload()");
    }

    fn stop(&mut self) {
        self.script("window.stop()");
    }

    fn can_go_back(&self) -> bool {
        self.history.lock().map(|h| h.can_go_back()).unwrap_or(false)
    }

    fn can_go_forward(&self) -> bool {
        self.history.lock().map(|h| h.can_go_forward()).unwrap_or(false)
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        if let Some(webview) = &self.webview {
            if let Err(e) = webview.set_bounds(to_rect(bounds)) {
                warn!(surface = %self.id, error = %e, "set_bounds failed");
            }
        }
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(webview) = &self.webview {
            if let Err(e) = webview.set_visible(visible) {
                warn!(surface = %self.id, error = %e, "set_visible failed");
            }
        }
    }

    fn focus(&mut self) {
        if let Some(webview) = &self.webview {
            if let Err(e) = webview.focus() {
                warn!(surface = %self.id, error = %e, "focus failed");
            }
        }
    }

    fn open_devtools(&mut self) {
        if let Some(webview) = &self.webview {
            webview.open_devtools();
        }
    }

    fn bind_events(&mut self, queue: SurfaceEventQueue) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(queue);
        }
    }

    fn destroy(&mut self) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.clear();
        }
        // Dropping the WebView removes it from the host window.
        if self.webview.take().is_some() {
            debug!(surface = %self.id, "webview destroyed");
        }
    }
}

/// Creates tab WebViews inside the host window.
pub struct WrySurfaceFactory {
    window: Rc<Window>,
    proxy: EventLoopProxy<UserEvent>,
    popup_override: Option<PopupOverride>,
    next_id: u32,
}

impl WrySurfaceFactory {
    pub fn new(
        window: Rc<Window>,
        proxy: EventLoopProxy<UserEvent>,
        popup_override: Option<PopupOverride>,
        first_id: u32,
    ) -> Self {
        Self {
            window,
            proxy,
            popup_override,
            next_id: first_id,
        }
    }
}

impl SurfaceFactory for WrySurfaceFactory {
    type Surface = WrySurface;

    fn create(&mut self, options: &SurfaceOptions) -> Result<WrySurface, ShellError> {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;

        let listeners = Arc::new(Mutex::new(Vec::new()));
        let history = Arc::new(Mutex::new(HistoryTracker::default()));
        let emitter = Emitter {
            id,
            listeners: Arc::clone(&listeners),
            proxy: self.proxy.clone(),
        };

        let mut builder = WebViewBuilder::new()
            .with_bounds(to_rect(Bounds::default()))
            .with_visible(false)
            .with_devtools(options.devtools)
            .with_transparent(options.transparent)
            .with_autoplay(options.autoplay)
            .with_clipboard(options.clipboard)
            .with_focused(false);

        if let Some(ua) = &options.user_agent {
            builder = builder.with_user_agent(ua);
        }

        let load_emitter = emitter.clone();
        let load_history = Arc::clone(&history);
        builder = builder.with_on_page_load_handler(move |event, url| match event {
            PageLoadEvent::Started => {
                if let Ok(mut h) = load_history.lock() {
                    h.record(&url);
                }
                load_emitter.emit(SurfaceEvent::LoadStarted);
                load_emitter.emit(SurfaceEvent::NavigationStarted {
                    href: url,
                    main_frame: true,
                });
            }
            PageLoadEvent::Finished => {
                load_emitter.emit(SurfaceEvent::DomReady);
                load_emitter.emit(SurfaceEvent::LoadStopped);
            }
        });

        let title_emitter = emitter.clone();
        builder = builder.with_document_title_changed_handler(move |title| {
            title_emitter.emit(SurfaceEvent::TitleChanged(title));
        });

        // wry reports no disposition; window.open and target=_blank are treated
        // as foreground tab requests.
        let popup_emitter = emitter;
        let popup_override = self.popup_override.clone();
        builder = builder.with_new_window_req_handler(move |url, _features| {
            let request = PopupRequest::new(url, Disposition::ForegroundTab);
            let decision = popup_policy::resolve(&request, popup_override.as_ref());
            popup_emitter.emit(SurfaceEvent::NewWindowRequested(request));
            match decision {
                PopupDecision::SeparateWindow => NewWindowResponse::Allow,
                PopupDecision::PlatformDefault | PopupDecision::OpenTab { .. } => {
                    NewWindowResponse::Deny
                }
            }
        });

        // Tabs have no business on the control channel, but their messages are
        // tagged and forwarded so the sender check can reject them.
        let ipc_proxy = self.proxy.clone();
        builder = builder.with_ipc_handler(move |request| {
            let _ = ipc_proxy.send_event(UserEvent::Ipc {
                sender: id,
                body: request.body().to_string(),
            });
        });

        let webview = builder
            .build_as_child(&*self.window)
            .map_err(|e| ShellError::SurfaceCreation(e.to_string()))?;

        debug!(surface = %id, "webview created");
        Ok(WrySurface {
            id,
            webview: Some(webview),
            listeners,
            history,
        })
    }
}

/// The control surface: a child WebView across the top of the window.
pub struct WryControlSurface {
    id: SurfaceId,
    webview: Option<WebView>,
}

impl WryControlSurface {
    pub fn build(
        window: &Window,
        id: SurfaceId,
        options: &ShellOptions,
        proxy: EventLoopProxy<UserEvent>,
    ) -> Result<Self, ShellError> {
        let surface_options = &options.control_surface;
        let mut builder = WebViewBuilder::new()
            .with_bounds(to_rect(Bounds::default()))
            .with_devtools(surface_options.devtools || options.debug)
            .with_transparent(surface_options.transparent)
            .with_clipboard(surface_options.clipboard)
            .with_initialization_script(CONTROL_BRIDGE_JS)
            .with_custom_protocol("tabshell".into(), move |_wv_id, request| {
                let path = request.uri().path().to_string();
                let (status, body): (u16, Cow<'static, [u8]>) = match path.as_str() {
                    "/" | "/control" => (200, Cow::Borrowed(CONTROL_PANEL_HTML.as_bytes())),
                    _ => (404, Cow::Borrowed(b"Not Found" as &[u8])),
                };
                wry::http::Response::builder()
                    .status(status)
                    .header("Content-Type", "text/html; charset=utf-8")
                    .body(body)
                    .unwrap_or_else(|_| wry::http::Response::new(Cow::Borrowed(b"" as &[u8])))
            })
            .with_ipc_handler(move |request| {
                let _ = proxy.send_event(UserEvent::Ipc {
                    sender: id,
                    body: request.body().to_string(),
                });
            })
            .with_url(&options.control_panel);

        if let Some(ua) = &surface_options.user_agent {
            builder = builder.with_user_agent(ua);
        }

        let webview = builder
            .build_as_child(window)
            .map_err(|e| ShellError::SurfaceCreation(e.to_string()))?;

        Ok(Self {
            id,
            webview: Some(webview),
        })
    }
}

impl ControlSurface for WryControlSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn post(&mut self, message: &ShellMessage) {
        let Some(webview) = &self.webview else {
            return;
        };
        let payload = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize control push");
                return;
            }
        };
        let script = format!("window.tabshell && window.tabshell._dispatch({});", payload);
        if let Err(e) = webview.evaluate_script(&script) {
            warn!(error = %e, "control push failed");
        }
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        if let Some(webview) = &self.webview {
            if let Err(e) = webview.set_bounds(to_rect(bounds)) {
                warn!(error = %e, "control set_bounds failed");
            }
        }
    }

    fn open_devtools(&mut self) {
        if let Some(webview) = &self.webview {
            webview.open_devtools();
        }
    }

    fn destroy(&mut self) {
        self.webview = None;
    }
}
