//! Native backend, enabled by the `gui` feature.
//!
//! `wry` renders every surface as a child WebView of one `tao` window:
//! - Windows: WebView2
//! - Linux: WebKitGTK (child WebViews require X11)
//! - macOS: WKWebView

pub mod control_panel;
pub mod webview_app;
pub mod wry_surface;
