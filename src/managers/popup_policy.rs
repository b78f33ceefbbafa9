use tracing::debug;
use url::Url;

use crate::types::options::PopupOverride;
use crate::types::popup::{Disposition, PopupDecision, PopupRequest};

/// Whether `url` parses and names a non-empty host.
///
/// Unparseable input counts as "no host" instead of surfacing a parse error.
pub fn has_host(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| !h.is_empty()))
        .unwrap_or(false)
}

/// Built-in interception policy for requests to open a new top-level context.
pub fn decide(request: &PopupRequest) -> PopupDecision {
    if !has_host(&request.url) {
        debug!(url = %request.url, "popup target has no host, leaving it to the platform");
        return PopupDecision::PlatformDefault;
    }
    match request.disposition {
        Disposition::NewWindow => PopupDecision::SeparateWindow,
        Disposition::ForegroundTab => PopupDecision::OpenTab { placeholder: true },
        Disposition::BackgroundTab | Disposition::Default => {
            PopupDecision::OpenTab { placeholder: false }
        }
    }
}

/// Apply the configured override if there is one, the built-in policy otherwise.
pub fn resolve(request: &PopupRequest, popup_override: Option<&PopupOverride>) -> PopupDecision {
    match popup_override {
        Some(custom) => custom.decide(request),
        None => decide(request),
    }
}
