/// Requested placement for a navigation that would open a new top-level context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// An independent top-level window.
    NewWindow,
    ForegroundTab,
    BackgroundTab,
    /// Anything the platform reports that the shell does not distinguish.
    Default,
}

/// A content surface asked to open `url` somewhere new.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupRequest {
    pub url: String,
    pub disposition: Disposition,
}

impl PopupRequest {
    pub fn new(url: impl Into<String>, disposition: Disposition) -> Self {
        Self {
            url: url.into(),
            disposition,
        }
    }
}

/// Outcome of popup interception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupDecision {
    /// Target has no host; leave it to the platform and open nothing in the shell.
    PlatformDefault,
    /// Let the platform create a window the shell does not own.
    SeparateWindow,
    /// Open a tab right after the opener. With `placeholder`, the platform's
    /// window request is satisfied by a hidden window that is never shown.
    OpenTab { placeholder: bool },
}
