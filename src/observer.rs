//! Typed notifications emitted by the tab multiplexer.

use crate::types::tab::TabId;

/// Payload of [`ShellObserver::on_tab_created`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabCreated {
    pub tab_id: TabId,
    /// URL the tab was asked to open, `None` when it fell back to the blank page.
    pub opened_url: Option<String>,
    /// Tab that was active just before this one took over.
    pub previous_active: Option<TabId>,
}

/// Callbacks for shell lifecycle notifications. Every method defaults to a no-op.
pub trait ShellObserver {
    fn on_control_ready(&mut self) {}
    fn on_tab_created(&mut self, _event: &TabCreated) {}
    fn on_url_updated(&mut self, _tab_id: TabId, _href: &str) {}
    fn on_closed(&mut self) {}
}
