use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a content surface, stable for the surface's lifetime.
///
/// A tab is identified by the id of the surface that renders it, so the same
/// type doubles as the tab id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u32);

/// A tab is a surface id plus its slot in the tab order plus its metadata.
pub type TabId = SurfaceId;

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display and navigation state of a tab as seen by the control surface.
///
/// Every field stays `None` until first populated. Merging is field-wise:
/// present fields overwrite, absent fields are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_loading: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_go_back: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_go_forward: Option<bool>,
}

impl TabMetadata {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Patch produced by a top-level navigation: both `url` and `href` move.
    pub fn location(href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            url: Some(href.clone()),
            href: Some(href),
            ..Default::default()
        }
    }

    pub fn loading(is_loading: bool) -> Self {
        Self {
            is_loading: Some(is_loading),
            ..Default::default()
        }
    }

    pub fn favicon(favicon: impl Into<String>) -> Self {
        Self {
            favicon: Some(favicon.into()),
            ..Default::default()
        }
    }

    /// Overwrite every field that `patch` carries, keeping the rest.
    pub fn merge(&mut self, patch: TabMetadata) {
        let TabMetadata {
            title,
            url,
            href,
            favicon,
            is_loading,
            can_go_back,
            can_go_forward,
        } = patch;
        if title.is_some() {
            self.title = title;
        }
        if url.is_some() {
            self.url = url;
        }
        if href.is_some() {
            self.href = href;
        }
        if favicon.is_some() {
            self.favicon = favicon;
        }
        if is_loading.is_some() {
            self.is_loading = is_loading;
        }
        if can_go_back.is_some() {
            self.can_go_back = can_go_back;
        }
        if can_go_forward.is_some() {
            self.can_go_forward = can_go_forward;
        }
    }
}

/// Full state pushed to the control surface on every metadata or tab-list write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabsSnapshot {
    pub confs: BTreeMap<TabId, TabMetadata>,
    pub tabs: Vec<TabId>,
}
