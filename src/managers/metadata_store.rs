use std::collections::{BTreeMap, HashMap};

use crate::types::tab::{TabId, TabMetadata, TabsSnapshot};

/// Trait defining the tab metadata store interface.
pub trait MetadataStoreTrait {
    fn insert(&mut self, tab_id: TabId, after: Option<TabId>, metadata: TabMetadata);
    fn remove(&mut self, tab_id: TabId) -> Option<(usize, TabMetadata)>;
    fn merge(&mut self, tab_id: TabId, patch: TabMetadata) -> bool;
    fn get(&self, tab_id: TabId) -> Option<&TabMetadata>;
    fn contains(&self, tab_id: TabId) -> bool;
    fn order(&self) -> &[TabId];
    fn position(&self, tab_id: TabId) -> Option<usize>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn snapshot(&self) -> TabsSnapshot;
}

/// Ordered mapping from tab id to its metadata.
///
/// The tab order and the metadata keys live side by side and are only ever
/// changed together, so their membership cannot drift apart.
#[derive(Debug, Default)]
pub struct TabMetadataStore {
    order: Vec<TabId>,
    entries: HashMap<TabId, TabMetadata>,
}

impl TabMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStoreTrait for TabMetadataStore {
    /// Insert right after `after` when it is a member, otherwise append.
    /// Re-inserting an existing id only merges its metadata.
    fn insert(&mut self, tab_id: TabId, after: Option<TabId>, metadata: TabMetadata) {
        if let Some(existing) = self.entries.get_mut(&tab_id) {
            existing.merge(metadata);
            return;
        }
        match after.and_then(|anchor| self.position(anchor)) {
            Some(idx) => self.order.insert(idx + 1, tab_id),
            None => self.order.push(tab_id),
        }
        self.entries.insert(tab_id, metadata);
    }

    /// Remove a tab, returning the slot it occupied and its last metadata.
    fn remove(&mut self, tab_id: TabId) -> Option<(usize, TabMetadata)> {
        let idx = self.position(tab_id)?;
        self.order.remove(idx);
        let metadata = self.entries.remove(&tab_id).unwrap_or_default();
        Some((idx, metadata))
    }

    /// Field-wise merge. Returns false for unknown tabs.
    fn merge(&mut self, tab_id: TabId, patch: TabMetadata) -> bool {
        match self.entries.get_mut(&tab_id) {
            Some(entry) => {
                entry.merge(patch);
                true
            }
            None => false,
        }
    }

    fn get(&self, tab_id: TabId) -> Option<&TabMetadata> {
        self.entries.get(&tab_id)
    }

    fn contains(&self, tab_id: TabId) -> bool {
        self.entries.contains_key(&tab_id)
    }

    fn order(&self) -> &[TabId] {
        &self.order
    }

    fn position(&self, tab_id: TabId) -> Option<usize> {
        self.order.iter().position(|id| *id == tab_id)
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn snapshot(&self) -> TabsSnapshot {
        let confs: BTreeMap<TabId, TabMetadata> = self
            .entries
            .iter()
            .map(|(id, meta)| (*id, meta.clone()))
            .collect();
        TabsSnapshot {
            confs,
            tabs: self.order.clone(),
        }
    }
}
