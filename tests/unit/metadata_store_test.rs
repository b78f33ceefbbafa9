use tabshell::managers::metadata_store::{MetadataStoreTrait, TabMetadataStore};
use tabshell::types::tab::{SurfaceId, TabMetadata};

fn id(n: u32) -> SurfaceId {
    SurfaceId(n)
}

#[test]
fn test_insert_without_anchor_appends() {
    let mut store = TabMetadataStore::new();
    store.insert(id(1), None, TabMetadata::title("a"));
    store.insert(id(2), None, TabMetadata::title("b"));
    assert_eq!(store.order(), [id(1), id(2)]);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_insert_after_anchor() {
    let mut store = TabMetadataStore::new();
    store.insert(id(1), None, TabMetadata::default());
    store.insert(id(2), None, TabMetadata::default());
    store.insert(id(3), Some(id(1)), TabMetadata::default());
    assert_eq!(store.order(), [id(1), id(3), id(2)]);
}

#[test]
fn test_insert_after_unknown_anchor_appends() {
    let mut store = TabMetadataStore::new();
    store.insert(id(1), None, TabMetadata::default());
    store.insert(id(2), Some(id(99)), TabMetadata::default());
    assert_eq!(store.order(), [id(1), id(2)]);
}

#[test]
fn test_reinsert_merges_instead_of_duplicating() {
    let mut store = TabMetadataStore::new();
    store.insert(id(1), None, TabMetadata::title("first"));
    store.insert(id(1), None, TabMetadata::url("https://a.test/"));
    assert_eq!(store.order(), [id(1)]);
    let meta = store.get(id(1)).unwrap();
    assert_eq!(meta.title.as_deref(), Some("first"));
    assert_eq!(meta.url.as_deref(), Some("https://a.test/"));
}

#[test]
fn test_remove_reports_slot() {
    let mut store = TabMetadataStore::new();
    for n in 1..=3 {
        store.insert(id(n), None, TabMetadata::title(format!("t{}", n)));
    }
    let (slot, meta) = store.remove(id(2)).unwrap();
    assert_eq!(slot, 1);
    assert_eq!(meta.title.as_deref(), Some("t2"));
    assert_eq!(store.order(), [id(1), id(3)]);
    assert!(!store.contains(id(2)));
    assert!(store.remove(id(2)).is_none());
}

#[test]
fn test_merge_only_overwrites_present_fields() {
    let mut store = TabMetadataStore::new();
    store.insert(id(1), None, TabMetadata::title("T"));
    assert!(store.merge(id(1), TabMetadata::location("https://x.test/")));
    assert!(store.merge(id(1), TabMetadata::loading(true)));

    let meta = store.get(id(1)).unwrap();
    assert_eq!(meta.title.as_deref(), Some("T"));
    assert_eq!(meta.url.as_deref(), Some("https://x.test/"));
    assert_eq!(meta.href.as_deref(), Some("https://x.test/"));
    assert_eq!(meta.is_loading, Some(true));
}

#[test]
fn test_merge_unknown_tab_is_rejected() {
    let mut store = TabMetadataStore::new();
    assert!(!store.merge(id(5), TabMetadata::title("ghost")));
    assert!(store.is_empty());
}

#[test]
fn test_snapshot_matches_order_and_keys() {
    let mut store = TabMetadataStore::new();
    store.insert(id(2), None, TabMetadata::title("b"));
    store.insert(id(1), None, TabMetadata::title("a"));
    let snapshot = store.snapshot();
    assert_eq!(snapshot.tabs, vec![id(2), id(1)]);
    assert_eq!(snapshot.confs.len(), 2);
    assert!(snapshot.tabs.iter().all(|t| snapshot.confs.contains_key(t)));
}
