//! Integration tests for the history crate.
//!
//! Each test gets its own temporary directory for blobs and documents.

use chrono::{Duration, Utc};
use clipdeck_context::{ActiveAppProvider, AppIconProvider, AppInfo};
use clipdeck_history::{
    text_fingerprint, AppAttributor, BlobStore, CapturedImage, ClipItem, ClipKind, HistoryQuery,
    HistoryStore, JsonDocument, MemoryDocument, NoAttribution, PushOutcome,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn memory_store(dir: &Path, max_items: usize) -> HistoryStore {
    HistoryStore::open(
        Arc::new(MemoryDocument::new()),
        Arc::new(NoAttribution),
        BlobStore::in_dir(dir),
        max_items,
    )
}

fn json_store(dir: &Path) -> HistoryStore {
    HistoryStore::open(
        Arc::new(JsonDocument::new(dir.join("history.json"))),
        Arc::new(NoAttribution),
        BlobStore::in_dir(dir),
        200,
    )
}

fn ids(items: &[ClipItem]) -> Vec<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

fn inserted(outcome: PushOutcome) -> ClipItem {
    match outcome {
        PushOutcome::Inserted(item) => item,
        other => panic!("expected insert, got {:?}", other),
    }
}

fn checkerboard() -> CapturedImage {
    let mut rgba = Vec::new();
    for i in 0..4 {
        let v = if i % 2 == 0 { 0 } else { 255 };
        rgba.extend_from_slice(&[v, v, v, 255]);
    }
    CapturedImage::new(2, 2, rgba)
}

// =============================================================================
// Deduplication Tests
// =============================================================================

mod dedup {
    use super::*;

    #[test]
    fn test_identical_text_kept_once_with_first_timestamp() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);

        let first = inserted(store.push_text("hello"));
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = store.push_text("hello");

        assert_eq!(second, PushOutcome::Duplicate(first.id.clone()));
        assert_eq!(store.len(), 1);
        let kept = store.get(&first.id).unwrap();
        assert_eq!(kept.timestamp, first.timestamp);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);

        let item = inserted(store.push_text(" hello "));
        assert_eq!(item.id, text_fingerprint("hello"));
        assert_eq!(item.text.as_deref(), Some("hello"));
        assert!(matches!(store.push_text("hello"), PushOutcome::Duplicate(_)));
    }

    #[test]
    fn test_duplicate_keeps_position() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);

        store.push_text("a");
        store.push_text("b");
        store.push_text("a");

        assert_eq!(
            ids(&store.items()),
            vec![text_fingerprint("b"), text_fingerprint("a")]
        );
    }

    #[test]
    fn test_identical_pixels_share_id() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);

        let item = inserted(store.push_image(&checkerboard()));
        assert_eq!(item.kind, ClipKind::Image);
        assert!(item.id.starts_with("I:"));
        assert!(matches!(
            store.push_image(&checkerboard()),
            PushOutcome::Duplicate(_)
        ));
        assert_eq!(store.len(), 1);
    }
}

// =============================================================================
// Classification on Capture
// =============================================================================

mod classification {
    use super::*;

    #[test]
    fn test_kinds_assigned_on_push() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);

        let cases = [
            ("https://x.com", ClipKind::Link),
            ("file:///Users/a/b.txt", ClipKind::File),
            ("```\nlet x=1\n```", ClipKind::Code),
            ("function f(){ return 1; }\nconsole.log(f())", ClipKind::Code),
            ("just a plain sentence", ClipKind::Text),
        ];

        for (text, kind) in cases {
            assert_eq!(inserted(store.push_text(text)).kind, kind, "{text:?}");
        }
    }
}

// =============================================================================
// Eviction and Pinning Tests
// =============================================================================

mod eviction {
    use super::*;

    #[test]
    fn test_oldest_evicted_past_cap() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 3);

        for text in ["t1", "t2", "t3", "t4"] {
            store.push_text(text);
        }

        assert_eq!(
            ids(&store.items()),
            vec![
                text_fingerprint("t4"),
                text_fingerprint("t3"),
                text_fingerprint("t2"),
            ]
        );
        assert!(!store.contains(&text_fingerprint("t1")));
    }

    #[test]
    fn test_pinned_entry_survives_eviction() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 3);

        store.push_text("keep");
        store.toggle_pin(&text_fingerprint("keep"));
        for text in ["a", "b", "c", "d", "e"] {
            store.push_text(text);
        }

        assert_eq!(store.len(), 3);
        assert!(store.contains(&text_fingerprint("keep")));
        assert!(store.contains(&text_fingerprint("e")));
        assert!(store.contains(&text_fingerprint("d")));
    }

    #[test]
    fn test_pin_ranks_first_in_display_order() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);

        store.push_text("older");
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.push_text("newer");
        store.toggle_pin(&text_fingerprint("older"));

        let view = store.query(&HistoryQuery::all());
        assert_eq!(view[0].id, text_fingerprint("older"));
        assert!(view[0].pinned);
        assert!(view[0].timestamp < view[1].timestamp);
    }

    #[test]
    fn test_query_never_reorders_storage() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);

        store.push_text("a");
        store.push_text("b");
        let c = inserted(store.push_text("c"));
        store.toggle_pin(&text_fingerprint("a"));
        let before = ids(&store.items());

        store.query(&HistoryQuery::all().with_text("b"));
        assert_eq!(ids(&store.items()), before);
        assert_eq!(store.get(&c.id).unwrap(), c);
    }
}

// =============================================================================
// Use Count and Pruning Tests
// =============================================================================

mod mutation {
    use super::*;

    #[test]
    fn test_use_count_increments() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);
        let item = inserted(store.push_text("paste me"));

        for _ in 0..3 {
            store.increment_use_count(&item.id);
        }

        let after = store.get(&item.id).unwrap();
        assert_eq!(after.use_count, 3);
        assert_eq!(after.id, item.id);
        assert_eq!(after.text, item.text);
    }

    #[test]
    fn test_prune_keeps_pinned_and_order() {
        let dir = tempdir().unwrap();
        let now = Utc::now();
        let old = |id: &str, days: i64, pinned: bool| {
            let mut item = ClipItem::text(id, ClipKind::Text, id, now - Duration::days(days));
            item.pinned = pinned;
            item
        };
        let seeded = vec![
            old("T:fresh", 1, false),
            old("T:stale", 40, false),
            old("T:pinned", 50, true),
            old("T:recent", 2, false),
        ];

        let store = HistoryStore::open(
            Arc::new(MemoryDocument::with_items(seeded.clone())),
            Arc::new(NoAttribution),
            BlobStore::in_dir(dir.path()),
            200,
        );

        let pruned = store.prune_older_than(now - Duration::days(30), true);
        assert_eq!(pruned, 1);
        assert_eq!(
            store.items(),
            vec![seeded[0].clone(), seeded[2].clone(), seeded[3].clone()]
        );
    }

    #[test]
    fn test_prune_without_keeping_pins() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);
        store.push_text("x");
        store.toggle_pin(&text_fingerprint("x"));

        assert_eq!(store.prune_older_than(Utc::now() + Duration::days(1), false), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_all_removes_pins() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);
        store.push_text("x");
        store.push_text("y");
        store.toggle_pin(&text_fingerprint("x"));

        assert_eq!(store.clear_all(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_image_removes_blob() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);
        let item = inserted(store.push_image(&checkerboard()));
        let path = item.image_path.clone().unwrap();

        let png = store.image_bytes(&item).unwrap();
        assert_eq!(CapturedImage::from_png(&png).unwrap(), checkerboard());

        assert!(store.delete(&item.id));
        assert!(!path.exists());
        assert!(store.image_bytes(&item).is_none());
    }
}

// =============================================================================
// Persistence Tests
// =============================================================================

mod persistence {
    use super::*;
    use std::fs;

    #[test]
    fn test_reload_restores_same_history() {
        let dir = tempdir().unwrap();

        let saved = {
            let store = json_store(dir.path());
            store.push_text("first");
            store.push_text("https://example.com");
            store.push_image(&checkerboard());
            store.toggle_pin(&text_fingerprint("first"));
            store.increment_use_count(&text_fingerprint("first"));
            store.items()
        };

        let reloaded = json_store(dir.path());
        assert_eq!(reloaded.items(), saved);
    }

    #[test]
    fn test_missing_document_is_empty() {
        let dir = tempdir().unwrap();
        assert!(json_store(dir.path()).is_empty());
    }

    #[test]
    fn test_corrupt_document_is_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("history.json"), b"{ not json").unwrap();

        let store = json_store(dir.path());
        assert!(store.is_empty());

        // Still usable after a bad load
        store.push_text("recovered");
        assert_eq!(json_store(dir.path()).len(), 1);
    }

    #[test]
    fn test_document_layout() {
        let dir = tempdir().unwrap();
        let store = json_store(dir.path());
        store.push_text("hello");

        let raw = fs::read_to_string(dir.path().join("history.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &json.as_array().unwrap()[0];
        assert_eq!(entry["id"], text_fingerprint("hello"));
        assert_eq!(entry["kind"], "text");
        assert_eq!(entry["text"], "hello");
        assert!(entry["ts"].is_i64());
    }
}

// =============================================================================
// Query Tests
// =============================================================================

mod query {
    use super::*;

    #[test]
    fn test_kind_and_text_filters() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);
        store.push_text("https://rust-lang.org");
        store.push_text("Rust is fun");
        store.push_image(&checkerboard());

        let links = store.query(&HistoryQuery::all().with_kind(ClipKind::Link));
        assert_eq!(links.len(), 1);

        let rust = store.query(&HistoryQuery::all().with_text("RUST"));
        assert_eq!(rust.len(), 2);

        let images = store.query(&HistoryQuery::all().with_text("image"));
        assert_eq!(images.len(), 1);
        assert!(images[0].is_image());
    }

    #[test]
    fn test_time_label_search() {
        let dir = tempdir().unwrap();
        let store = memory_store(dir.path(), 200);
        let item = inserted(store.push_text("whatever"));

        let later = item.timestamp + Duration::minutes(7);
        let hits = store.query_at(&HistoryQuery::all().with_text("7m ago"), later);
        assert_eq!(ids(&hits), vec![item.id]);
    }
}

// =============================================================================
// Attribution Tests
// =============================================================================

mod attribution {
    use super::*;

    struct Editor;

    impl ActiveAppProvider for Editor {
        fn get_active_app(&self) -> Option<AppInfo> {
            Some(AppInfo::new("com.example.Editor").with_name("Editor"))
        }
    }

    impl AppIconProvider for Editor {
        fn icon_png(&self, _app: &AppInfo) -> Option<Vec<u8>> {
            Some(b"png".to_vec())
        }
    }

    #[test]
    fn test_capture_records_source_app() {
        let dir = tempdir().unwrap();
        let blobs = BlobStore::in_dir(dir.path());
        let store = HistoryStore::open(
            Arc::new(MemoryDocument::new()),
            Arc::new(AppAttributor::new(
                Arc::new(Editor),
                Arc::new(Editor),
                blobs.clone(),
            )),
            blobs.clone(),
            200,
        );

        let item = inserted(store.push_text("from the editor"));
        assert_eq!(item.source_app_name.as_deref(), Some("Editor"));
        assert_eq!(item.source_app_id.as_deref(), Some("com.example.Editor"));
        let icon = item.source_icon_path.unwrap();
        assert_eq!(icon, blobs.icon_path("com.example.Editor"));
        assert!(icon.exists());
    }
}
