use bookmarktree::bookmarks::{BookmarkStore, JsonFileStore, StoreError};
use bookmarktree::tui::{AppMode, ColorMode};
use bookmarktree::{App, Config};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const BOOKMARKS: &str = r#"{
   "checksum": "0123456789abcdef",
   "roots": {
      "bookmark_bar": {
         "children": [ {
            "children": [ {
               "date_added": "13300000000000000",
               "guid": "a1",
               "id": "3",
               "name": "Email",
               "type": "url",
               "url": "https://mail.example.com/"
            } ],
            "id": "2",
            "name": "Work",
            "type": "folder"
         }, {
            "id": "4",
            "name": "News",
            "type": "url",
            "url": "https://news.example.com/"
         } ],
         "id": "1",
         "name": "Bookmarks bar",
         "type": "folder"
      },
      "other": {
         "children": [ ],
         "id": "5",
         "name": "Other bookmarks",
         "type": "folder"
      },
      "synced": {
         "children": [ ],
         "id": "6",
         "name": "Mobile bookmarks",
         "type": "folder"
      }
   },
   "version": 1
}"#;

fn bookmarks_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Bookmarks");
    fs::write(&path, BOOKMARKS).unwrap();
    (dir, path)
}

#[test]
fn reads_roots_in_display_order() {
    let (_dir, path) = bookmarks_file();
    let store = JsonFileStore::new(&path);

    let tree = store.get_tree().unwrap();
    let titles: Vec<_> = tree.top_level().iter().map(|n| n.title()).collect();
    assert_eq!(
        titles,
        vec![
            Some("Bookmarks bar"),
            Some("Other bookmarks"),
            Some("Mobile bookmarks")
        ]
    );
    assert_eq!(tree.bookmark_count(), 2);
}

#[test]
fn remove_rewrites_file_and_keeps_unknown_fields() {
    let (_dir, path) = bookmarks_file();
    let store = JsonFileStore::new(&path);

    store.remove("4").unwrap();

    let tree = store.get_tree().unwrap();
    assert!(tree.find("4").is_none());
    assert!(tree.find("3").is_some());

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.get("checksum").is_none());
    let email = &raw["roots"]["bookmark_bar"]["children"][0]["children"][0];
    assert_eq!(email["guid"], "a1");
    assert_eq!(email["date_added"], "13300000000000000");
}

#[test]
fn remove_refuses_roots_and_unknown_ids() {
    let (_dir, path) = bookmarks_file();
    let store = JsonFileStore::new(&path);

    assert!(matches!(store.remove("1"), Err(StoreError::RootFolder(_))));
    assert!(matches!(store.remove("2"), Err(StoreError::NonEmptyFolder(_))));
    assert!(matches!(store.remove("99"), Err(StoreError::NotFound(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), BOOKMARKS);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let (_dir, path) = bookmarks_file();
    fs::write(&path, "{ not json").unwrap();
    let store = JsonFileStore::new(&path);
    assert!(matches!(store.get_tree(), Err(StoreError::Parse(_))));
}

#[test]
fn app_deletes_through_the_file_store() {
    let (_dir, path) = bookmarks_file();
    let store = Arc::new(JsonFileStore::new(&path));
    let mut app = App::new(store.clone(), Config::default(), ColorMode::Rgb);

    app.load_and_render();
    app.wait_for_store(Duration::from_secs(5));

    app.search_query = "news".to_string();
    app.render_for_query();
    assert!(app.select_by_id("4"));

    app.request_delete();
    assert_eq!(app.mode, AppMode::ConfirmDelete);
    app.confirm_delete();
    app.wait_for_store(Duration::from_secs(5));

    // Reloaded with the same query, which now matches nothing
    assert!(app.visible_rows().is_empty());
    assert!(store.get_tree().unwrap().find("4").is_none());
}

#[test]
fn app_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("Bookmarks")));
    let mut app = App::new(store, Config::default(), ColorMode::Rgb);

    app.load_and_render();
    app.wait_for_store(Duration::from_secs(5));

    assert_eq!(app.status_message.as_deref(), Some("Failed to load bookmarks."));
    assert!(app.visible_rows().is_empty());
}
