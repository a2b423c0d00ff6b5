use chrono::{TimeZone, Utc};
use recordkeep_core::{InventoryItem, InventoryLog, InventoryLogError, JsonFileStore, StoreError};
use std::collections::HashSet;

fn sample_items() -> Vec<InventoryItem> {
    let added = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
    vec![
        InventoryItem::new(1, "Keyboard", 10, added),
        InventoryItem::new(2, "Mouse", 20, added),
        InventoryItem::new(3, "Monitor", 5, added),
    ]
}

#[test]
fn load_after_save_returns_same_set() {
    let dir = tempfile::tempdir().unwrap();
    let store: JsonFileStore<InventoryItem> = JsonFileStore::new(dir.path().join("inventory.json"));
    let items = sample_items();

    store.save(&items).unwrap();
    let loaded = store.load().unwrap();

    let expected: HashSet<_> = items.iter().map(|item| item.id).collect();
    let actual: HashSet<_> = loaded.iter().map(|item| item.id).collect();
    assert_eq!(actual, expected);
    for item in &items {
        assert!(loaded.contains(item));
    }
}

#[test]
fn load_missing_store_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store: JsonFileStore<InventoryItem> = JsonFileStore::new(dir.path().join("absent.json"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn malformed_store_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    std::fs::write(&path, "[{\"id\": 1, \"name\": \"Keyboard\"").unwrap();

    let store: JsonFileStore<InventoryItem> = JsonFileStore::new(&path);
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Deserialize { .. }));
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store: JsonFileStore<InventoryItem> = JsonFileStore::new(dir.path().join("inventory.json"));
    store.save(&sample_items()).unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["inventory.json".to_string()]);
}

#[test]
fn save_into_missing_directory_fails_with_io() {
    let dir = tempfile::tempdir().unwrap();
    let store: JsonFileStore<InventoryItem> =
        JsonFileStore::new(dir.path().join("nope").join("inventory.json"));
    let err = store.save(&sample_items()).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn stored_json_uses_expected_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let store: JsonFileStore<InventoryItem> = JsonFileStore::new(&path);
    store.save(&sample_items()[..1]).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["name"], "Keyboard");
    assert_eq!(json[0]["quantity"], 10);
    assert_eq!(json[0]["date_added"], "2026-02-13T10:00:00Z");
}

#[test]
fn inventory_log_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");

    let mut log: InventoryLog<InventoryItem> = InventoryLog::new(&path);
    for item in sample_items() {
        log.add(item).unwrap();
    }
    log.save().unwrap();

    let mut reloaded: InventoryLog<InventoryItem> = InventoryLog::new(&path);
    assert!(reloaded.is_empty());
    reloaded.load().unwrap();
    assert_eq!(reloaded.len(), 3);

    let mut listed = reloaded.list();
    listed.sort_by_key(|item| item.id);
    assert_eq!(listed, sample_items());
}

#[test]
fn inventory_log_rejects_store_with_duplicate_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let mut items = sample_items();
    items.push(items[0].clone());
    let store: JsonFileStore<InventoryItem> = JsonFileStore::new(&path);
    store.save(&items).unwrap();

    let mut log: InventoryLog<InventoryItem> = InventoryLog::new(&path);
    let added = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    log.add(InventoryItem::new(9, "Cable", 1, added)).unwrap();

    let err = log.load().unwrap_err();
    assert!(matches!(err, InventoryLogError::DuplicateId(ref dup) if dup.id == 1));
    assert_eq!(log.len(), 1);
    assert_eq!(log.list()[0].id, 9);
}

#[test]
fn inventory_log_load_of_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut log: InventoryLog<InventoryItem> = InventoryLog::new(dir.path().join("fresh.json"));
    log.load().unwrap();
    assert!(log.is_empty());
}

#[test]
fn inventory_log_debug_names_backing_file() {
    let mut log: InventoryLog<InventoryItem> = InventoryLog::new("/data/inventory.json");
    log.add(sample_items().remove(0)).unwrap();

    let rendered = format!("{log:?}");
    assert!(rendered.starts_with("InventoryLog {"));
    assert!(rendered.contains("/data/inventory.json"));
    assert!(rendered.contains("Keyboard"));
}
