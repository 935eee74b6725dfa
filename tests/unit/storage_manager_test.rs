//! Unit tests for the persistent key-value stores.

use std::sync::Arc;

use chapter_reader::database::Database;
use chapter_reader::managers::storage_manager::{MemoryStorage, SqliteStorage, StorageManagerTrait};
use tempfile::TempDir;

fn exercise(store: &mut dyn StorageManagerTrait) {
    assert!(store.get_item("fontSize").unwrap().is_none());
    store.set_item("fontSize", "21").unwrap();
    store.set_item("scrollPos_b1_c1", "500").unwrap();
    assert_eq!(store.get_item("fontSize").unwrap().as_deref(), Some("21"));
    assert_eq!(
        store.keys().unwrap(),
        vec!["fontSize".to_string(), "scrollPos_b1_c1".to_string()]
    );
    store.remove_item("scrollPos_b1_c1").unwrap();
    store.remove_item("never-written").unwrap();
    assert!(store.get_item("scrollPos_b1_c1").unwrap().is_none());
    store.clear().unwrap();
    assert!(store.keys().unwrap().is_empty());
}

#[test]
fn test_memory_storage_contract() {
    exercise(&mut MemoryStorage::new());
}

#[test]
fn test_sqlite_storage_contract() {
    exercise(&mut SqliteStorage::in_memory("reader").unwrap());
}

#[test]
fn test_sqlite_storage_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reader.db");
    {
        let db = Arc::new(Database::open(&path).unwrap());
        let mut store = SqliteStorage::new(db, "reader");
        store.set_item("darkMode", "true").unwrap();
    }
    let db = Arc::new(Database::open(&path).unwrap());
    let store = SqliteStorage::new(db, "reader");
    assert_eq!(store.get_item("darkMode").unwrap().as_deref(), Some("true"));
    assert_eq!(store.origin(), "reader");
}

#[test]
fn test_clear_only_affects_own_origin() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let mut a = SqliteStorage::new(db.clone(), "a");
    let mut b = SqliteStorage::new(db, "b");
    a.set_item("fontSize", "20").unwrap();
    b.set_item("fontSize", "24").unwrap();
    a.clear().unwrap();
    assert!(a.get_item("fontSize").unwrap().is_none());
    assert_eq!(b.get_item("fontSize").unwrap().as_deref(), Some("24"));
}
