// SPDX-License-Identifier: MIT

//! Integration tests over the file backend, which behaves identically on
//! every platform. Each test works against a plist inside its own tempdir.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};

use tempfile::TempDir;
use userdefaults::{BackendKind, DefaultsError, Domain, UserDefaults, Value};

fn plist_domain(dir: &TempDir) -> Domain {
    Domain::Path(dir.path().join("com.example.test.plist"))
}

#[test]
fn path_domain_uses_file_backend() {
    let dir = tempfile::tempdir().unwrap();
    let store = UserDefaults::open(plist_domain(&dir)).unwrap();
    assert_eq!(store.backend(), BackendKind::File);
}

#[test]
fn nonexistent_path_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = UserDefaults::open(plist_domain(&dir)).unwrap();
    assert!(store.is_empty().unwrap());
    assert_eq!(store.keys().unwrap(), Vec::<String>::new());
}

#[test]
fn set_get_remove_contains() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = UserDefaults::open(plist_domain(&dir)).unwrap();

    store.set("count", 5).unwrap();
    assert_eq!(store.get("count").unwrap().as_i64(), Some(5));

    store.remove("count").unwrap();
    assert!(!store.contains("count"));

    // absent key: remove is a no-op, get raises
    store.remove("count").unwrap();
    assert!(matches!(
        store.get("count"),
        Err(DefaultsError::KeyNotFound(key)) if key == "count"
    ));
}

#[test]
fn values_round_trip_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let domain = plist_domain(&dir);

    let mut nested = HashMap::new();
    nested.insert("enabled".to_string(), Value::Boolean(true));
    nested.insert("ratio".to_string(), Value::Real(0.25));

    let values: Vec<(&str, Value)> = vec![
        ("flag", Value::Boolean(false)),
        ("count", Value::Integer(-7)),
        ("scale", Value::Real(1.5)),
        ("name", Value::String("defaults".into())),
        ("blob", Value::Data(vec![0u8, 9, 255])),
        (
            "stamp",
            Value::Date(UNIX_EPOCH + Duration::from_secs(1_600_000_000)),
        ),
        (
            "list",
            Value::Array(vec![Value::Integer(1), Value::String("two".into())]),
        ),
        ("prefs", Value::Dictionary(nested)),
    ];

    let mut store = UserDefaults::open(domain.clone()).unwrap();
    for (key, value) in &values {
        store.set(key, value.clone()).unwrap();
    }
    store.sync().unwrap();

    let reopened = UserDefaults::open(domain).unwrap();
    for (key, value) in &values {
        assert_eq!(&reopened.get(key).unwrap(), value, "key {key}");
    }
    assert_eq!(reopened.len().unwrap(), values.len());
}

#[test]
fn integer_subtypes_collapse_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = UserDefaults::open(plist_domain(&dir)).unwrap();

    store.set("small", 5i32).unwrap();
    store.set("unsigned", 5u32).unwrap();
    assert_eq!(store.get("small").unwrap(), Value::Integer(5));
    assert_eq!(store.get("unsigned").unwrap(), Value::Integer(5));
}

#[test]
fn sync_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("com.example.test.plist");
    let mut store = UserDefaults::open(Domain::Path(path.clone())).unwrap();

    store.set("a", 1).unwrap();
    store.set("b", "two").unwrap();

    store.sync().unwrap();
    let first = fs::read(&path).unwrap();
    store.sync().unwrap();
    let second = fs::read(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn mutations_are_memory_only_until_sync() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("com.example.test.plist");

    let mut store = UserDefaults::open(Domain::Path(path.clone())).unwrap();
    store.set("pending", true).unwrap();
    assert!(!path.exists());

    store.sync().unwrap();
    assert!(path.exists());
}

#[test]
fn scoped_use_syncs_on_error_paths() {
    let dir = tempfile::tempdir().unwrap();
    let domain = plist_domain(&dir);

    let result: Result<(), DefaultsError> = UserDefaults::scoped(domain.clone(), |store| {
        store.set("persisted", 42)?;
        Err(DefaultsError::Backend("simulated failure".into()))
    });
    assert!(result.is_err());

    // the set before the failure must have been flushed
    let store = UserDefaults::open(domain).unwrap();
    assert_eq!(store.get("persisted").unwrap().as_i64(), Some(42));
}

#[test]
fn scoped_use_returns_closure_value() {
    let dir = tempfile::tempdir().unwrap();
    let count = UserDefaults::scoped(plist_domain(&dir), |store| {
        store.set("count", 3)?;
        store.get("count")
    })
    .unwrap();
    assert_eq!(count, Value::Integer(3));
}

#[test]
fn new_files_are_written_binary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("com.example.test.plist");

    let mut store = UserDefaults::open(Domain::Path(path.clone())).unwrap();
    store.set("k", 1).unwrap();
    store.sync().unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"bplist"));
}

#[test]
fn xml_files_stay_xml_across_sync() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("com.example.test.plist");

    let mut dict = plist::Dictionary::new();
    dict.insert("existing".into(), plist::Value::Integer(1i64.into()));
    plist::Value::Dictionary(dict).to_file_xml(&path).unwrap();

    let mut store = UserDefaults::open(Domain::Path(path.clone())).unwrap();
    store.set("added", "value").unwrap();
    store.sync().unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"<?xml"));

    let reopened = UserDefaults::open(Domain::Path(path)).unwrap();
    assert_eq!(reopened.get("existing").unwrap(), Value::Integer(1));
    assert_eq!(reopened.get("added").unwrap(), Value::String("value".into()));
}

#[test]
fn dictionary_snapshot_matches_entries() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = UserDefaults::open(plist_domain(&dir)).unwrap();

    store.set("a", 1).unwrap();
    store.set("b", true).unwrap();

    let snapshot = store.dictionary().unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.get("a"), Some(&Value::Integer(1)));
    assert_eq!(snapshot.get("b"), Some(&Value::Boolean(true)));
    assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn corrupt_plist_propagates_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("com.example.test.plist");
    fs::write(&path, b"not a plist at all").unwrap();

    assert!(matches!(
        UserDefaults::open(Domain::Path(path)),
        Err(DefaultsError::Plist(_))
    ));
}

#[test]
fn last_writer_wins_on_sync() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("com.example.test.plist");
    let domain = Domain::Path(path.clone());

    let mut first = UserDefaults::open(domain.clone()).unwrap();
    first.set("owner", "first").unwrap();
    first.sync().unwrap();

    // an external writer replaces the file while `first` holds its copy
    let mut second = UserDefaults::open(domain.clone()).unwrap();
    second.set("owner", "second").unwrap();
    second.sync().unwrap();

    // the stale in-memory mapping simply overwrites on sync
    first.sync().unwrap();
    let reopened = UserDefaults::open(domain).unwrap();
    assert_eq!(
        reopened.get("owner").unwrap(),
        Value::String("first".into())
    );
}

#[test]
fn suite_store_resolves_under_library_preferences() {
    let store = UserDefaults::with_suite("com.example.suitetest");
    // construction must succeed on any platform; the backend depends on it
    let store = store.unwrap();
    assert_eq!(
        store.domain(),
        &Domain::User("com.example.suitetest".to_string())
    );
    let _: PathBuf = store.domain().path();
}
