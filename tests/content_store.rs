// tests/content_store.rs
mod common;

use std::fs;

use common::{fixture, files_in, url, FakePortal, BASE};
use vitibrasil_scrape::report::{CacheKey, ReportKind, SourceLocator};
use vitibrasil_scrape::store::{ContentStore, StoreError};

fn production_2023() -> (SourceLocator, CacheKey) {
    (
        SourceLocator::new(BASE, ReportKind::Production, 2023, None),
        CacheKey::new(ReportKind::Production, None, 2023),
    )
}

#[test]
fn miss_fetches_once_and_writes_one_file() {
    let tmp = tempfile::tempdir().unwrap();
    let portal = FakePortal::new();
    portal.serve(&url("ano=2023&opcao=opt_02"), fixture("producao_2023.html"));
    let store = ContentStore::new(tmp.path(), portal.clone());

    let (loc, key) = production_2023();
    assert!(!store.is_cached(&key));
    let bytes = store.fetch_or_cache(&loc, &key).unwrap();

    assert_eq!(portal.call_count(), 1);
    assert_eq!(files_in(tmp.path()), vec!["producao_2023.html"]);
    assert_eq!(fs::read(store.path_for(&key)).unwrap(), bytes);
}

#[test]
fn hit_returns_identical_bytes_without_network() {
    let tmp = tempfile::tempdir().unwrap();
    let portal = FakePortal::new();
    portal.serve(&url("ano=2023&opcao=opt_02"), fixture("producao_2023.html"));
    let store = ContentStore::new(tmp.path(), portal.clone());
    let (loc, key) = production_2023();

    let first = store.fetch_or_cache(&loc, &key).unwrap();
    let second = store.fetch_or_cache(&loc, &key).unwrap();

    assert_eq!(first, second);
    assert_eq!(portal.call_count(), 1);
}

#[test]
fn existing_entry_is_never_refetched_or_overwritten() {
    let tmp = tempfile::tempdir().unwrap();
    let portal = FakePortal::new();
    let store = ContentStore::new(tmp.path(), portal.clone());
    let (loc, key) = production_2023();

    // Whatever is on disk wins, even if it is not a valid page.
    fs::write(store.path_for(&key), b"stale but kept").unwrap();
    let bytes = store.fetch_or_cache(&loc, &key).unwrap();

    assert_eq!(bytes, b"stale but kept");
    assert_eq!(portal.call_count(), 0);
}

#[test]
fn fetch_failure_leaves_no_file() {
    let tmp = tempfile::tempdir().unwrap();
    let portal = FakePortal::new();
    let store = ContentStore::new(tmp.path(), portal.clone());
    let (loc, key) = production_2023();

    let err = store.fetch_or_cache(&loc, &key).unwrap_err();

    assert!(matches!(err, StoreError::Fetch(_)));
    assert!(err.to_string().contains("503"));
    assert!(files_in(tmp.path()).is_empty());
    assert!(!store.is_cached(&key));
}

#[test]
fn cache_dir_is_created_on_demand() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("nested").join("cache");
    let portal = FakePortal::new();
    portal.serve(&url("ano=2023&opcao=opt_02"), b"<html></html>".to_vec());
    let store = ContentStore::new(&dir, portal.clone());
    let (loc, key) = production_2023();

    store.fetch_or_cache(&loc, &key).unwrap();
    assert!(dir.join("producao_2023.html").is_file());
}

#[test]
fn cache_dir_blocked_by_a_file_is_an_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("cache");
    fs::write(&blocker, b"not a dir").unwrap();
    let portal = FakePortal::new();
    let store = ContentStore::new(&blocker, portal.clone());
    let (loc, key) = production_2023();

    let err = store.fetch_or_cache(&loc, &key).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(portal.call_count(), 0);
}
