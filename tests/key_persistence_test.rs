//! Key lifecycle against the JSON file store.

use chrono::{Duration, Utc};
use indexnow::adapters::mock::MockClock;
use indexnow::adapters::FileKeyStore;
use indexnow::key_manager::KeyManager;
use indexnow::traits::{Clock, KeyStore};
use std::sync::Arc;

fn manager(store: &FileKeyStore, clock: &MockClock) -> KeyManager {
    KeyManager::new(Arc::new(store.clone()), Arc::new(clock.clone()))
}

#[tokio::test]
async fn test_key_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyStore::new(dir.path().join("state").join("key.json"));
    let clock = MockClock::default();

    let first = manager(&store, &clock).get_active_key().await.unwrap();
    let second = manager(&store, &clock).get_active_key().await.unwrap();

    assert_eq!(first, second);
    assert!(store.path().exists());
}

#[tokio::test]
async fn test_rotation_is_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyStore::new(dir.path().join("key.json"));
    let clock = MockClock::new(Utc::now());
    let km = manager(&store, &clock);

    let old = km.get_active_key().await.unwrap();
    clock.advance(Duration::days(7));
    assert!(km.rotate_if_expired(clock.now()).await.unwrap());

    let on_disk = store.load().await.unwrap().unwrap();
    assert_ne!(on_disk.value(), old.value());
    assert_eq!(on_disk, km.get_active_key().await.unwrap());
    assert!(!dir.path().join("key.json.tmp").exists());
}

#[tokio::test]
async fn test_second_process_adopts_rotation() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyStore::new(dir.path().join("key.json"));
    let clock = MockClock::default();
    let a = manager(&store, &clock);
    let b = manager(&store, &clock);

    let original = a.get_active_key().await.unwrap();
    assert_eq!(b.get_active_key().await.unwrap(), original);

    clock.advance(Duration::days(8));
    let now = clock.now();
    assert!(a.rotate_if_expired(now).await.unwrap());
    assert!(!b.rotate_if_expired(now).await.unwrap());

    assert_eq!(
        a.get_active_key().await.unwrap(),
        b.get_active_key().await.unwrap()
    );
}
