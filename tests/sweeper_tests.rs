/// Retention sweeper tests
///
/// Sweep correctness, failure isolation and the timer loop.
/// Run with: cargo test --test sweeper_tests

use async_trait::async_trait;
use chrono::{Duration, Utc};
use pastebox::{
    EncodedContent, MemoryStore, Paste, PasteError, PasteId, PasteStore, Result, Severity,
    Sweeper, SweeperOpts, codec, event_channel, id,
};
use std::sync::Arc;
use tokio::sync::Mutex;

fn paste_with_age(hours_old: i64, lifetime_hours: u32) -> Paste {
    Paste {
        id: id::new_id(),
        lifetime_hours,
        content: codec::encode("content"),
        delete_on_read: false,
        created: Utc::now() - Duration::hours(hours_old),
        password: EncodedContent::empty(),
    }
}

#[tokio::test]
async fn test_sweep_deletes_exactly_the_expired_pastes() {
    let store = Arc::new(MemoryStore::new());
    let expired = paste_with_age(2, 1);
    let fresh = paste_with_age(1, 24);
    store.create(&expired).await.unwrap();
    store.create(&fresh).await.unwrap();

    let (events, _rx) = event_channel(100);
    let sweeper = Sweeper::new(store.clone(), events);
    let stats = sweeper.sweep().await;

    assert_eq!(stats.scanned, 2);
    assert_eq!(stats.deleted, 1);
    assert_eq!(stats.failed, 0);
    assert!(store.read(&expired.id).await.unwrap_err().is_not_found());
    assert_eq!(store.read(&fresh.id).await.unwrap(), fresh);
}

#[tokio::test]
async fn test_sweep_on_empty_store_is_a_noop() {
    let store = Arc::new(MemoryStore::new());
    let (events, _rx) = event_channel(100);
    let stats = Sweeper::new(store, events).sweep().await;
    assert_eq!(stats.scanned, 0);
    assert_eq!(stats.deleted, 0);
}

/// Store wrapper whose list operation fails until told otherwise.
struct FlakyListStore {
    inner: Arc<MemoryStore>,
    list_failures_left: Mutex<usize>,
}

#[async_trait]
impl PasteStore for FlakyListStore {
    async fn create(&self, paste: &Paste) -> Result<()> {
        self.inner.create(paste).await
    }

    async fn read(&self, id: &PasteId) -> Result<Paste> {
        self.inner.read(id).await
    }

    async fn delete(&self, id: &PasteId) -> Result<()> {
        self.inner.delete(id).await
    }

    async fn list_all(&self) -> Result<Vec<Paste>> {
        let mut left = self.list_failures_left.lock().await;
        if *left > 0 {
            *left -= 1;
            return Err(PasteError::Unavailable("scan timed out".into()));
        }
        self.inner.list_all().await
    }
}

#[tokio::test]
async fn test_list_failure_aborts_sweep_but_not_the_next_one() {
    let inner = Arc::new(MemoryStore::new());
    let expired = paste_with_age(2, 1);
    inner.create(&expired).await.unwrap();

    let store = Arc::new(FlakyListStore { inner: inner.clone(), list_failures_left: Mutex::new(1) });
    let (events, mut rx) = event_channel(100);
    let sweeper = Sweeper::new(store, events);

    // First sweep aborts: nothing scanned, nothing deleted, error reported.
    let stats = sweeper.sweep().await;
    assert_eq!(stats.scanned, 0);
    assert_eq!(stats.deleted, 0);
    let event = rx.recv().await.unwrap();
    assert_eq!(event.severity, Severity::Error);
    assert_eq!(event.source, "sweeper");

    // The failure was not fatal: the next sweep reclaims the paste.
    let stats = sweeper.sweep().await;
    assert_eq!(stats.deleted, 1);
    assert!(inner.is_empty().await);
}

/// Store wrapper that refuses to delete one particular id.
struct StuckDeleteStore {
    inner: Arc<MemoryStore>,
    stuck_id: PasteId,
}

#[async_trait]
impl PasteStore for StuckDeleteStore {
    async fn create(&self, paste: &Paste) -> Result<()> {
        self.inner.create(paste).await
    }

    async fn read(&self, id: &PasteId) -> Result<Paste> {
        self.inner.read(id).await
    }

    async fn delete(&self, id: &PasteId) -> Result<()> {
        if *id == self.stuck_id {
            return Err(PasteError::Unavailable("delete rejected".into()));
        }
        self.inner.delete(id).await
    }

    async fn list_all(&self) -> Result<Vec<Paste>> {
        self.inner.list_all().await
    }
}

#[tokio::test]
async fn test_delete_failure_does_not_stop_the_sweep() {
    let inner = Arc::new(MemoryStore::new());
    let stuck = paste_with_age(3, 1);
    let expired = paste_with_age(2, 1);
    inner.create(&stuck).await.unwrap();
    inner.create(&expired).await.unwrap();

    let store = Arc::new(StuckDeleteStore { inner: inner.clone(), stuck_id: stuck.id.clone() });
    let (events, _rx) = event_channel(100);
    let stats = Sweeper::new(store, events).sweep().await;

    assert_eq!(stats.scanned, 2);
    assert_eq!(stats.deleted, 1);
    assert_eq!(stats.failed, 1);
    // The deletable one is gone even though the other delete failed.
    assert!(inner.read(&expired.id).await.unwrap_err().is_not_found());
    assert_eq!(inner.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_spawned_sweeper_fires_on_its_interval() {
    let store = Arc::new(MemoryStore::new());
    let expired = paste_with_age(2, 1);
    store.create(&expired).await.unwrap();

    let (events, _rx) = event_channel(100);
    let handle = Sweeper::new(store.clone(), events)
        .spawn(SweeperOpts::new(std::time::Duration::from_secs(60)));

    // Before the first tick the paste is still there.
    assert_eq!(store.len().await, 1);

    // Paused clock: sleeping past the interval auto-advances time and
    // lets the sweep run.
    tokio::time::sleep(std::time::Duration::from_secs(61)).await;
    tokio::task::yield_now().await;
    assert!(store.is_empty().await);

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_end_to_end_ttl_expiry() {
    let store = Arc::new(MemoryStore::new());
    let (events, _rx) = event_channel(100);
    let engine = pastebox::LifecycleEngine::new(store.clone(), event_channel(100).0);
    let sweeper = Sweeper::new(store.clone(), events);

    // Fresh one-hour paste: readable, untouched by a sweep.
    let paste = engine.create_paste("hello", 1, false).await.unwrap();
    let fetched = engine.get_paste(&paste.id).await.unwrap();
    assert_eq!(codec::decode(&fetched.content).unwrap(), "hello");
    sweeper.sweep().await;
    assert_eq!(store.len().await, 1);

    // Simulate the hour passing by re-creating the paste backdated.
    store.delete(&paste.id).await.unwrap();
    let paste = Paste { created: Utc::now() - Duration::hours(2), ..paste };
    store.create(&paste).await.unwrap();

    let stats = sweeper.sweep().await;
    assert_eq!(stats.deleted, 1);
    let err = engine.get_paste(&paste.id).await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}
