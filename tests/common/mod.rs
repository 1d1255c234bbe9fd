/// Common test utilities for sitelog integration tests
///
/// Provides a temporary environment and an in-memory backend that can stall
/// a photo lookup or reject every call.
use async_trait::async_trait;
use chrono::NaiveDate;
use sitelog::core::clock::FixedClock;
use sitelog::core::report_store::PersistedPayload;
use sitelog::storage::{BlobStats, BlobStore, MetadataStore, StoredBlob};
use sitelog::{Persistence, SiteLogError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::oneshot;

/// Test environment that manages a temporary directory and cleanup
pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub home: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let home = temp_dir.path().join("sitelog_test");
        std::fs::create_dir_all(&home).expect("Failed to create test home");

        TestEnvironment {
            _temp_dir: temp_dir,
            home,
        }
    }

    /// Get a path within the test environment
    pub fn path(&self, relative: &str) -> PathBuf {
        self.home.join(relative)
    }
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

pub fn fixed_clock(month: u32, day: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(date(month, day)))
}

/// Metadata rows and blobs kept in process memory
#[derive(Default)]
pub struct MemoryBackend {
    rows: Mutex<HashMap<String, PersistedPayload>>,
    blobs: Mutex<HashMap<String, StoredBlob>>,
    failing: AtomicBool,
    hold: Mutex<Option<oneshot::Receiver<()>>>,
}

#[allow(dead_code)]
impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with a database error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Stall the next `get_blob` until the returned sender fires or drops
    pub fn hold_next_blob(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.hold.lock().unwrap() = Some(rx);
        tx
    }

    pub fn row(&self, key: &str) -> Option<PersistedPayload> {
        self.rows.lock().unwrap().get(key).cloned()
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    fn check(&self) -> sitelog::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SiteLogError::Database("storage unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataStore for MemoryBackend {
    async fn get_payload(&self, key: &str) -> sitelog::Result<Option<PersistedPayload>> {
        self.check()?;
        Ok(self.row(key))
    }

    async fn put_payload(&self, payload: &PersistedPayload) -> sitelog::Result<()> {
        self.check()?;
        self.rows
            .lock()
            .unwrap()
            .insert(payload.id.clone(), payload.clone());
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBackend {
    async fn put_blob(&self, id: &str, blob: StoredBlob) -> sitelog::Result<()> {
        self.check()?;
        self.blobs.lock().unwrap().insert(id.to_string(), blob);
        Ok(())
    }

    async fn get_blob(&self, id: &str) -> sitelog::Result<Option<StoredBlob>> {
        let held = self.hold.lock().unwrap().take();
        if let Some(rx) = held {
            let _ = rx.await;
        }
        self.check()?;
        Ok(self.blobs.lock().unwrap().get(id).cloned())
    }

    async fn delete_blob(&self, id: &str) -> sitelog::Result<bool> {
        self.check()?;
        Ok(self.blobs.lock().unwrap().remove(id).is_some())
    }

    async fn blob_stats(&self) -> sitelog::Result<BlobStats> {
        self.check()?;
        let blobs = self.blobs.lock().unwrap();
        Ok(BlobStats {
            total_blobs: blobs.len(),
            total_size: blobs.values().map(|b| b.bytes.len()).sum(),
        })
    }
}

/// Persistence over a fresh [`MemoryBackend`] with its sidecar in `env`
#[allow(dead_code)]
pub fn memory_persistence(
    env: &TestEnvironment,
    clock: Arc<FixedClock>,
) -> (Arc<MemoryBackend>, Arc<Persistence>) {
    let backend = Arc::new(MemoryBackend::new());
    let persistence =
        Persistence::new(backend.clone(), clock).with_backup(env.path("report.backup.json"));
    (backend, Arc::new(persistence))
}
