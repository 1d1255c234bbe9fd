/// Persistence layer with same-day retention
///
/// Wraps a [`ReportBackend`] with the policy the rest of the crate relies on:
/// storage failures are logged and swallowed, the in-memory report stays
/// authoritative, and a stored report from an earlier date is discarded.
use crate::core::clock::Clock;
use crate::core::report_store::{ReportStore, METADATA_KEY};
use crate::storage::backup::{read_backup, remove_backup, write_backup};
use crate::storage::sqlite::SqliteStore;
use crate::storage::traits::{BlobStats, ReportBackend, StoredBlob};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

pub struct Persistence {
    backend: Arc<dyn ReportBackend>,
    clock: Arc<dyn Clock>,
    backup_path: Option<PathBuf>,
    /// Serializes metadata writes in call order
    write_lock: Mutex<()>,
}

impl Persistence {
    pub fn new(backend: Arc<dyn ReportBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            backup_path: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Enable the JSON sidecar used as a fallback copy
    pub fn with_backup(mut self, path: impl Into<PathBuf>) -> Self {
        self.backup_path = Some(path.into());
        self
    }

    /// SQLite database at `database` with its sidecar next to it
    pub fn open(database: &Path, clock: Arc<dyn Clock>) -> crate::Result<Self> {
        let store = SqliteStore::open(database)?;
        Ok(Self::new(Arc::new(store), clock)
            .with_backup(crate::core::paths::backup_path_for(database)))
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Write the report under today's date. Never fails: an error is logged
    /// and a tasks-only copy goes to the sidecar instead.
    pub async fn save(&self, report: &ReportStore) {
        let date = self.clock.date_stamp();
        let payload = report.snapshot_for_date(&date);

        let _guard = self.write_lock.lock().await;
        match self.backend.put_payload(&payload).await {
            Ok(()) => debug!(
                "Saved report for {} ({} tasks, {} photos)",
                date,
                report.task_count(),
                report.photo_count()
            ),
            Err(e) => {
                error!("Failed to save report: {}", e);
                if let Some(path) = &self.backup_path {
                    if let Err(e2) = write_backup(path, &date, &report.tasks_only()) {
                        error!("Fallback save also failed: {}", e2);
                    }
                }
            }
        }
    }

    /// Today's report, or an empty one.
    ///
    /// A row from an earlier date is treated as absent, and an empty report
    /// is written under today's date right away.
    pub async fn load(&self) -> ReportStore {
        let today = self.clock.date_stamp();

        match self.backend.get_payload(METADATA_KEY).await {
            Ok(Some(payload)) => {
                if payload.date == today {
                    info!("Loaded report for {}", today);
                    let mut report = ReportStore::new();
                    report.restore(payload);
                    return report;
                }
                info!(
                    "New day detected ({} -> {}), clearing old report",
                    payload.date, today
                );
                let report = ReportStore::new();
                self.save(&report).await;
                return report;
            }
            Ok(None) => debug!("No stored report, checking sidecar backup"),
            Err(e) => error!("Report load failed, trying sidecar backup: {}", e),
        }

        self.load_backup(&today).await.unwrap_or_default()
    }

    async fn load_backup(&self, today: &str) -> Option<ReportStore> {
        let path = self.backup_path.as_ref()?;
        let backup = match read_backup(path) {
            Ok(backup) => backup,
            Err(e) => {
                warn!("Ignoring unreadable sidecar backup: {}", e);
                None
            }
        };
        if let Err(e) = remove_backup(path) {
            warn!("Failed to remove sidecar backup: {}", e);
        }

        let backup = backup?;
        if backup.date != today {
            debug!("Discarding sidecar backup from {}", backup.date);
            return None;
        }
        info!("Recovered report from sidecar backup");
        self.save(&backup.data).await;
        Some(backup.data)
    }

    /// Synchronous last-resort copy of the full report, for the exit hook
    pub fn write_exit_backup(&self, report: &ReportStore) {
        if let Some(path) = &self.backup_path {
            if let Err(e) = write_backup(path, &self.clock.date_stamp(), report) {
                warn!("Exit backup failed: {}", e);
            }
        }
    }

    /// Store photo bytes; returns whether the blob was written.
    pub async fn put_blob(&self, id: &str, bytes: Vec<u8>, timestamp: i64) -> bool {
        match self
            .backend
            .put_blob(id, StoredBlob { bytes, timestamp })
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to store photo {}: {}", id, e);
                false
            }
        }
    }

    /// Photo bytes, or `None` when missing or unreadable
    pub async fn get_blob(&self, id: &str) -> Option<Vec<u8>> {
        match self.backend.get_blob(id).await {
            Ok(Some(blob)) => Some(blob.bytes),
            Ok(None) => {
                warn!("Photo {} is missing from the blob store", id);
                None
            }
            Err(e) => {
                error!("Failed to read photo {}: {}", id, e);
                None
            }
        }
    }

    pub async fn delete_blob(&self, id: &str) -> bool {
        match self.backend.delete_blob(id).await {
            Ok(existed) => existed,
            Err(e) => {
                error!("Failed to delete photo {}: {}", id, e);
                false
            }
        }
    }

    pub async fn blob_stats(&self) -> BlobStats {
        self.backend.blob_stats().await.unwrap_or_else(|e| {
            error!("Failed to read blob statistics: {}", e);
            BlobStats::default()
        })
    }
}
