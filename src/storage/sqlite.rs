/// SQLite-backed report store
///
/// One database file holds both key spaces as separate tables. A connection
/// is opened per operation and dropped when the operation's transaction
/// completes; every call runs on tokio's blocking pool.
use crate::core::report_store::PersistedPayload;
use crate::storage::traits::{BlobStats, BlobStore, MetadataStore, StoredBlob};
use crate::{Result, SiteLogError};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::{Path, PathBuf};
use tracing::debug;

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and initialize the schema
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let store = Self { path };
        let conn = store.connection()?;
        init_schema(&conn)?;
        debug!("Opened report database at {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connection(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| {
            SiteLogError::Database(format!(
                "failed to open report database at {}: {}",
                self.path.display(),
                e
            ))
        })?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(conn)
    }

    /// Run `f` with a fresh connection on the blocking pool
    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = store.connection()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| SiteLogError::Other(format!("storage task failed: {}", e)))?
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS reports (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            data TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS photos (
            id TEXT PRIMARY KEY,
            bytes BLOB NOT NULL,
            timestamp INTEGER NOT NULL
        );
        "#,
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES ('schema_version', ?1)",
        params![SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}

#[async_trait]
impl MetadataStore for SqliteStore {
    async fn get_payload(&self, key: &str) -> Result<Option<PersistedPayload>> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            let row = conn
                .query_row(
                    "SELECT id, date, data FROM reports WHERE id = ?1",
                    params![key],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                        ))
                    },
                )
                .optional()?;

            match row {
                Some((id, date, data)) => Ok(Some(PersistedPayload {
                    id,
                    date,
                    data: serde_json::from_str(&data)?,
                })),
                None => Ok(None),
            }
        })
        .await
    }

    async fn put_payload(&self, payload: &PersistedPayload) -> Result<()> {
        let id = payload.id.clone();
        let date = payload.date.clone();
        let data = serde_json::to_string(&payload.data)?;
        self.with_connection(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            tx.execute(
                "INSERT INTO reports(id, date, data) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(id) DO UPDATE SET date = excluded.date, data = excluded.data",
                params![id, date, data],
            )?;
            tx.commit()?;
            debug!("Wrote report row {} for {}", id, date);
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl BlobStore for SqliteStore {
    async fn put_blob(&self, id: &str, blob: StoredBlob) -> Result<()> {
        let id = id.to_string();
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO photos(id, bytes, timestamp) VALUES (?1, ?2, ?3)",
                params![id, blob.bytes, blob.timestamp],
            )?;
            debug!("Stored photo blob {} ({} bytes)", id, blob.bytes.len());
            Ok(())
        })
        .await
    }

    async fn get_blob(&self, id: &str) -> Result<Option<StoredBlob>> {
        let id = id.to_string();
        self.with_connection(move |conn| {
            conn.query_row(
                "SELECT bytes, timestamp FROM photos WHERE id = ?1",
                params![id],
                |row| {
                    Ok(StoredBlob {
                        bytes: row.get(0)?,
                        timestamp: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
        })
        .await
    }

    async fn delete_blob(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.with_connection(move |conn| {
            let deleted = conn.execute("DELETE FROM photos WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn blob_stats(&self) -> Result<BlobStats> {
        self.with_connection(|conn| {
            let (count, size): (i64, i64) = conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(LENGTH(bytes)), 0) FROM photos",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok(BlobStats {
                total_blobs: count as usize,
                total_size: size as usize,
            })
        })
        .await
    }
}
