/// Storage trait hierarchy for sitelog
///
/// The report lives in two independent key spaces: a metadata store holding
/// the single report row, and a blob store holding photo bytes. Writes to
/// one are never coupled to writes to the other.
use crate::core::report_store::PersistedPayload;
use crate::Result;
use async_trait::async_trait;

/// Single-row store for the day's report
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Read the row stored under `key`
    async fn get_payload(&self, key: &str) -> Result<Option<PersistedPayload>>;

    /// Overwrite the row stored under `payload.id` atomically
    async fn put_payload(&self, payload: &PersistedPayload) -> Result<()>;
}

/// Photo bytes keyed by generated identifier
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put_blob(&self, id: &str, blob: StoredBlob) -> Result<()>;

    async fn get_blob(&self, id: &str) -> Result<Option<StoredBlob>>;

    /// Remove a blob; returns whether it existed
    async fn delete_blob(&self, id: &str) -> Result<bool>;

    /// Statistics about the blob store
    async fn blob_stats(&self) -> Result<BlobStats>;
}

/// Raw image bytes plus capture timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub bytes: Vec<u8>,
    pub timestamp: i64,
}

/// Blob store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobStats {
    pub total_blobs: usize,
    pub total_size: usize,
}

/// Both key spaces behind one handle
pub trait ReportBackend: MetadataStore + BlobStore {}

impl<T: MetadataStore + BlobStore> ReportBackend for T {}
