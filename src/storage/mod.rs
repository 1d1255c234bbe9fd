pub mod backup;
pub mod persistence;
pub mod sqlite;
pub mod traits;

pub use persistence::Persistence;
pub use sqlite::SqliteStore;
pub use traits::{BlobStats, BlobStore, MetadataStore, ReportBackend, StoredBlob};
