/// Photo resolution and export naming
use crate::core::photo::PhotoRef;
use crate::storage::persistence::Persistence;
use serde::Serialize;

/// Concrete photo bytes tagged with the unit they belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPhoto {
    pub unit: String,
    /// 1-based position among the unit's resolved photos
    pub index: usize,
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
}

impl ResolvedPhoto {
    /// `{YYYYMMDD}_{unit}_{n}.jpg`
    pub fn filename(&self, file_date: &str) -> String {
        export_filename(file_date, &self.unit, self.index)
    }
}

pub fn export_filename(file_date: &str, unit: &str, index: usize) -> String {
    format!("{}_{}_{}.jpg", file_date, unit, index)
}

/// Bytes behind a reference: inline entries decode in place, stored entries
/// are looked up in the blob store. Missing or damaged photos yield `None`.
pub async fn resolve_photo(persistence: &Persistence, photo: &PhotoRef) -> Option<Vec<u8>> {
    match photo {
        PhotoRef::Inline(uri) => {
            let bytes = uri.decode();
            if bytes.is_none() {
                tracing::warn!("Skipping undecodable inline photo");
            }
            bytes
        }
        PhotoRef::Stored(blob) => persistence.get_blob(&blob.id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("20240307", "Unit3A", 1), "20240307_Unit3A_1.jpg");

        let photo = ResolvedPhoto {
            unit: "Unit12B".to_string(),
            index: 4,
            bytes: vec![],
        };
        assert_eq!(photo.filename("20241231"), "20241231_Unit12B_4.jpg");
    }
}
