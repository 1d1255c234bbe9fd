/// Photo references held by a unit record
///
/// A photo is either a legacy inline data URI carried inside the report
/// itself, or a lightweight reference to bytes kept in the blob store.
/// Both shapes stay readable so reports written by older builds load.
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub const JPEG_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhotoRef {
    /// Legacy `data:<mime>;base64,<payload>` string stored in the report row
    Inline(DataUri),
    /// `{ "type": "db_ref", "id": ..., "timestamp": ... }` pointing into the blob store
    Stored(BlobRef),
}

impl PhotoRef {
    pub fn stored(id: impl Into<String>, timestamp: i64) -> Self {
        PhotoRef::Stored(BlobRef {
            kind: RefKind::DbRef,
            id: id.into(),
            timestamp,
        })
    }

    pub fn inline(mime: &str, bytes: &[u8]) -> Self {
        PhotoRef::Inline(DataUri::encode(mime, bytes))
    }

    pub fn blob_id(&self) -> Option<&str> {
        match self {
            PhotoRef::Stored(blob) => Some(&blob.id),
            PhotoRef::Inline(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefKind {
    #[serde(rename = "db_ref")]
    DbRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    #[serde(rename = "type")]
    pub kind: RefKind,
    pub id: String,
    pub timestamp: i64,
}

/// Inline image kept verbatim as its data URI text.
///
/// Decoding is deferred to render time so one damaged entry cannot make the
/// whole stored report unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUri(String);

impl DataUri {
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        DataUri(format!("data:{};base64,{}", mime, B64.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw image bytes, or `None` when the text is not a base64 data URI
    pub fn decode(&self) -> Option<Vec<u8>> {
        let rest = self.0.strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        if !header.ends_with(";base64") {
            return None;
        }
        B64.decode(payload.trim()).ok()
    }
}

impl From<String> for DataUri {
    fn from(value: String) -> Self {
        DataUri(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stored_ref_layout() {
        let photo = PhotoRef::stored("abc-123", 1_700_000_000_000);
        let value = serde_json::to_value(&photo).unwrap();
        assert_eq!(
            value,
            json!({"type": "db_ref", "id": "abc-123", "timestamp": 1_700_000_000_000i64})
        );
        assert_eq!(serde_json::from_value::<PhotoRef>(value).unwrap(), photo);
    }

    #[test]
    fn test_legacy_string_reads_as_inline() {
        let photo: PhotoRef = serde_json::from_value(json!("data:image/jpeg;base64,/9j/AA==")).unwrap();
        match &photo {
            PhotoRef::Inline(uri) => assert_eq!(uri.decode().unwrap(), vec![0xff, 0xd8, 0xff, 0x00]),
            other => panic!("expected inline photo, got {:?}", other),
        }
        assert_eq!(photo.blob_id(), None);
    }

    #[test]
    fn test_unknown_object_type_is_rejected() {
        let result = serde_json::from_value::<PhotoRef>(json!({"type": "url", "id": "x", "timestamp": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_data_uri_decodes_to_none() {
        assert_eq!(DataUri::from("blob:http://x/1".to_string()).decode(), None);
        assert_eq!(DataUri::from("data:image/jpeg,rawtext".to_string()).decode(), None);
        assert_eq!(DataUri::from("data:image/jpeg;base64,@@@".to_string()).decode(), None);
    }

    #[test]
    fn test_inline_encode_decode() {
        let photo = PhotoRef::inline(JPEG_MIME, b"jpeg-bytes");
        if let PhotoRef::Inline(uri) = photo {
            assert!(uri.as_str().starts_with("data:image/jpeg;base64,"));
            assert_eq!(uri.decode().unwrap(), b"jpeg-bytes".to_vec());
        } else {
            panic!("expected inline photo");
        }
    }
}
