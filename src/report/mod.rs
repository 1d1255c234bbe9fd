use crate::core::report_store::ReportStore;
use crate::storage::persistence::Persistence;

pub mod photos;
pub mod render;
pub mod share;
pub mod text;

pub use photos::{export_filename, ResolvedPhoto};
pub use render::{RenderGate, RenderToken, ReportBoard, Renderer};
pub use share::{fallback_link, share_payload, SharePayload};
pub use text::{generate_text, natural_cmp, ordered_contractors};

/// Text plus photos for one contractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractorReport {
    pub contractor: String,
    pub text: String,
    /// Flattened in unit order, then capture order within each unit
    pub photos: Vec<ResolvedPhoto>,
}

impl ContractorReport {
    fn name_only(contractor: &str) -> Self {
        Self {
            contractor: contractor.to_string(),
            text: contractor.to_string(),
            photos: Vec::new(),
        }
    }
}

pub struct ReportGenerator<'a> {
    report: &'a ReportStore,
    persistence: &'a Persistence,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(report: &'a ReportStore, persistence: &'a Persistence) -> Self {
        Self {
            report,
            persistence,
        }
    }

    pub async fn generate(&self, contractor: &str) -> ContractorReport {
        match self.generate_while(contractor, || true).await {
            Some(report) => report,
            None => ContractorReport::name_only(contractor),
        }
    }

    /// Every contractor in display order
    pub async fn generate_all(&self, priority: &[String]) -> Vec<ContractorReport> {
        let mut reports = Vec::new();
        for contractor in text::ordered_contractors(self.report, priority) {
            reports.push(self.generate(&contractor).await);
        }
        reports
    }

    /// Build the report, checking `still_current` after every photo lookup;
    /// returns `None` as soon as it reports false.
    pub async fn generate_while<F>(&self, contractor: &str, still_current: F) -> Option<ContractorReport>
    where
        F: Fn() -> bool,
    {
        let units = self.report.units(contractor);
        let text = text::generate_text(contractor, units);
        let mut resolved = Vec::new();

        if let Some(units) = units {
            for unit in text::sorted_units(units) {
                let mut index = 0;
                for photo in &units[unit].photos {
                    let bytes = photos::resolve_photo(self.persistence, photo).await;
                    if !still_current() {
                        return None;
                    }
                    if let Some(bytes) = bytes {
                        index += 1;
                        resolved.push(ResolvedPhoto {
                            unit: unit.to_string(),
                            index,
                            bytes,
                        });
                    }
                }
            }
        }

        Some(ContractorReport {
            contractor: contractor.to_string(),
            text,
            photos: resolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::photo::{PhotoRef, JPEG_MIME};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn persistence(dir: &TempDir) -> Persistence {
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()));
        Persistence::open(&dir.path().join("sitelog.db"), clock).unwrap()
    }

    fn names_and_bytes(report: &ContractorReport) -> Vec<(String, Vec<u8>)> {
        report
            .photos
            .iter()
            .map(|p| (p.filename("20240307"), p.bytes.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_missing_blobs_are_skipped_without_gaps() {
        let dir = TempDir::new().unwrap();
        let persistence = persistence(&dir);
        assert!(persistence.put_blob("ok", b"B".to_vec(), 2).await);

        let mut report = ReportStore::new();
        report.upsert_tasks("YAMATO", "Unit2", ["Pour slab"]);
        report.append_photo("YAMATO", "Unit2", PhotoRef::stored("gone", 1));
        report.append_photo("YAMATO", "Unit2", PhotoRef::inline(JPEG_MIME, b"I"));
        report.append_photo("YAMATO", "Unit2", PhotoRef::stored("ok", 2));

        let rendered = ReportGenerator::new(&report, &persistence).generate("YAMATO").await;
        assert_eq!(rendered.text, "YAMATO\nUnit2:\n-Pour slab");
        assert_eq!(
            names_and_bytes(&rendered),
            vec![
                ("20240307_Unit2_1.jpg".to_string(), b"I".to_vec()),
                ("20240307_Unit2_2.jpg".to_string(), b"B".to_vec()),
            ]
        );
    }

    #[tokio::test]
    async fn test_photos_follow_unit_order_and_numbering_restarts() {
        let dir = TempDir::new().unwrap();
        let persistence = persistence(&dir);

        let mut report = ReportStore::new();
        report.append_photo("YAMATO", "Unit12A", PhotoRef::inline(JPEG_MIME, b"c"));
        report.append_photo("YAMATO", "Unit2", PhotoRef::inline(JPEG_MIME, b"a"));
        report.append_photo("YAMATO", "Unit2", PhotoRef::inline(JPEG_MIME, b"b"));

        let rendered = ReportGenerator::new(&report, &persistence).generate("YAMATO").await;
        // no tasks anywhere, photos still resolve
        assert_eq!(rendered.text, "YAMATO");
        assert_eq!(
            names_and_bytes(&rendered),
            vec![
                ("20240307_Unit2_1.jpg".to_string(), b"a".to_vec()),
                ("20240307_Unit2_2.jpg".to_string(), b"b".to_vec()),
                ("20240307_Unit12A_1.jpg".to_string(), b"c".to_vec()),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_contractor_is_name_only() {
        let dir = TempDir::new().unwrap();
        let persistence = persistence(&dir);
        let report = ReportStore::new();

        let rendered = ReportGenerator::new(&report, &persistence).generate("IADECCO").await;
        assert_eq!(rendered, ContractorReport::name_only("IADECCO"));
    }

    #[tokio::test]
    async fn test_generate_while_stops_once_not_current() {
        let dir = TempDir::new().unwrap();
        let persistence = persistence(&dir);
        let mut report = ReportStore::new();
        report.append_photo("YAMATO", "Unit2", PhotoRef::inline(JPEG_MIME, b"a"));
        report.append_photo("YAMATO", "Unit2", PhotoRef::inline(JPEG_MIME, b"b"));

        let checks = Cell::new(0);
        let generator = ReportGenerator::new(&report, &persistence);
        let rendered = generator
            .generate_while("YAMATO", || {
                checks.set(checks.get() + 1);
                checks.get() < 2
            })
            .await;

        assert_eq!(rendered, None);
        assert_eq!(checks.get(), 2);
    }
}
