/// Application context for one foreman session
///
/// Owns the day's report, the persistence facade, the renderer and the
/// transient selection (the unit being edited and its draft task list).
/// All mutation goes through here, one call at a time.
use crate::core::config::Config;
use crate::core::photo::PhotoRef;
use crate::core::report_store::ReportStore;
use crate::report::{ContractorReport, ReportGenerator, Renderer};
use crate::storage::persistence::Persistence;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Unit currently open for editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub unit: String,
    pub contractor: String,
    /// Draft task texts, flushed into the report by [`Session::sync`]
    pub tasks: Vec<String>,
}

/// Dimensions reported by the capture pipeline alongside the image bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedImage<'a> {
    pub bytes: &'a [u8],
    pub width: u32,
    pub height: u32,
}

pub struct Session {
    config: Config,
    report: ReportStore,
    persistence: Arc<Persistence>,
    renderer: Renderer,
    selection: Option<Selection>,
}

impl Session {
    pub fn new(config: Config, persistence: Arc<Persistence>) -> Self {
        let renderer = Renderer::new(persistence.clone(), config.report.priority.clone());
        Self {
            config,
            report: ReportStore::new(),
            persistence,
            renderer,
            selection: None,
        }
    }

    /// Build a session and load today's report
    pub async fn start(config: Config, persistence: Arc<Persistence>) -> Self {
        let mut session = Self::new(config, persistence);
        session.report = session.persistence.load().await;
        info!(
            "Session started with {} tasks and {} photos",
            session.report.task_count(),
            session.report.photo_count()
        );
        session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn report(&self) -> &ReportStore {
        &self.report
    }

    pub fn persistence(&self) -> &Arc<Persistence> {
        &self.persistence
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn contractor_of(&self, unit: &str) -> &str {
        self.config.assignments.resolve(unit)
    }

    /// Select `unit`, seeding the draft with its stored task texts
    pub fn open_unit(&mut self, unit: &str) {
        let contractor = self.contractor_of(unit).to_string();
        let tasks = self
            .report
            .unit(&contractor, unit)
            .map(|record| record.task_texts())
            .unwrap_or_default();
        debug!("Opened {} ({}) with {} tasks", unit, contractor, tasks.len());
        self.selection = Some(Selection {
            unit: unit.to_string(),
            contractor,
            tasks,
        });
    }

    /// Flush the draft task list into the report, keeping the unit's photos
    pub fn sync(&mut self) {
        if let Some(selection) = &self.selection {
            self.report
                .upsert_tasks(&selection.contractor, &selection.unit, selection.tasks.iter().cloned());
        }
    }

    /// Append a task to the draft; blank text is ignored
    pub async fn add_task(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        selection.tasks.push(text.to_string());
        self.sync();
        self.persistence.save(&self.report).await;
    }

    /// Remove the draft task at `index`; out of range is a no-op
    pub async fn remove_task(&mut self, index: usize) {
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        if index >= selection.tasks.len() {
            return;
        }
        selection.tasks.remove(index);
        self.sync();
        self.persistence.save(&self.report).await;
    }

    /// Store a captured photo for the selected unit.
    ///
    /// The bytes go to the blob store first; the reference is added only if
    /// that write succeeded. Returns the new reference.
    pub async fn capture_photo(&mut self, image: CapturedImage<'_>) -> Option<PhotoRef> {
        let (contractor, unit) = {
            let selection = self.selection.as_ref()?;
            (selection.contractor.clone(), selection.unit.clone())
        };
        let id = Uuid::new_v4().to_string();
        let timestamp = self.persistence.clock().now_millis();
        debug!(
            "Capturing {}x{} photo for {} as {}",
            image.width, image.height, unit, id
        );

        if !self.persistence.put_blob(&id, image.bytes.to_vec(), timestamp).await {
            return None;
        }
        let photo = PhotoRef::stored(id, timestamp);
        self.report.append_photo(&contractor, &unit, photo.clone());
        self.persistence.save(&self.report).await;
        Some(photo)
    }

    /// Drop the selected unit's photo at `index`; the blob itself is kept
    pub async fn remove_photo(&mut self, index: usize) -> Option<PhotoRef> {
        let (contractor, unit) = {
            let selection = self.selection.as_ref()?;
            (selection.contractor.clone(), selection.unit.clone())
        };
        let removed = self.report.remove_photo(&contractor, &unit, index)?;
        self.persistence.save(&self.report).await;
        Some(removed)
    }

    /// Write the draft into the report, clear the selection, save
    pub async fn save_and_close(&mut self) {
        self.sync();
        self.selection = None;
        self.persistence.save(&self.report).await;
    }

    /// Visibility-change hook: flush and save
    pub async fn on_hidden(&mut self) {
        self.sync();
        self.persistence.save(&self.report).await;
    }

    /// Unload hook: flush and write the synchronous sidecar copy
    pub fn on_exit(&mut self) {
        self.sync();
        self.persistence.write_exit_backup(&self.report);
    }

    /// Report for one contractor, photos resolved
    pub async fn generate(&self, contractor: &str) -> ContractorReport {
        ReportGenerator::new(&self.report, &self.persistence)
            .generate(contractor)
            .await
    }

    /// Re-render every contractor onto the renderer's board
    pub async fn render_all(&self) -> bool {
        self.renderer.render_all(&self.report).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    async fn session(dir: &TempDir) -> Session {
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()));
        let persistence = Persistence::open(&dir.path().join("sitelog.db"), clock).unwrap();
        Session::start(Config::default(), Arc::new(persistence)).await
    }

    #[tokio::test]
    async fn test_mutations_without_selection_are_noops() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir).await;

        session.add_task("Pour slab").await;
        session.remove_task(0).await;
        let photo = session
            .capture_photo(CapturedImage { bytes: b"jpg", width: 4, height: 3 })
            .await;

        assert_eq!(photo, None);
        assert!(session.report().is_empty());
    }

    #[tokio::test]
    async fn test_task_flow() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir).await;

        session.open_unit("Unit2");
        session.add_task("  Pour slab ").await;
        session.add_task("   ").await;
        session.add_task("Cure slab").await;
        session.remove_task(7).await;

        let record = session.report().unit("YAMATO", "Unit2").unwrap();
        assert_eq!(record.task_texts(), vec!["Pour slab", "Cure slab"]);

        session.remove_task(0).await;
        session.save_and_close().await;
        assert_eq!(session.selection(), None);
        assert_eq!(
            session.report().unit("YAMATO", "Unit2").unwrap().task_texts(),
            vec!["Cure slab"]
        );
    }

    #[tokio::test]
    async fn test_reopen_seeds_draft() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir).await;
        session.open_unit("Unit9");
        session.add_task("Excavation for Pile cap").await;
        session.save_and_close().await;

        session.open_unit("Unit9");
        assert_eq!(session.selection().unwrap().tasks, vec!["Excavation for Pile cap"]);
        assert_eq!(session.selection().unwrap().contractor, "IADECCO");
    }

    #[tokio::test]
    async fn test_photo_capture_and_removal() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir).await;
        session.open_unit("Unit5");

        let photo = session
            .capture_photo(CapturedImage { bytes: b"jpeg-1", width: 1920, height: 1440 })
            .await
            .unwrap();
        let id = photo.blob_id().unwrap().to_string();
        assert_eq!(session.persistence().get_blob(&id).await, Some(b"jpeg-1".to_vec()));

        assert_eq!(session.remove_photo(3).await, None);
        assert_eq!(session.remove_photo(0).await, Some(photo));
        assert_eq!(session.report().unit("INITI INDAH", "Unit5").unwrap().photos.len(), 0);
        // blob outlives its reference
        assert!(session.persistence().get_blob(&id).await.is_some());
    }

    #[tokio::test]
    async fn test_hidden_hook_flushes_draft() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir).await;
        session.open_unit("Unit16");
        session.selection.as_mut().unwrap().tasks.push("Brick work on 2F".to_string());
        session.on_hidden().await;

        let reloaded = session.persistence().load().await;
        assert_eq!(
            reloaded.unit("YAMATO", "Unit16").unwrap().task_texts(),
            vec!["Brick work on 2F"]
        );
        assert!(session.selection().is_some());
    }

    #[tokio::test]
    async fn test_exit_backup_carries_unsaved_draft() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir).await;
        session.open_unit("Unit1");
        session.selection.as_mut().unwrap().tasks.push("Unsaved".to_string());
        session.on_exit();

        let backup = crate::storage::backup::read_backup(dir.path().join("report.backup.json"))
            .unwrap()
            .unwrap();
        assert_eq!(
            backup.data.unit("IADECCO", "Unit1").unwrap().task_texts(),
            vec!["Unsaved"]
        );
    }
}
