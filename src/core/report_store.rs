/// In-memory daily report: contractor → unit → tasks and photos
use crate::core::photo::PhotoRef;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key of the single metadata row holding the day's report
pub const METADATA_KEY: &str = "construction_log_data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub text: String,
}

impl TaskEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Tasks in insertion order and photos in capture order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
}

impl UnitRecord {
    pub fn task_texts(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.text.clone()).collect()
    }
}

/// Contractor keys appear lazily on the first write to one of their units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportStore {
    contractors: IndexMap<String, IndexMap<String, UnitRecord>>,
}

/// Row written to the metadata store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPayload {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub data: ReportStore,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the unit's task list wholesale, keeping its photos.
    pub fn upsert_tasks<I, S>(&mut self, contractor: &str, unit: &str, task_texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let record = self.entry(contractor, unit);
        record.tasks = task_texts.into_iter().map(TaskEntry::new).collect();
    }

    pub fn append_photo(&mut self, contractor: &str, unit: &str, photo: PhotoRef) {
        self.entry(contractor, unit).photos.push(photo);
    }

    /// Positional removal; a missing contractor, unit or index is a no-op.
    pub fn remove_photo(&mut self, contractor: &str, unit: &str, index: usize) -> Option<PhotoRef> {
        let record = self.unit_mut(contractor, unit)?;
        if index < record.photos.len() {
            Some(record.photos.remove(index))
        } else {
            None
        }
    }

    /// Positional removal; a missing contractor, unit or index is a no-op.
    pub fn remove_task(&mut self, contractor: &str, unit: &str, index: usize) -> Option<TaskEntry> {
        let record = self.unit_mut(contractor, unit)?;
        if index < record.tasks.len() {
            Some(record.tasks.remove(index))
        } else {
            None
        }
    }

    pub fn unit(&self, contractor: &str, unit: &str) -> Option<&UnitRecord> {
        self.contractors.get(contractor)?.get(unit)
    }

    pub fn units(&self, contractor: &str) -> Option<&IndexMap<String, UnitRecord>> {
        self.contractors.get(contractor)
    }

    /// Contractor names in first-write order
    pub fn contractors(&self) -> impl Iterator<Item = &str> {
        self.contractors.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.contractors.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.records().map(|(_, _, r)| r.tasks.len()).sum()
    }

    pub fn photo_count(&self) -> usize {
        self.records().map(|(_, _, r)| r.photos.len()).sum()
    }

    /// Every (contractor, unit, record) triple
    pub fn records(&self) -> impl Iterator<Item = (&str, &str, &UnitRecord)> {
        self.contractors.iter().flat_map(|(contractor, units)| {
            units
                .iter()
                .map(move |(unit, record)| (contractor.as_str(), unit.as_str(), record))
        })
    }

    /// Copy of the report with every photo list emptied
    pub fn tasks_only(&self) -> ReportStore {
        let contractors = self
            .contractors
            .iter()
            .map(|(contractor, units)| {
                let units = units
                    .iter()
                    .map(|(unit, record)| {
                        (
                            unit.clone(),
                            UnitRecord {
                                tasks: record.tasks.clone(),
                                photos: Vec::new(),
                            },
                        )
                    })
                    .collect();
                (contractor.clone(), units)
            })
            .collect();
        ReportStore { contractors }
    }

    pub fn snapshot_for_date(&self, date: &str) -> PersistedPayload {
        PersistedPayload {
            id: METADATA_KEY.to_string(),
            date: date.to_string(),
            data: self.clone(),
        }
    }

    pub fn restore(&mut self, payload: PersistedPayload) {
        *self = payload.data;
    }

    fn entry(&mut self, contractor: &str, unit: &str) -> &mut UnitRecord {
        self.contractors
            .entry(contractor.to_string())
            .or_default()
            .entry(unit.to_string())
            .or_default()
    }

    fn unit_mut(&mut self, contractor: &str, unit: &str) -> Option<&mut UnitRecord> {
        self.contractors.get_mut(contractor)?.get_mut(unit)
    }
}
