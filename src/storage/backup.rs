/// JSON sidecar backup of the day's report
///
/// Written when the database write fails (tasks only) and on exit (full
/// report with lightweight photo refs). Read back once at startup when the
/// database has nothing usable, then removed.
use crate::core::report_store::ReportStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupPayload {
    pub date: String,
    #[serde(default)]
    pub data: ReportStore,
}

/// Write the sidecar via a temp file and rename, so a torn write never
/// replaces a good copy.
pub fn write_backup<P: AsRef<Path>>(path: P, date: &str, report: &ReportStore) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let payload = BackupPayload {
        date: date.to_string(),
        data: report.clone(),
    };
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serde_json::to_vec(&payload)?)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub fn read_backup<P: AsRef<Path>>(path: P) -> Result<Option<BackupPayload>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read(path)?;
    Ok(Some(serde_json::from_slice(&contents)?))
}

pub fn remove_backup<P: AsRef<Path>>(path: P) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
