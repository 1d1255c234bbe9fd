use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static SITELOG_HOME: OnceLock<PathBuf> = OnceLock::new();

/// File name of the sidecar backup kept next to the database
pub const BACKUP_FILE_NAME: &str = "report.backup.json";

/// Get the sitelog home directory
/// Checks SITELOG_HOME environment variable, falls back to ${HOME}/.sitelog
pub fn sitelog_home() -> PathBuf {
    SITELOG_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("SITELOG_HOME") {
                PathBuf::from(path)
            } else {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".sitelog")
            }
        })
        .clone()
}

pub fn default_config_path() -> PathBuf {
    sitelog_home().join("config.toml")
}

pub fn default_database_path() -> PathBuf {
    sitelog_home().join("sitelog.db")
}

/// Sidecar backup path for a given database file
pub fn backup_path_for(database: &Path) -> PathBuf {
    database
        .parent()
        .map(|dir| dir.join(BACKUP_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(BACKUP_FILE_NAME))
}

/// Get a human-readable description of the current path configuration
pub fn describe_paths() -> String {
    format!(
        "Sitelog Paths:\n  \
        Home: {}\n  \
        Config: {}\n  \
        Database: {}\n  \
        Custom: {}",
        sitelog_home().display(),
        default_config_path().display(),
        default_database_path().display(),
        if std::env::var("SITELOG_HOME").is_ok() { "Yes" } else { "No (using defaults)" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_sits_next_to_database() {
        let backup = backup_path_for(Path::new("/data/site/sitelog.db"));
        assert_eq!(backup, PathBuf::from("/data/site/report.backup.json"));
    }

    #[test]
    fn test_default_paths_share_home() {
        let home = sitelog_home();
        assert!(default_config_path().starts_with(&home));
        assert!(default_database_path().ends_with("sitelog.db"));
    }
}
