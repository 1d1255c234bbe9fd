use crate::core::assignment::Assignments;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub assignments: Assignments,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Units shown on the site grid, in display order
    pub units: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Contractors listed first in the multi-contractor view
    pub priority: Vec<String>,
    /// Title of the native share payload
    pub share_title: String,
    /// Text-only share link used when native sharing is unavailable
    pub share_fallback_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file holding the report row and photo blobs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            units: [
                "Unit1", "Unit2", "Unit3A", "Unit3B", "Unit5", "Unit6", "Unit7", "Unit8", "Unit9",
                "Unit10", "Unit11", "Unit12A", "Unit12B", "Unit14", "Unit15", "Unit16", "Unit17",
                "Unit18", "Unit19",
            ]
            .iter()
            .map(|u| u.to_string())
            .collect(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            priority: vec![
                "IADECCO".to_string(),
                "YAMATO".to_string(),
                "INITI INDAH".to_string(),
            ],
            share_title: "Construction Report".to_string(),
            share_fallback_url: "https://wa.me/".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            assignments: Assignments::default(),
            report: ReportConfig::default(),
            storage: StorageConfig::default(), // Will default to ~/.sitelog/sitelog.db
        }
    }
}

impl Config {
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database
            .clone()
            .unwrap_or_else(crate::core::paths::default_database_path)
    }

    pub fn is_known_unit(&self, unit: &str) -> bool {
        self.site.units.iter().any(|u| u == unit)
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::SiteLogError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::SiteLogError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

/// Load `path` when it exists, otherwise fall back to the defaults
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, crate::SiteLogError> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!("No config at {}, using defaults", path.display());
        Ok(Config::default())
    }
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::SiteLogError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::SiteLogError::Config(format!("Failed to serialize config: {}", e)))?;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}
