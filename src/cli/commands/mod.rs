pub mod config;
pub mod export;
pub mod photo;
pub mod report;
pub mod share;
pub mod task;
pub mod units;

use crate::core::clock::SystemClock;
use crate::core::config::{load_or_default, Config};
use crate::core::paths::default_config_path;
use crate::core::session::Session;
use crate::storage::persistence::Persistence;
use crate::SiteLogError;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    Ok(load_or_default(config_path(explicit))?)
}

/// Load the configuration and today's report
pub async fn open_session(explicit_config: Option<&Path>) -> anyhow::Result<Session> {
    let config = load_config(explicit_config)?;
    let database = config.database_path();
    let persistence = Persistence::open(&database, Arc::new(SystemClock))
        .with_context(|| format!("Failed to open report database at {}", database.display()))?;
    Ok(Session::start(config, Arc::new(persistence)).await)
}

/// Reject units that are not on the configured site grid
pub fn ensure_known_unit(config: &Config, unit: &str) -> Result<(), SiteLogError> {
    if config.is_known_unit(unit) {
        Ok(())
    } else {
        Err(SiteLogError::InvalidInput(format!(
            "Unknown unit '{}' (see `sitelog units`)",
            unit
        )))
    }
}

/// Convert a 1-based index from the command line; 0 maps to an index that
/// is always out of range.
pub fn zero_based(index: usize) -> usize {
    index.checked_sub(1).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_based() {
        assert_eq!(zero_based(1), 0);
        assert_eq!(zero_based(3), 2);
        assert_eq!(zero_based(0), usize::MAX);
    }

    #[test]
    fn test_unknown_unit_is_invalid_input() {
        let config = Config::default();
        assert!(ensure_known_unit(&config, "Unit3A").is_ok());
        assert!(matches!(
            ensure_known_unit(&config, "Unit4"),
            Err(SiteLogError::InvalidInput(_))
        ));
    }
}
