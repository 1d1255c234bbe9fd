pub mod cli;
pub mod core;
pub mod report;
pub mod storage;

pub use crate::core::{
    assignment::Assignments, config::Config, report_store::ReportStore, session::Session,
};
pub use crate::storage::persistence::Persistence;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

impl From<rusqlite::Error> for SiteLogError {
    fn from(err: rusqlite::Error) -> Self {
        SiteLogError::Database(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiteLogError>;
