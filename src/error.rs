use crate::model::DependencyCategory;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepickError {
    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("Outdated query failed: {0}")]
    OutdatedQuery(String),

    #[error("Manifest parsing failed: {0}")]
    ManifestParsing(String),

    #[error("Upgrade cancelled by user")]
    UserCancelled,

    #[error("Installing {category} failed: {message}")]
    Installer {
        category: DependencyCategory,
        message: String,
    },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DepickError>;
