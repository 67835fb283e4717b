//! Error types for the sync crate

use crate::mode::InvalidModeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Mode(#[from] InvalidModeError),

    #[error("Page catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("Invalid location: {0}")]
    Location(#[from] url::ParseError),

    #[error("Page catalog has no page with id {0}")]
    UnknownPage(String),
}

pub type SyncResult<T> = Result<T, SyncError>;
