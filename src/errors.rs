//! Typed error hierarchy for ezlo.
//!
//! Three enums cover the three layers:
//! - `StoreError`: reading and writing the key/value store file
//! - `GenerationError`: calls to the generation backend
//! - `EzloError`: workflow prerequisites, wrapping the two above

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the persistent key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read store at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write store at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store at {path} must contain a JSON object at the top level")]
    InvalidRoot { path: PathBuf },

    #[error("Value under key '{key}' has an unexpected shape: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Value for key '{key}' could not be serialized: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the generation backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Request to generation API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Generation API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed {what} response: {detail}")]
    MalformedResponse { what: &'static str, detail: String },
}

impl GenerationError {
    pub fn malformed(what: &'static str, detail: impl Into<String>) -> Self {
        GenerationError::MalformedResponse {
            what,
            detail: detail.into(),
        }
    }
}

/// Errors from the draft workflow.
#[derive(Debug, Error)]
pub enum EzloError {
    #[error("Please configure your API key and site path first (run 'ezlo config').")]
    NotConfigured,

    #[error("No blog niche configured. Run 'ezlo config' to set one.")]
    NoNiche,

    #[error("Idea {index} not found in the database.")]
    IdeaNotFound { index: usize },

    #[error("No idea found in the database. Select one with 'ezlo thesis <index>'.")]
    NoIdea,

    #[error("No thesis found in the database.")]
    NoThesis,

    #[error("No draft found in the database. Create one with 'ezlo draft new'.")]
    NoDraft,

    #[error("No banner found in the database. Generate one with 'ezlo banner gen'.")]
    NoBanner,

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

pub type Result<T> = std::result::Result<T, EzloError>;
