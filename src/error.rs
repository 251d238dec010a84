use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("invalid file type for '{name}', expected a CSV file")]
    InvalidFileType { name: String },

    #[error("failed to read file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with status {status}")]
    Api { status: u16, detail: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl LoaderError {
    /// Message shown to the user. Server-provided detail wins; everything
    /// else collapses to the caller's fallback except local read errors.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            LoaderError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            LoaderError::ReadFile { .. } => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
