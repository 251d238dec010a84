use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const CSV_MIME: &str = "text/csv";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Source {
    #[default]
    FounderHub,
    CrunchBase,
    Others,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::FounderHub, Source::CrunchBase, Source::Others];

    /// Identifier sent in the `source` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::FounderHub => "founderhub",
            Source::CrunchBase => "crunchbase",
            Source::Others => "others",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Source::FounderHub => "Founder Hub",
            Source::CrunchBase => "Crunch Base",
            Source::Others => "Others",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file the user picked but that has not been validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: Option<String>,
}

impl CandidateFile {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self {
            path,
            name,
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn is_csv(&self) -> bool {
        self.name.to_lowercase().ends_with(".csv") || self.mime.as_deref() == Some(CSV_MIME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: Option<u64>,
}

impl From<CandidateFile> for SelectedFile {
    fn from(candidate: CandidateFile) -> Self {
        let size = std::fs::metadata(&candidate.path).ok().map(|m| m.len());
        Self {
            path: candidate.path,
            name: candidate.name,
            size,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadOutcome {
    #[default]
    NotStarted,
    InProgress,
    Succeeded { filename: String },
    Failed { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusOutcome {
    #[default]
    NotStarted,
    InProgress,
    Reported(WorkflowStatus),
    Failed { message: String },
}

/// Latest run of the workflow as reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkflowStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, rename = "name")]
    pub run_name: Option<String>,
}

pub const STATUS_SUCCEEDED: &str = "Succeeded";
pub const STATUS_FAILED: &str = "Failed";
pub const STATUS_RUNNING: &str = "Running";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_detection_ignores_case() {
        assert!(CandidateFile::from_path("/tmp/LEADS.CSV").is_csv());
        assert!(CandidateFile::from_path("leads.csv").is_csv());
        assert!(!CandidateFile::from_path("leads.xlsx").is_csv());
        assert!(!CandidateFile::from_path("leads.csv.txt").is_csv());
    }

    #[test]
    fn csv_mime_is_enough() {
        let candidate = CandidateFile::from_path("export").with_mime(CSV_MIME);
        assert!(candidate.is_csv());

        let candidate = CandidateFile::from_path("export").with_mime("application/json");
        assert!(!candidate.is_csv());
    }

    #[test]
    fn status_body_uses_name_for_run() {
        let status: WorkflowStatus = serde_json::from_str(
            r#"{"status": "Failed", "error": "parse error", "name": "08584"}"#,
        )
        .expect("valid body");
        assert_eq!(status.error.as_deref(), Some("parse error"));
        assert_eq!(status.run_name.as_deref(), Some("08584"));

        let status: WorkflowStatus =
            serde_json::from_str(r#"{"status": "Running", "error": null}"#).expect("valid body");
        assert_eq!(status.status, STATUS_RUNNING);
        assert!(status.run_name.is_none());
    }
}
