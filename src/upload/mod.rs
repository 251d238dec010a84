mod api;
mod controller;
mod notification;
mod types;

pub use api::HttpLoaderApi;
pub use controller::{SessionState, UploadController};
pub use notification::Severity;
pub use types::{
    CandidateFile, SelectedFile, Source, StatusOutcome, UploadOutcome, WorkflowStatus,
    STATUS_FAILED, STATUS_RUNNING, STATUS_SUCCEEDED,
};
