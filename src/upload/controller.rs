use super::api::LoaderApi;
use super::notification::{Notification, Severity};
use super::types::{CandidateFile, SelectedFile, Source, StatusOutcome, UploadOutcome};
use crate::config::LoaderConfig;
use crate::error::{LoaderError, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{info, warn};

const UPLOAD_FALLBACK: &str = "Upload failed";
const STATUS_FALLBACK: &str = "Status check failed";
const INVALID_FILE_MESSAGE: &str = "Invalid file type. Please upload a CSV file.";

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub source: Source,
    pub file: Option<SelectedFile>,
    pub upload: UploadOutcome,
    pub status: StatusOutcome,
    /// Set once an upload succeeds; cleared by a new file or source.
    pub status_visible: bool,
    pub notification: Option<Notification>,
}

impl SessionState {
    pub fn visible_notification(&self, now: Instant) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_visible(now))
    }

    pub fn is_busy(&self) -> bool {
        self.upload == UploadOutcome::InProgress || self.status == StatusOutcome::InProgress
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notification = Some(Notification::new(message, severity));
    }
}

/// Upload-and-status state machine. Clones share the same session.
#[derive(Clone)]
pub struct UploadController {
    api: Arc<dyn LoaderApi>,
    config: Arc<LoaderConfig>,
    state: Arc<Mutex<SessionState>>,
}

impl UploadController {
    pub fn new(api: Arc<dyn LoaderApi>, config: LoaderConfig) -> Self {
        Self {
            api,
            config: Arc::new(config),
            state: Arc::default(),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn select_source(&self, source: Source) {
        let mut state = self.lock();
        if state.source != source {
            info!(%source, "source selected");
        }
        state.source = source;
        state.status_visible = false;
    }

    /// Rejected candidates leave the current selection in place.
    pub fn select_file(&self, candidate: CandidateFile) -> Result<()> {
        let mut state = self.lock();
        if !candidate.is_csv() {
            warn!(file = %candidate.name, mime = ?candidate.mime, "rejected non-CSV file");
            state.notify(INVALID_FILE_MESSAGE, Severity::Error);
            return Err(LoaderError::InvalidFileType {
                name: candidate.name,
            });
        }

        info!(file = %candidate.name, "file selected");
        state.file = Some(SelectedFile::from(candidate));
        state.status_visible = false;
        Ok(())
    }

    pub fn clear_file(&self) {
        let mut state = self.lock();
        state.file = None;
        state.status_visible = false;
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.lock().notify(message, severity);
    }

    pub fn dismiss_notification(&self) {
        self.lock().notification = None;
    }

    /// Uploads the selected file, then checks the workflow status once.
    pub async fn submit_upload(&self) {
        let (file, source) = {
            let mut state = self.lock();
            let Some(file) = state.file.clone() else {
                return;
            };
            if state.upload == UploadOutcome::InProgress {
                warn!("upload already in flight, ignoring submit");
                return;
            }
            if state.status == StatusOutcome::InProgress {
                warn!("status check in flight, ignoring submit");
                return;
            }
            state.upload = UploadOutcome::InProgress;
            state.status = StatusOutcome::NotStarted;
            (file, state.source)
        };

        info!(file = %file.name, %source, "starting upload");
        let result = match tokio::fs::read(&file.path).await {
            Ok(contents) => self.api.upload(&file.name, contents, source).await,
            Err(e) => Err(LoaderError::ReadFile {
                path: file.path.clone(),
                source: e,
            }),
        };

        match result {
            Ok(receipt) => {
                info!(filename = %receipt.filename, "upload succeeded");
                {
                    let mut state = self.lock();
                    state.notify(
                        format!("File '{}' uploaded successfully!", receipt.filename),
                        Severity::Success,
                    );
                    state.upload = UploadOutcome::Succeeded {
                        filename: receipt.filename,
                    };
                    state.status_visible = true;
                }
                self.check_status().await;
            }
            Err(e) => {
                warn!(error = %e, "upload failed");
                let message = e.user_message(UPLOAD_FALLBACK);
                let mut state = self.lock();
                state.notify(message.clone(), Severity::Error);
                state.upload = UploadOutcome::Failed { message };
            }
        }
    }

    /// Single-shot status query for the configured workflow.
    pub async fn check_status(&self) {
        {
            let mut state = self.lock();
            if state.status == StatusOutcome::InProgress {
                warn!("status check already in flight");
                return;
            }
            state.status = StatusOutcome::InProgress;
        }

        info!(workflow = %self.config.workflow_name, "checking workflow status");
        match self.api.workflow_status().await {
            Ok(status) => {
                info!(status = %status.status, run = ?status.run_name, "workflow status received");
                let mut state = self.lock();
                state.notify(format!("Status: {}", status.status), Severity::Info);
                state.status = StatusOutcome::Reported(status);
            }
            Err(e) => {
                warn!(error = %e, "status check failed");
                let message = e.user_message(STATUS_FALLBACK);
                let mut state = self.lock();
                state.notify(message.clone(), Severity::Error);
                state.status = StatusOutcome::Failed { message };
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
