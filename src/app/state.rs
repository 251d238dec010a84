use crate::upload::{
    Severity, SessionState, StatusOutcome, UploadOutcome, WorkflowStatus, STATUS_FAILED,
    STATUS_RUNNING, STATUS_SUCCEEDED,
};
use crate::utils::file_size::format_size;

const REVIEW_PROMPT: &str = "File processed successfully. Please check the records at";

/// What the status section should show, independent of egui.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    Hidden,
    Idle,
    Checking,
    Succeeded {
        review_link: String,
        run_name: Option<String>,
    },
    Failed {
        error: String,
        run_name: Option<String>,
    },
    Pending {
        status: String,
        run_name: Option<String>,
    },
    Other {
        status: String,
        run_name: Option<String>,
    },
    CheckFailed {
        message: String,
    },
}

impl StatusView {
    pub fn severity(&self) -> Option<Severity> {
        match self {
            StatusView::Hidden | StatusView::Idle | StatusView::Checking => None,
            StatusView::Succeeded { .. } => Some(Severity::Success),
            StatusView::Failed { .. } | StatusView::CheckFailed { .. } => Some(Severity::Error),
            StatusView::Pending { .. } | StatusView::Other { .. } => Some(Severity::Info),
        }
    }

    pub fn status(&self) -> Option<&str> {
        match self {
            StatusView::Succeeded { .. } => Some(STATUS_SUCCEEDED),
            StatusView::Failed { .. } => Some(STATUS_FAILED),
            StatusView::Pending { status, .. } | StatusView::Other { status, .. } => Some(status),
            _ => None,
        }
    }

    pub fn run_name(&self) -> Option<&str> {
        match self {
            StatusView::Succeeded { run_name, .. }
            | StatusView::Failed { run_name, .. }
            | StatusView::Pending { run_name, .. }
            | StatusView::Other { run_name, .. } => run_name.as_deref(),
            _ => None,
        }
    }

    /// Sentence and link shown after a successful run.
    pub fn review_prompt(&self) -> Option<(&'static str, &str)> {
        match self {
            StatusView::Succeeded { review_link, .. } => Some((REVIEW_PROMPT, review_link.as_str())),
            _ => None,
        }
    }

    /// Body text under the status line.
    pub fn detail(&self) -> Option<String> {
        if let Some((prompt, link)) = self.review_prompt() {
            return Some(format!("{} {}.", prompt, link));
        }
        match self {
            StatusView::Hidden
            | StatusView::Idle
            | StatusView::Other { .. }
            | StatusView::Succeeded { .. } => None,
            StatusView::Checking => Some("Checking file processing status...".to_string()),
            StatusView::Failed { error, .. } => Some(format!("Error: {}", error)),
            StatusView::Pending { .. } => {
                Some("The workflow is still running. Please check again later.".to_string())
            }
            StatusView::CheckFailed { message } => Some(message.clone()),
        }
    }

    pub fn headline(&self) -> Option<String> {
        let status = self.status()?;
        Some(match self.run_name() {
            Some(run) => format!("Status: {} (run {})", status, run),
            None => format!("Status: {}", status),
        })
    }

    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(headline) = self.headline() {
            lines.push(headline);
        }
        if let Some(detail) = self.detail() {
            lines.push(detail);
        }
        lines.join("\n")
    }
}

pub fn status_view(state: &SessionState, review_link: &str) -> StatusView {
    if !state.status_visible {
        return StatusView::Hidden;
    }

    match &state.status {
        StatusOutcome::NotStarted => StatusView::Idle,
        StatusOutcome::InProgress => StatusView::Checking,
        StatusOutcome::Failed { message } => StatusView::CheckFailed {
            message: message.clone(),
        },
        StatusOutcome::Reported(reported) => reported_view(reported, review_link),
    }
}

fn reported_view(reported: &WorkflowStatus, review_link: &str) -> StatusView {
    let run_name = reported.run_name.clone();
    match (reported.status.as_str(), &reported.error) {
        (STATUS_SUCCEEDED, _) => StatusView::Succeeded {
            review_link: review_link.to_string(),
            run_name,
        },
        (STATUS_FAILED, Some(error)) => StatusView::Failed {
            error: error.clone(),
            run_name,
        },
        (STATUS_RUNNING, _) => StatusView::Pending {
            status: reported.status.clone(),
            run_name,
        },
        _ => StatusView::Other {
            status: reported.status.clone(),
            run_name,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub file_label: String,
    pub can_submit: bool,
    pub in_progress: bool,
    pub button_label: &'static str,
    pub error: Option<String>,
}

pub fn upload_view(state: &SessionState) -> UploadView {
    let uploading = state.upload == UploadOutcome::InProgress;
    let file_label = match &state.file {
        Some(file) => match file.size {
            Some(size) => format!("{} ({})", file.name, format_size(size)),
            None => file.name.clone(),
        },
        None => "No file selected".to_string(),
    };
    let error = match &state.upload {
        UploadOutcome::Failed { message } => Some(message.clone()),
        _ => None,
    };

    UploadView {
        file_label,
        can_submit: state.file.is_some() && !state.is_busy(),
        in_progress: uploading,
        button_label: if uploading { "Uploading..." } else { "Upload" },
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::SelectedFile;
    use std::path::PathBuf;

    const LINK: &str = "https://records.example.com/list";

    fn reported(status: &str, error: Option<&str>) -> SessionState {
        SessionState {
            status_visible: true,
            status: StatusOutcome::Reported(WorkflowStatus {
                status: status.to_string(),
                error: error.map(str::to_string),
                run_name: None,
            }),
            ..SessionState::default()
        }
    }

    #[test]
    fn hidden_until_upload_succeeds() {
        let mut state = reported("Succeeded", None);
        state.status_visible = false;
        assert_eq!(status_view(&state, LINK), StatusView::Hidden);
        assert_eq!(status_view(&state, LINK).render_text(), "");
    }

    #[test]
    fn succeeded_shows_review_link_without_error() {
        let view = status_view(&reported("Succeeded", None), LINK);
        assert_eq!(view.severity(), Some(Severity::Success));

        let text = view.render_text();
        assert!(text.contains(LINK));
        assert!(!text.contains("Error"));

        let (prompt, link) = view.review_prompt().expect("prompt for succeeded run");
        assert_eq!(link, LINK);
        assert_eq!(view.detail(), Some(format!("{} {}.", prompt, LINK)));
    }

    #[test]
    fn failed_shows_reported_error() {
        let view = status_view(&reported("Failed", Some("parse error")), LINK);
        assert_eq!(view.severity(), Some(Severity::Error));
        assert!(view.render_text().contains("parse error"));
        assert!(!view.render_text().contains(LINK));
    }

    #[test]
    fn other_statuses_show_raw_string() {
        let view = status_view(&reported("Failed", None), LINK);
        assert_eq!(
            view,
            StatusView::Other {
                status: "Failed".to_string(),
                run_name: None
            }
        );
        assert_eq!(view.render_text(), "Status: Failed");

        let view = status_view(&reported("No runs found", None), LINK);
        assert_eq!(view.render_text(), "Status: No runs found");
        assert_eq!(view.severity(), Some(Severity::Info));
    }

    #[test]
    fn running_suggests_checking_again() {
        let mut state = reported("Running", None);
        if let StatusOutcome::Reported(ref mut s) = state.status {
            s.run_name = Some("08584".to_string());
        }
        let text = status_view(&state, LINK).render_text();
        assert!(text.starts_with("Status: Running (run 08584)"));
        assert!(text.contains("check again later"));
    }

    #[test]
    fn checking_and_failed_checks() {
        let mut state = SessionState {
            status_visible: true,
            status: StatusOutcome::InProgress,
            ..SessionState::default()
        };
        assert_eq!(status_view(&state, LINK), StatusView::Checking);

        state.status = StatusOutcome::Failed {
            message: "Status check failed".to_string(),
        };
        assert_eq!(
            status_view(&state, LINK).render_text(),
            "Status check failed"
        );
    }

    #[test]
    fn upload_button_follows_selection_and_progress() {
        let mut state = SessionState::default();
        let view = upload_view(&state);
        assert!(!view.can_submit);
        assert_eq!(view.file_label, "No file selected");

        state.file = Some(SelectedFile {
            path: PathBuf::from("leads.csv"),
            name: "leads.csv".to_string(),
            size: Some(2048),
        });
        let view = upload_view(&state);
        assert!(view.can_submit);
        assert_eq!(view.file_label, "leads.csv (2.00 KB)");

        state.status = StatusOutcome::InProgress;
        let view = upload_view(&state);
        assert!(!view.can_submit);
        assert!(!view.in_progress);
        assert_eq!(view.button_label, "Upload");

        state.status = StatusOutcome::NotStarted;
        state.upload = UploadOutcome::InProgress;
        let view = upload_view(&state);
        assert!(!view.can_submit);
        assert!(view.in_progress);
        assert_eq!(view.button_label, "Uploading...");

        state.upload = UploadOutcome::Failed {
            message: "bad format".to_string(),
        };
        assert_eq!(upload_view(&state).error.as_deref(), Some("bad format"));
    }
}
