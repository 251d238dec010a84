mod state;
mod ui;

use crate::config::LoaderConfig;
use crate::upload::{CandidateFile, HttpLoaderApi, Severity, Source, UploadController};
use eframe::{egui, App};
use rfd::FileDialog;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

const BUSY_REPAINT: Duration = Duration::from_millis(100);

pub struct LeadLoader {
    runtime: Runtime,
    controller: UploadController,
}

impl LeadLoader {
    pub fn new(_cc: &eframe::CreationContext<'_>, runtime: Runtime, config: LoaderConfig) -> Self {
        info!("initializing lead loader");
        let api = Arc::new(HttpLoaderApi::new(&config));
        Self {
            runtime,
            controller: UploadController::new(api, config),
        }
    }

    fn choose_source(&mut self, source: Source) {
        self.controller.select_source(source);
    }

    fn pick_file(&mut self) {
        let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file() else {
            debug!("file dialog closed without a selection");
            return;
        };
        if let Err(e) = self.controller.select_file(CandidateFile::from_path(path)) {
            debug!(error = %e, "file selection rejected");
        }
    }

    fn clear_file(&mut self) {
        self.controller.clear_file();
    }

    fn start_upload(&mut self) {
        let controller = self.controller.clone();
        self.runtime.spawn(async move { controller.submit_upload().await });
    }

    fn start_status_check(&mut self) {
        let controller = self.controller.clone();
        self.runtime.spawn(async move { controller.check_status().await });
    }

    fn open_review_link(&mut self) {
        let link = self.controller.config().review_link.clone();
        if let Err(e) = open::that(&link) {
            warn!(%link, error = %e, "could not open review link");
            self.controller
                .notify(format!("Could not open the review link: {}", e), Severity::Warning);
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        let snapshot = self.controller.snapshot();
        if snapshot.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        } else if let Some(note) = snapshot.visible_notification(Instant::now()) {
            ctx.request_repaint_after(note.remaining(Instant::now()));
        }
    }
}

impl App for LeadLoader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render(ctx);
        self.schedule_repaint(ctx);
    }
}
