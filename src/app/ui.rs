use super::state::{status_view, upload_view, StatusView};
use super::LeadLoader;
use crate::upload::{SessionState, Severity, Source};
use crate::utils::color::{accent, severity_color};
use eframe::egui::{self, Color32, RichText};
use std::time::Instant;

impl LeadLoader {
    pub fn render(&mut self, ctx: &egui::Context) {
        let snapshot = self.controller.snapshot();

        self.render_notification(ctx, &snapshot);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new("Lead Distribution Loader").color(accent()));
                });
                ui.add_space(20.0);

                self.render_source(ui, &snapshot);
                ui.add_space(12.0);
                self.render_upload(ui, &snapshot);
                ui.add_space(12.0);
                self.render_status(ui, &snapshot);
            });
        });
    }

    fn render_source(&mut self, ui: &mut egui::Ui, snapshot: &SessionState) {
        let mut chosen = snapshot.source;
        ui.group(|ui| {
            egui::ComboBox::from_label("Select File Source")
                .selected_text(chosen.label())
                .show_ui(ui, |ui| {
                    for source in Source::ALL {
                        ui.selectable_value(&mut chosen, source, source.label());
                    }
                });
        });
        if chosen != snapshot.source {
            self.choose_source(chosen);
        }
    }

    fn render_upload(&mut self, ui: &mut egui::Ui, snapshot: &SessionState) {
        let view = upload_view(snapshot);
        ui.group(|ui| {
            ui.label(RichText::new("Upload File").strong());
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("📁 Choose File").clicked() {
                    self.pick_file();
                }
                let weak = ui.visuals().weak_text_color();
                ui.label(RichText::new(&view.file_label).color(weak));
                if snapshot.file.is_some() && !view.in_progress && ui.small_button("✕").clicked() {
                    self.clear_file();
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.add_enabled_ui(view.can_submit, |ui| {
                    let button = egui::Button::new(view.button_label).min_size(egui::vec2(140.0, 32.0));
                    if ui.add(button).clicked() {
                        self.start_upload();
                    }
                });
                if view.in_progress {
                    ui.spinner();
                }
            });

            if let Some(error) = &view.error {
                ui.add_space(6.0);
                ui.colored_label(severity_color(Severity::Error), error);
            }
        });
    }

    fn render_status(&mut self, ui: &mut egui::Ui, snapshot: &SessionState) {
        let review_link = self.controller.config().review_link.clone();
        let view = status_view(snapshot, &review_link);
        if view == StatusView::Hidden {
            return;
        }

        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("File Processing Status").strong());
                let checking = view == StatusView::Checking;
                ui.add_enabled_ui(!checking, |ui| {
                    if ui.small_button("🔄 Check again").clicked() {
                        self.start_status_check();
                    }
                });
            });
            ui.add_space(8.0);

            if view == StatusView::Checking {
                ui.add(egui::ProgressBar::new(0.5).animate(true));
            }

            let color = view
                .severity()
                .map(severity_color)
                .unwrap_or(ui.visuals().text_color());

            if let Some(headline) = view.headline() {
                ui.colored_label(color, RichText::new(headline).strong());
            }

            if let Some((prompt, link)) = view.review_prompt() {
                ui.horizontal_wrapped(|ui| {
                    ui.label(prompt);
                    if ui.link("this link").on_hover_text(link).clicked() {
                        self.open_review_link();
                    }
                });
            } else if let Some(detail) = view.detail() {
                ui.colored_label(color, detail);
            }
        });
    }

    fn render_notification(&mut self, ctx: &egui::Context, snapshot: &SessionState) {
        let Some(note) = snapshot.visible_notification(Instant::now()) else {
            return;
        };
        let color = severity_color(note.severity);
        let mut dismissed = false;

        egui::TopBottomPanel::bottom("notification").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.colored_label(color, RichText::new(&note.message).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add(egui::Button::new(RichText::new("✕").color(Color32::GRAY)).frame(false))
                        .clicked()
                    {
                        dismissed = true;
                    }
                });
            });
            ui.add_space(6.0);
        });

        if dismissed {
            self.controller.dismiss_notification();
        }
    }
}
