use std::path::{Path, PathBuf};

use egui::{Align, Color32, Frame, Layout, RichText};
use log::{error, info, warn};

use trackscope::config::AppConfig;
use trackscope::map::{ControlId, ControlPosition, TrackMapSession};
use trackscope::telemetry::load_points;

use super::plot_display::PlotMapDisplay;

pub(crate) struct TrackViewerApp {
    session: TrackMapSession,
    display: PlotMapDisplay,
    config: AppConfig,
    /// Where a successfully loaded dataset is remembered; `None` keeps it in memory only
    config_path: Option<PathBuf>,
    source_file: Option<PathBuf>,
    status: Option<String>,
}

impl TrackViewerApp {
    pub(crate) fn new(
        config: AppConfig,
        config_path: Option<PathBuf>,
        source_file: Option<PathBuf>,
    ) -> Self {
        let mut session = TrackMapSession::new(&config.map);
        let mut display = PlotMapDisplay::new(config.map.min_view_span_deg);
        session.attach(&mut display);

        let mut app = Self {
            session,
            display,
            config,
            config_path,
            source_file: None,
            status: None,
        };
        if let Some(path) = source_file {
            app.load_file(&path);
        }
        app
    }

    fn load_file(&mut self, path: &Path) {
        match load_points(path) {
            Ok(raw_points) => {
                self.session.load(&raw_points, &mut self.display);
                let accepted = self.session.track().len();
                info!("Showing {} track points from {:?}", accepted, path);
                self.status = Some(format!(
                    "{} of {} points on track",
                    accepted,
                    raw_points.len()
                ));
                self.source_file = Some(path.to_path_buf());
                self.remember_dataset(path);
            }
            Err(e) => {
                error!("Could not load {:?}: {}", path, e);
                self.status = Some(format!("Could not load {}: {}", path.display(), e));
            }
        }
    }

    fn remember_dataset(&mut self, path: &Path) {
        if !self.config.remember_dataset(path) {
            return;
        }
        if let Some(config_path) = &self.config_path
            && let Err(e) = self.config.save_to(config_path)
        {
            warn!("Could not remember dataset path: {}", e);
        }
    }

    fn show_controls(&self, ui: &mut egui::Ui, position: ControlPosition) -> Option<ControlId> {
        let mut clicked = None;
        for (id, control) in self.display.controls() {
            if control.position == position && ui.button(control.label.as_str()).clicked() {
                clicked = Some(id);
            }
        }
        clicked
    }
}

impl eframe::App for TrackViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut clicked_control = None;

        egui::TopBottomPanel::top("track_top_bar")
            .frame(egui::Frame::new().inner_margin(4))
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    clicked_control = self.show_controls(ui, ControlPosition::TopLeft);
                    if ui.button("📂 Load Track").clicked()
                        && let Some(path) = rfd::FileDialog::new()
                            .add_filter("GPS track", &["json", "jsonl", "ndjson"])
                            .pick_file()
                    {
                        self.load_file(&path);
                    }
                    if let Some(source_file) = &self.source_file {
                        ui.label(format!("{}", source_file.display()));
                    }
                    if let Some(status) = &self.status {
                        ui.label(RichText::new(status).color(Color32::LIGHT_GRAY));
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(id) = self.show_controls(ui, ControlPosition::TopRight) {
                            clicked_control = Some(id);
                        }
                    });
                });
            });

        egui::TopBottomPanel::bottom("track_bottom_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(id) = self.show_controls(ui, ControlPosition::BottomLeft) {
                    clicked_control = Some(id);
                }
                if let Some(attribution) = self.display.attribution() {
                    ui.label(RichText::new(attribution).small());
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if let Some(id) = self.show_controls(ui, ControlPosition::BottomRight) {
                        clicked_control = Some(id);
                    }
                });
            });
        });

        egui::SidePanel::right("point_details")
            .default_width(280.)
            .show(ctx, |ui| {
                ui.heading("Point");
                ui.separator();
                match self.display.popup() {
                    Some(popup) => {
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            ui.monospace(popup);
                        });
                    }
                    None => {
                        ui.label(
                            RichText::new("Move the cursor onto the track")
                                .color(Color32::GRAY)
                                .italics(),
                        );
                    }
                }
            });

        let cursor = egui::CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| self.display.show(ui))
            .inner;

        if let Some(cursor) = cursor {
            self.session.on_pointer_move(cursor, &mut self.display);
        }
        if let Some(id) = clicked_control {
            self.session.on_control_clicked(id, &mut self.display);
        }
    }
}

impl Drop for TrackViewerApp {
    fn drop(&mut self) {
        self.session.detach(&mut self.display);
    }
}
