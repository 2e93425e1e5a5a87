//! Toolbar rendering for `GalleryApp`.
//!
//! Overview button, focus indicator, layout warnings and load status.

use eframe::egui;

use gallery_room::camera::CameraMode;

use super::GalleryApp;

impl GalleryApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let ready = self.room.is_ready();
            if ui
                .add_enabled(ready, egui::Button::new("\u{2302} Overview").min_size(egui::vec2(96.0, 24.0)))
                .clicked()
            {
                self.room.reset_camera();
            }
            ui.toggle_value(&mut self.show_grid, "Tiles");
            ui.separator();

            if let Some(err) = self.room.error() {
                ui.colored_label(egui::Color32::from_rgb(255, 80, 80), format!("Load failed: {}", err));
                return;
            }
            let Some(gallery) = self.room.gallery() else {
                ui.spinner();
                ui.label("Loading paintings...");
                return;
            };

            match gallery.camera().mode() {
                CameraMode::Default => {
                    let d = gallery.dimensions();
                    ui.label(format!(
                        "{} paintings \u{00B7} room {:.1} \u{00D7} {:.1} \u{00D7} {:.1} m",
                        gallery.paintings().len(),
                        d.width,
                        d.height,
                        d.depth
                    ));
                }
                CameraMode::Focused(id) => {
                    let title = gallery
                        .painting(id)
                        .map(|p| p.spec.title.as_str())
                        .filter(|t| !t.is_empty())
                        .unwrap_or("Untitled");
                    ui.strong(title);
                    ui.label("(click again to open the viewer, Esc to step back)");
                }
            }

            let degraded = gallery.report().degraded.len();
            if degraded > 0 {
                ui.separator();
                ui.colored_label(
                    egui::Color32::from_rgb(230, 160, 40),
                    format!("{} overlapping placements", degraded),
                );
            }

            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status);
            }
        });
    }
}
