//! Full-screen image overlay driven by the room's `Carousel`.

use eframe::egui;

use gallery_room::viewer::Lightbox;

use super::GalleryApp;

impl GalleryApp {
    /// Draw the viewer over everything while it is open. Arrow keys page,
    /// Escape closes.
    pub fn draw_lightbox(&mut self, ctx: &egui::Context) {
        let carousel = self.room.lightbox();
        if !carousel.is_open() {
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.room.reset_camera();
            }
            return;
        }

        let (left, right, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Escape),
            )
        });
        let mut close = escape;
        let mut step: i32 = match (left, right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };

        let screen = ctx.screen_rect();
        let url = carousel.current_url().map(str::to_string);
        let position = format!("{} / {}", carousel.index() + 1, carousel.len());

        egui::Area::new(egui::Id::new("lightbox"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let painter = ui.painter();
                painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(230));

                let frame = screen.shrink2(egui::vec2(80.0, 60.0));
                match url.as_deref().and_then(|u| self.textures.get(u)) {
                    Some(tex) => {
                        let size = tex.size_vec2();
                        let scale = (frame.width() / size.x).min(frame.height() / size.y);
                        let rect = egui::Rect::from_center_size(frame.center(), size * scale);
                        painter.image(
                            tex.id(),
                            rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                    None => {
                        painter.text(
                            frame.center(),
                            egui::Align2::CENTER_CENTER,
                            url.as_deref().unwrap_or_default(),
                            egui::FontId::proportional(16.0),
                            egui::Color32::LIGHT_GRAY,
                        );
                    }
                }
                painter.text(
                    egui::pos2(screen.center().x, screen.bottom() - 28.0),
                    egui::Align2::CENTER_CENTER,
                    &position,
                    egui::FontId::proportional(15.0),
                    egui::Color32::WHITE,
                );

                let button = |ui: &mut egui::Ui, at: egui::Pos2, label: &str| {
                    let rect = egui::Rect::from_center_size(at, egui::vec2(44.0, 44.0));
                    ui.put(rect, egui::Button::new(egui::RichText::new(label).size(22.0)))
                        .clicked()
                };
                if button(ui, egui::pos2(screen.left() + 36.0, screen.center().y), "\u{276E}") {
                    step = -1;
                }
                if button(ui, egui::pos2(screen.right() - 36.0, screen.center().y), "\u{276F}") {
                    step = 1;
                }
                if button(ui, egui::pos2(screen.right() - 36.0, screen.top() + 36.0), "\u{2715}") {
                    close = true;
                }
            });

        let carousel = self.room.lightbox_mut();
        if close {
            carousel.close();
        } else if step < 0 {
            carousel.previous();
        } else if step > 0 {
            carousel.next();
        }
    }
}
