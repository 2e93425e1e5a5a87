//! `GalleryApp` — the top-level egui application state.
//!
//! The struct lives here; its methods are split across the sibling modules:
//!
//! - `toolbar`    — status strip and camera controls
//! - `scene_view` — projecting the room onto the painter, click routing
//! - `lightbox`   — full-screen image overlay

pub mod lightbox;
pub mod scene_view;
pub mod toolbar;

use std::collections::HashMap;
use std::time::Instant;

use eframe::egui;

use gallery_room::viewer::Carousel;
use gallery_room::GalleryRoom;

pub struct GalleryApp {
    pub room: GalleryRoom<Carousel>,
    /// Uploaded textures keyed by image url
    pub textures: HashMap<String, egui::TextureHandle>,
    pub textures_uploaded: bool,
    pub last_frame: Instant,
    /// Last viewport size pushed to the room
    pub view_size: egui::Vec2,
    pub show_grid: bool,
    pub status: Option<String>,
}

impl GalleryApp {
    pub fn new(room: GalleryRoom<Carousel>) -> Self {
        Self {
            room,
            textures: HashMap::new(),
            textures_uploaded: false,
            last_frame: Instant::now(),
            view_size: egui::Vec2::ZERO,
            show_grid: true,
            status: None,
        }
    }

    /// Upload every decoded image once the gallery is ready.
    pub fn upload_textures(&mut self, ctx: &egui::Context) {
        if self.textures_uploaded {
            return;
        }
        let Some(gallery) = self.room.gallery() else {
            return;
        };
        for (url, pixels) in gallery.textures() {
            let size = [pixels.width() as usize, pixels.height() as usize];
            let image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
            let tex = ctx.load_texture(format!("img_{}", url), image, egui::TextureOptions::LINEAR);
            self.textures.insert(url.to_string(), tex);
        }
        log::debug!("Uploaded {} textures", self.textures.len());
        self.textures_uploaded = true;
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.room.tick(dt);
        self.upload_textures(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_rgb(24, 24, 28)))
            .show(ctx, |ui| {
                self.draw_scene(ui, ctx);
            });

        self.draw_lightbox(ctx);

        // The camera eases forever; keep frames coming
        ctx.request_repaint();
    }
}
