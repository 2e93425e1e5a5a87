//! Scene drawing for `GalleryApp`.
//!
//! Every node is a quad; its corners are projected with the gallery's
//! current camera and drawn as a textured egui mesh. Room surfaces are cut
//! into tiles one texture period wide so perspective stays believable and
//! tiles behind the camera can be dropped. Drawing is back to front.

use eframe::egui;
use glam::Vec3;

use gallery_room::render::{Material, Node, NodeKind};
use gallery_room::{ClickOutcome, Gallery};

use super::GalleryApp;

/// One projected quad waiting to be painted.
struct Patch<'a> {
    depth: f32,
    screen: [egui::Pos2; 4],
    uv: [egui::Pos2; 4],
    node: &'a Node,
}

fn to_pos(v: glam::Vec2, origin: egui::Pos2) -> egui::Pos2 {
    egui::pos2(origin.x + v.x, origin.y + v.y)
}

fn project_quad(gallery: &Gallery, corners: [Vec3; 4], origin: egui::Pos2) -> Option<[egui::Pos2; 4]> {
    let mut out = [egui::Pos2::ZERO; 4];
    for (slot, c) in out.iter_mut().zip(corners) {
        *slot = to_pos(gallery.project(c)?, origin);
    }
    Some(out)
}

fn tint(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Split a surface into tiles of `uv_repeat` granularity.
fn surface_patches<'a>(gallery: &Gallery, node: &'a Node, origin: egui::Pos2, out: &mut Vec<Patch<'a>>) {
    let cols = node.uv_repeat.x.ceil().max(1.0) as usize;
    let rows = node.uv_repeat.y.ceil().max(1.0) as usize;
    let eye = gallery.camera().current_pose().position;
    for r in 0..rows {
        for c in 0..cols {
            let x0 = c as f32 / cols as f32 - 0.5;
            let x1 = (c + 1) as f32 / cols as f32 - 0.5;
            let y0 = 0.5 - r as f32 / rows as f32;
            let y1 = 0.5 - (r + 1) as f32 / rows as f32;
            let corners = [
                node.local_point(x0, y0),
                node.local_point(x1, y0),
                node.local_point(x1, y1),
                node.local_point(x0, y1),
            ];
            let Some(screen) = project_quad(gallery, corners, origin) else {
                continue;
            };
            let center = (corners[0] + corners[2]) * 0.5;
            // uv spans exactly one texture period per tile (partial at the edges)
            let u = node.uv_repeat.x / cols as f32;
            let v = node.uv_repeat.y / rows as f32;
            out.push(Patch {
                depth: center.distance(eye),
                screen,
                uv: [
                    egui::pos2(0.0, 0.0),
                    egui::pos2(u, 0.0),
                    egui::pos2(u, v),
                    egui::pos2(0.0, v),
                ],
                node,
            });
        }
    }
}

impl GalleryApp {
    /// Central panel: resize, click routing and painting the room.
    pub fn draw_scene(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, egui::Sense::click());

        if rect.size() != self.view_size {
            self.view_size = rect.size();
            self.room.handle_resize(rect.width(), rect.height());
        }

        if response.clicked() && !self.room.lightbox().is_open() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = glam::Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);
                match self.room.handle_click(local) {
                    ClickOutcome::Link(url) => {
                        self.status = Some(format!("Opening {}", url));
                        ctx.open_url(egui::OpenUrl::new_tab(url));
                    }
                    ClickOutcome::Focused(id) => self.status = Some(format!("Painting {}", id)),
                    ClickOutcome::OpenedViewer { .. } | ClickOutcome::Miss => {}
                }
            }
        }

        let Some(gallery) = self.room.gallery() else {
            return;
        };
        let painter = ui.painter_at(rect);
        let origin = rect.min;
        let eye = gallery.camera().current_pose().position;

        let mut surfaces = Vec::new();
        let mut items = Vec::new();
        for (_, node) in gallery.scene().iter() {
            match node.kind {
                NodeKind::Surface(_) => surface_patches(gallery, node, origin, &mut surfaces),
                _ => {
                    if let Some(screen) = project_quad(gallery, node.corners(), origin) {
                        items.push(Patch {
                            depth: node.center.distance(eye),
                            screen,
                            uv: [
                                egui::pos2(0.0, 0.0),
                                egui::pos2(1.0, 0.0),
                                egui::pos2(1.0, 1.0),
                                egui::pos2(0.0, 1.0),
                            ],
                            node,
                        });
                    }
                }
            }
        }
        surfaces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        items.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        for patch in surfaces.iter().chain(items.iter()) {
            self.paint_patch(&painter, patch);
        }
    }

    fn paint_patch(&self, painter: &egui::Painter, patch: &Patch<'_>) {
        let (texture, color) = match &patch.node.material {
            Material::Image(url) => (self.textures.get(url), egui::Color32::from_gray(90)),
            Material::Surface { texture, tint: rgb } => {
                (texture.as_ref().and_then(|u| self.textures.get(u)), tint(*rgb))
            }
            Material::Text { .. } | Material::Link { .. } => (None, egui::Color32::from_rgb(250, 248, 242)),
        };

        match texture {
            Some(tex) => {
                let mut mesh = egui::Mesh::with_texture(tex.id());
                for (pos, uv) in patch.screen.iter().zip(patch.uv) {
                    mesh.vertices.push(egui::epaint::Vertex {
                        pos: *pos,
                        uv,
                        color: egui::Color32::WHITE,
                    });
                }
                mesh.add_triangle(0, 1, 2);
                mesh.add_triangle(0, 2, 3);
                painter.add(egui::Shape::mesh(mesh));
            }
            None => {
                let stroke = if self.show_grid && matches!(patch.node.kind, NodeKind::Surface(_)) {
                    egui::Stroke::new(1.0, egui::Color32::from_black_alpha(24))
                } else {
                    egui::Stroke::NONE
                };
                painter.add(egui::Shape::convex_polygon(patch.screen.to_vec(), color, stroke));
            }
        }

        match &patch.node.material {
            Material::Text { lines, heading } => self.paint_lines(painter, patch, lines, *heading, false),
            Material::Link { label } => {
                self.paint_lines(painter, patch, std::slice::from_ref(label), false, true)
            }
            _ => {}
        }
    }

    fn paint_lines(&self, painter: &egui::Painter, patch: &Patch<'_>, lines: &[String], heading: bool, link: bool) {
        if lines.is_empty() {
            return;
        }
        let [tl, tr, _, bl] = patch.screen;
        let height = tl.distance(bl);
        let width = tl.distance(tr);
        let line_px = height / lines.len() as f32;
        let font_px = (line_px * if heading { 0.8 } else { 0.7 }).min(48.0);
        if font_px < 6.0 || width < 24.0 {
            return;
        }
        let font = if heading {
            egui::FontId::proportional(font_px)
        } else {
            egui::FontId::monospace(font_px)
        };
        let color = if link {
            egui::Color32::from_rgb(40, 90, 200)
        } else {
            egui::Color32::from_gray(30)
        };
        let down = (bl - tl) / lines.len() as f32;
        for (i, line) in lines.iter().enumerate() {
            let at = tl + down * (i as f32 + 0.5) + egui::vec2(4.0, 0.0);
            painter.text(at, egui::Align2::LEFT_CENTER, line, font.clone(), color);
        }
    }
}
