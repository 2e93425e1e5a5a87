//! The gallery room as seen by the page layer.
//!
//! [`Gallery`] is the finished scene: paintings, placements, the node arena
//! and the camera. [`GalleryRoom`] wraps it with the loading lifecycle, the
//! click handler and the lightbox.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use glam::{Vec2, Vec3};
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::{optimal_camera_pose, CameraMode, Choreographer, Viewport};
use crate::config::GalleryConfig;
use crate::content::PaintingSpec;
use crate::engine::GalleryEngine;
use crate::error::{GalleryError, Result};
use crate::layout::{LayoutReport, LoadedPainting, PaintingId, Placement, RoomDimensions};
use crate::net::image::ImageSource;
use crate::picking::{self, Hit};
use crate::render::room::RoomShell;
use crate::render::scene::Scene;
use crate::viewer::Lightbox;

pub struct Gallery {
    pub(crate) paintings: Vec<LoadedPainting>,
    /// One per painting, indexed by `PaintingId`
    pub(crate) placements: Vec<Placement>,
    pub(crate) dimensions: RoomDimensions,
    pub(crate) report: LayoutReport,
    pub(crate) scene: Scene,
    pub(crate) shell: RoomShell,
    pub(crate) camera: Choreographer,
    pub(crate) textures: HashMap<String, Arc<RgbaImage>>,
}

impl Gallery {
    pub fn paintings(&self) -> &[LoadedPainting] {
        &self.paintings
    }

    pub fn painting(&self, id: PaintingId) -> Option<&LoadedPainting> {
        self.paintings.get(id.0)
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement(&self, id: PaintingId) -> Option<&Placement> {
        self.placements.get(id.0).filter(|p| p.painting == id)
    }

    pub fn dimensions(&self) -> RoomDimensions {
        self.dimensions
    }

    pub fn report(&self) -> &LayoutReport {
        &self.report
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn shell(&self) -> &RoomShell {
        &self.shell
    }

    pub fn camera(&self) -> &Choreographer {
        &self.camera
    }

    pub fn texture(&self, url: &str) -> Option<&Arc<RgbaImage>> {
        self.textures.get(url)
    }

    pub fn textures(&self) -> impl Iterator<Item = (&str, &Arc<RgbaImage>)> {
        self.textures.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn focused(&self) -> Option<PaintingId> {
        match self.camera.mode() {
            CameraMode::Focused(id) => Some(id),
            CameraMode::Default => None,
        }
    }

    /// Point the camera at a painting. On error nothing changes.
    pub fn focus(&mut self, id: PaintingId) -> Result<()> {
        let painting = self.paintings.get(id.0).ok_or(GalleryError::UnknownPainting(id))?;
        let placement = self
            .placements
            .get(id.0)
            .filter(|p| p.painting == id)
            .ok_or(GalleryError::UnknownPainting(id))?;
        if self.scene.painting_node(id).is_none() {
            return Err(GalleryError::Framing {
                painting: id,
                reason: "painting has no scene node".into(),
            });
        }
        let framed = optimal_camera_pose(placement, painting, self.camera.config(), self.camera.viewport())?;
        self.camera.focus(id, framed.pose);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.camera.reset();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.resize(viewport);
    }

    pub fn tick(&mut self, dt: f32) {
        self.camera.tick(dt);
    }

    /// What lies under a screen point (pixels, origin top-left).
    pub fn pick(&self, screen: Vec2) -> Option<Hit> {
        let viewport = self.camera.viewport();
        let cfg = self.camera.config();
        let ndc = picking::screen_to_ndc(screen, viewport);
        let ray = picking::ray_from_ndc(&self.camera.current_pose(), ndc, cfg.fov_y(), viewport.aspect());
        picking::pick(&self.scene, &ray).map(|(_, hit)| hit)
    }

    /// Screen position of a world point from the current camera, if in front of it.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let viewport = self.camera.viewport();
        let cfg = self.camera.config();
        picking::project_to_ndc(&self.camera.current_pose(), world, cfg.fov_y(), viewport.aspect(), cfg.near)
            .map(|ndc| picking::ndc_to_screen(ndc, viewport))
    }
}

/// Result of routing one click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Camera is flying to this painting
    Focused(PaintingId),
    /// The focused painting (or one of its thumbnails) was clicked again
    OpenedViewer { painting: PaintingId, index: usize },
    Link(String),
    Miss,
}

pub type ClickHandler = Box<dyn FnMut(PaintingId, usize)>;
pub type ReadyCallback = Box<dyn FnOnce(&Gallery)>;

enum RoomState {
    Loading(Receiver<Result<Gallery>>),
    Ready(Gallery),
    Failed(String),
    Destroyed,
}

/// Page-facing handle: loading lifecycle, focus requests, clicks.
pub struct GalleryRoom<L: Lightbox> {
    state: RoomState,
    lightbox: L,
    click_handler: Option<ClickHandler>,
    on_ready: Option<ReadyCallback>,
    /// Latest viewport; applied when loading finishes
    viewport: Viewport,
}

impl<L: Lightbox> GalleryRoom<L> {
    /// Start loading in the background. `seed` makes the arrangement reproducible.
    pub fn spawn(
        specs: Vec<PaintingSpec>,
        config: GalleryConfig,
        source: Arc<dyn ImageSource>,
        viewport: Viewport,
        seed: Option<u64>,
        lightbox: L,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_os_rng(),
            };
            let engine = GalleryEngine::new(source, config);
            let _ = tx.send(engine.build(&specs, viewport, &mut rng));
        });
        Self {
            state: RoomState::Loading(rx),
            lightbox,
            click_handler: None,
            on_ready: None,
            viewport,
        }
    }

    /// Wrap an already built gallery.
    pub fn from_gallery(gallery: Gallery, lightbox: L) -> Self {
        let viewport = gallery.camera.viewport();
        Self {
            state: RoomState::Ready(gallery),
            lightbox,
            click_handler: None,
            on_ready: None,
            viewport,
        }
    }

    /// Called once, from [`poll`](Self::poll), when the room becomes ready.
    pub fn set_ready_callback(&mut self, f: impl FnOnce(&Gallery) + 'static) {
        self.on_ready = Some(Box::new(f));
    }

    /// Notified with `(painting, image index)` on every painting/thumbnail click.
    pub fn set_click_handler(&mut self, f: impl FnMut(PaintingId, usize) + 'static) {
        self.click_handler = Some(Box::new(f));
    }

    /// Collect a finished load, if any, and fire the ready callback.
    pub fn poll(&mut self) {
        if let RoomState::Loading(rx) = &self.state {
            let next = match rx.try_recv() {
                Ok(Ok(mut gallery)) => {
                    if gallery.camera.viewport() != self.viewport {
                        gallery.resize(self.viewport);
                    }
                    log::info!("Gallery ready: {} paintings", gallery.paintings.len());
                    Some(RoomState::Ready(gallery))
                }
                Ok(Err(e)) => {
                    log::error!("Gallery failed to load: {}", e);
                    Some(RoomState::Failed(e.to_string()))
                }
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    log::error!("Gallery loader exited without a result");
                    Some(RoomState::Failed("loader thread exited".into()))
                }
            };
            if let Some(state) = next {
                self.state = state;
            }
        }
        if let RoomState::Ready(gallery) = &self.state {
            if let Some(f) = self.on_ready.take() {
                f(gallery);
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, RoomState::Ready(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RoomState::Loading(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RoomState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        match &self.state {
            RoomState::Ready(g) => Some(g),
            _ => None,
        }
    }

    pub fn lightbox(&self) -> &L {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut L {
        &mut self.lightbox
    }

    fn ready_mut(&mut self, action: &str) -> Option<&mut Gallery> {
        match &mut self.state {
            RoomState::Ready(g) => Some(g),
            RoomState::Destroyed => {
                log::warn!("{} ignored: gallery destroyed", action);
                None
            }
            _ => {
                log::warn!("{} ignored: {}", action, GalleryError::NotReady);
                None
            }
        }
    }

    pub fn focus_on_id(&mut self, id: PaintingId) {
        let Some(gallery) = self.ready_mut("focus") else {
            return;
        };
        match gallery.focus(id) {
            Ok(()) => {}
            Err(e @ GalleryError::UnknownPainting(_)) => log::warn!("focus ignored: {}", e),
            Err(e) => log::error!("focus aborted: {}", e),
        }
    }

    pub fn reset_camera(&mut self) {
        if let Some(gallery) = self.ready_mut("reset") {
            gallery.reset();
        }
    }

    pub fn handle_resize(&mut self, width: f32, height: f32) {
        if matches!(self.state, RoomState::Destroyed) {
            log::warn!("resize ignored: gallery destroyed");
            return;
        }
        self.viewport = Viewport::new(width, height);
        if let RoomState::Ready(gallery) = &mut self.state {
            gallery.resize(self.viewport);
        }
    }

    /// Route a click at a screen point (pixels, origin top-left).
    pub fn handle_click(&mut self, screen: Vec2) -> ClickOutcome {
        let Some(gallery) = self.ready_mut("click") else {
            return ClickOutcome::Miss;
        };
        let hit = match gallery.pick(screen) {
            Some(hit) => hit,
            None => return ClickOutcome::Miss,
        };
        match hit {
            Hit::Link { url, .. } => ClickOutcome::Link(url),
            Hit::Image { painting, index } => {
                if let Some(handler) = self.click_handler.as_mut() {
                    handler(painting, index);
                }
                let RoomState::Ready(gallery) = &mut self.state else {
                    return ClickOutcome::Miss;
                };
                if gallery.focused() == Some(painting) {
                    let Some(p) = gallery.painting(painting) else {
                        return ClickOutcome::Miss;
                    };
                    let (main, thumbs) = p.image_urls();
                    self.lightbox.open(&main, &thumbs, index);
                    ClickOutcome::OpenedViewer { painting, index }
                } else {
                    match gallery.focus(painting) {
                        Ok(()) => ClickOutcome::Focused(painting),
                        Err(e) => {
                            log::error!("focus aborted: {}", e);
                            ClickOutcome::Miss
                        }
                    }
                }
            }
        }
    }

    /// Advance the camera one frame. Also collects a finished load.
    pub fn tick(&mut self, dt: f32) {
        self.poll();
        if let RoomState::Ready(gallery) = &mut self.state {
            gallery.tick(dt);
        }
    }

    /// Release the scene, textures and handlers. Later calls warn and do nothing.
    pub fn destroy(&mut self) {
        if matches!(self.state, RoomState::Destroyed) {
            log::warn!("destroy ignored: gallery already destroyed");
            return;
        }
        self.lightbox.close();
        self.click_handler = None;
        self.on_ready = None;
        self.state = RoomState::Destroyed;
        log::info!("Gallery destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self.state, RoomState::Destroyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::painting::tests::FakeImages;
    use crate::viewer::Carousel;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    const IMAGES: &[(&str, u32, u32)] = &[("a", 400, 300), ("b", 300, 400)];

    fn specs() -> Vec<PaintingSpec> {
        vec![PaintingSpec::new("a"), PaintingSpec::new("b")]
    }

    fn built() -> Gallery {
        GalleryEngine::new(Arc::new(FakeImages::new(IMAGES)), GalleryConfig::default())
            .build(&specs(), Viewport::new(1280.0, 720.0), &mut StdRng::seed_from_u64(1))
            .unwrap()
    }

    fn wait_ready<L: Lightbox>(room: &mut GalleryRoom<L>) {
        let start = Instant::now();
        while room.is_loading() && start.elapsed() < Duration::from_secs(10) {
            room.poll();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn ready_callback_fires_exactly_once() {
        let mut room = GalleryRoom::spawn(
            specs(),
            GalleryConfig::default(),
            Arc::new(FakeImages::new(IMAGES)),
            Viewport::new(800.0, 600.0),
            Some(3),
            Carousel::new(),
        );
        let count = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&count);
        room.set_ready_callback(move |g| {
            assert_eq!(g.paintings().len(), 2);
            *seen.borrow_mut() += 1;
        });
        wait_ready(&mut room);
        room.poll();
        room.tick(0.016);
        assert!(room.is_ready());
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn failed_load_never_becomes_ready() {
        let mut room = GalleryRoom::spawn(
            specs(),
            GalleryConfig::default(),
            Arc::new(FakeImages::new(&[("a", 400, 300)])),
            Viewport::new(800.0, 600.0),
            Some(3),
            Carousel::new(),
        );
        wait_ready(&mut room);
        assert!(!room.is_ready());
        assert!(room.error().unwrap_or_default().contains("load"));
        // requests before ready are no-ops
        room.focus_on_id(PaintingId(0));
        room.reset_camera();
        assert_eq!(room.handle_click(Vec2::new(400.0, 300.0)), ClickOutcome::Miss);
    }

    #[test]
    fn resize_while_loading_is_applied_on_ready() {
        let mut room = GalleryRoom::spawn(
            specs(),
            GalleryConfig::default(),
            Arc::new(FakeImages::new(IMAGES)),
            Viewport::new(800.0, 600.0),
            Some(3),
            Carousel::new(),
        );
        room.handle_resize(1920.0, 1080.0);
        wait_ready(&mut room);
        let g = room.gallery().unwrap();
        assert_eq!(g.camera().viewport(), Viewport::new(1920.0, 1080.0));
    }

    #[test]
    fn unknown_focus_is_a_warning_no_op() {
        let mut room = GalleryRoom::from_gallery(built(), Carousel::new());
        let before = room.gallery().unwrap().camera().rig().desired;
        room.focus_on_id(PaintingId(42));
        let g = room.gallery().unwrap();
        assert_eq!(g.camera().rig().desired, before);
        assert_eq!(g.camera().mode(), CameraMode::Default);
    }

    #[test]
    fn gallery_focus_reports_unknown_ids() {
        let mut g = built();
        assert!(matches!(g.focus(PaintingId(9)), Err(GalleryError::UnknownPainting(PaintingId(9)))));
        g.focus(PaintingId(1)).unwrap();
        assert_eq!(g.focused(), Some(PaintingId(1)));
    }

    #[test]
    fn click_on_empty_wall_misses() {
        let mut room = GalleryRoom::from_gallery(built(), Carousel::new());
        // straight up into the ceiling area above everything
        assert_eq!(room.handle_click(Vec2::new(640.0, 1.0)), ClickOutcome::Miss);
    }

    #[test]
    fn destroy_releases_everything() {
        let mut room = GalleryRoom::from_gallery(built(), Carousel::new());
        room.set_click_handler(|_, _| {});
        room.destroy();
        assert!(room.is_destroyed());
        assert!(room.gallery().is_none());
        room.focus_on_id(PaintingId(0));
        room.handle_resize(10.0, 10.0);
        room.destroy();
        assert!(room.is_destroyed());
    }

    #[test]
    fn projected_painting_centre_picks_that_painting() {
        let g = built();
        for p in g.placements() {
            if let Some(screen) = g.project(p.position) {
                if screen.x > 0.0 && screen.x < 1280.0 && screen.y > 0.0 && screen.y < 720.0 {
                    assert_eq!(
                        g.pick(screen),
                        Some(Hit::Image {
                            painting: p.painting,
                            index: 0
                        })
                    );
                }
            }
        }
    }
}
