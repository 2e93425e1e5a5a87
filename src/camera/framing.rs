//! Camera framing: a painting's close-up pose and the whole-room overview.

use glam::{Quat, Vec2, Vec3};

use super::CameraPose;
use crate::config::CameraConfig;
use crate::error::{GalleryError, Result};
use crate::layout::{LoadedPainting, Orientation, Placement, RoomDimensions, Size2};

/// Drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }
}

/// Close-up pose for one painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramedPose {
    pub pose: CameraPose,
    /// Point the camera looks at
    pub target: Vec3,
    pub distance: f32,
}

/// Distance at which the larger painting edge (times `padding`) fills the view.
pub fn framing_distance(size: Size2, fov_y: f32, padding: f32) -> f32 {
    size.max_edge() * padding / (2.0 * (fov_y * 0.5).tan())
}

/// Pose that frames `painting` hanging at `placement`.
///
/// The distance depends on the main painting only. With thumbnails the
/// look-at point drifts toward the composition centre (along the wall for
/// portrait strips, downward for landscape strips) but never so far that
/// the painting itself leaves the frame.
pub fn optimal_camera_pose(
    placement: &Placement,
    painting: &LoadedPainting,
    cfg: &CameraConfig,
    viewport: Viewport,
) -> Result<FramedPose> {
    let main = painting.main_size;
    let fov_y = cfg.fov_y();
    let half_tan = (fov_y * 0.5).tan();
    let distance = framing_distance(main, fov_y, cfg.framing_padding);

    if !distance.is_finite() || distance <= 0.0 {
        return Err(GalleryError::Framing {
            painting: painting.id,
            reason: format!("degenerate framing distance {}", distance),
        });
    }

    let shift = if painting.has_thumbnails() {
        let comp = placement.composition_size;
        match painting.orientation {
            Orientation::Portrait => {
                let half_view_w = distance * half_tan * viewport.aspect();
                let cap = (half_view_w - main.width * 0.5).max(0.0);
                Vec2::new(((comp.width - main.width) * 0.5).min(cap), 0.0)
            }
            Orientation::Landscape => {
                let half_view_h = distance * half_tan;
                let cap = (half_view_h - main.height * 0.5).max(0.0);
                Vec2::new(0.0, -((comp.height - main.height) * 0.5).min(cap))
            }
        }
    } else {
        Vec2::ZERO
    };

    let wall = placement.wall;
    let target = wall.offset(placement.position, shift, 0.0);
    let eye = target + wall.normal() * distance;
    let pose = CameraPose::new(eye, wall.rotation());

    if !pose.is_finite() || !target.is_finite() {
        return Err(GalleryError::Framing {
            painting: painting.id,
            reason: "non-finite camera pose".into(),
        });
    }
    log::debug!(
        "Framed {} on {} wall: distance {:.2}, shift ({:.2}, {:.2})",
        painting.id,
        wall,
        distance,
        shift.x,
        shift.y
    );

    Ok(FramedPose {
        pose,
        target,
        distance,
    })
}

/// Overview pose: the room's open side fills the view.
///
/// The limiting dimension fills the field of view so the whole opening stays
/// visible: fit-to-width when the room is proportionally wider than the
/// viewport, fit-to-height otherwise. The camera stands outside the open
/// `+z` side looking straight down `-z`.
pub fn default_pose(room: &RoomDimensions, cfg: &CameraConfig, viewport: Viewport) -> CameraPose {
    let half_tan = (cfg.fov_y() * 0.5).tan();
    let room_aspect = room.width / room.height;
    let distance = if room_aspect > viewport.aspect() {
        room.width * 0.5 / (half_tan * viewport.aspect())
    } else {
        room.height * 0.5 / half_tan
    };
    CameraPose::new(
        Vec3::new(
            0.0,
            room.height * 0.5 + cfg.default_height_offset,
            room.depth * 0.5 + distance,
        ),
        Quat::IDENTITY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThumbnailConfig;
    use crate::layout::painting::tests::painting;
    use crate::layout::{composition_size, Wall};

    fn placed(p: &LoadedPainting, wall: Wall, position: Vec3) -> Placement {
        Placement {
            painting: p.id,
            wall,
            position,
            rotation_y: wall.rotation_y(),
            composition_size: composition_size(p, &ThumbnailConfig::default()),
        }
    }

    #[test]
    fn distance_fits_the_long_edge() {
        let fov = 60f32.to_radians();
        let d = framing_distance(Size2::new(2.0, 1.5), fov, 1.2);
        assert!((d - 2.4 / (2.0 * (30f32.to_radians()).tan())).abs() < 1e-5);
        let same = framing_distance(Size2::new(1.5, 2.0), fov, 1.2);
        assert!((d - same).abs() < 1e-6);
    }

    #[test]
    fn camera_sits_on_the_wall_normal() {
        let cfg = CameraConfig::default();
        let vp = Viewport::new(1600.0, 900.0);
        let p = painting(300, 400, &[]);
        for (wall, axis) in [(Wall::Left, Vec3::X), (Wall::Right, Vec3::NEG_X), (Wall::Front, Vec3::Z)] {
            let at = Vec3::new(1.0, 2.5, -3.0);
            let framed = optimal_camera_pose(&placed(&p, wall, at), &p, &cfg, vp).unwrap();
            assert_eq!(framed.target, at);
            let off = framed.pose.position - at;
            assert!((off.normalize() - axis).length() < 1e-5, "{}", wall);
            assert!((off.length() - framed.distance).abs() < 1e-4);
            assert!((framed.pose.forward() + axis).length() < 1e-5);
        }
    }

    #[test]
    fn portrait_thumbnails_shift_along_the_wall() {
        let cfg = CameraConfig::default();
        let vp = Viewport::new(1600.0, 900.0);
        let p = painting(300, 400, &[(100, 100); 3]);
        let at = Vec3::new(0.0, 2.5, -5.0);
        let framed = optimal_camera_pose(&placed(&p, Wall::Front, at), &p, &cfg, vp).unwrap();
        let shift = framed.target - at;
        // one estimated column: (0.5 + 0.08) / 2
        assert!((shift.x - 0.29).abs() < 1e-5);
        assert_eq!(shift.y, 0.0);
    }

    #[test]
    fn shift_is_capped_to_keep_the_painting_in_view() {
        let cfg = CameraConfig::default();
        // Square viewport: less horizontal room than the strip needs
        let vp = Viewport::new(900.0, 900.0);
        let p = painting(300, 400, &[(100, 100); 12]);
        let at = Vec3::new(0.0, 2.5, -5.0);
        let framed = optimal_camera_pose(&placed(&p, Wall::Front, at), &p, &cfg, vp).unwrap();
        let half_view_w = framed.distance * (cfg.fov_y() * 0.5).tan() * vp.aspect();
        let cap = half_view_w - p.main_size.width * 0.5;
        let wanted = (placed(&p, Wall::Front, at).composition_size.width - p.main_size.width) * 0.5;
        assert!(wanted > cap);
        let shift = (framed.target - at).x;
        assert!((shift - cap).abs() < 1e-4);
        // the painting's far edge is still inside the frame
        assert!(shift + p.main_size.width * 0.5 <= half_view_w + 1e-4);
    }

    #[test]
    fn landscape_thumbnails_shift_down() {
        let cfg = CameraConfig::default();
        let vp = Viewport::new(1600.0, 900.0);
        let p = painting(400, 300, &[(100, 100); 3]);
        let at = Vec3::new(-6.0, 3.0, 1.0);
        let framed = optimal_camera_pose(&placed(&p, Wall::Left, at), &p, &cfg, vp).unwrap();
        let shift = framed.target - at;
        assert!(shift.y < 0.0);
        assert!(shift.x.abs() < 1e-6 && shift.z.abs() < 1e-6);
        let half_view_h = framed.distance * (cfg.fov_y() * 0.5).tan();
        assert!(-shift.y <= half_view_h - p.main_size.height * 0.5 + 1e-5);
    }

    #[test]
    fn degenerate_fov_is_a_framing_error() {
        let cfg = CameraConfig {
            fov_y_degrees: 0.0,
            ..CameraConfig::default()
        };
        let p = painting(300, 400, &[]);
        let err = optimal_camera_pose(&placed(&p, Wall::Front, Vec3::ZERO), &p, &cfg, Viewport::new(800.0, 600.0))
            .unwrap_err();
        assert!(matches!(err, GalleryError::Framing { .. }));
    }

    #[test]
    fn default_pose_fits_limiting_dimension() {
        let cfg = CameraConfig::default();
        let half_tan = (cfg.fov_y() * 0.5).tan();
        let room = RoomDimensions {
            width: 16.0,
            height: 6.0,
            depth: 14.0,
        };
        // room aspect 2.67 > 16:9 → width is the limit
        let vp = Viewport::new(1600.0, 900.0);
        let wide = default_pose(&room, &cfg, vp);
        assert!((wide.position.z - (7.0 + 8.0 / (half_tan * vp.aspect()))).abs() < 1e-3);
        assert_eq!(wide.position.y, 3.0);
        assert_eq!(wide.rotation, Quat::IDENTITY);

        // narrower viewport → still width, further back
        let vp = Viewport::new(600.0, 900.0);
        let tall = default_pose(&room, &cfg, vp);
        assert!((tall.position.z - (7.0 + 8.0 / (half_tan * vp.aspect()))).abs() < 1e-3);
        assert!(tall.position.z > wide.position.z);

        // square room in a wide viewport → height is the limit
        let cube = RoomDimensions {
            width: 6.0,
            height: 6.0,
            depth: 6.0,
        };
        let fit = default_pose(&cube, &cfg, Viewport::new(1600.0, 900.0));
        assert!((fit.position.z - (3.0 + 3.0 / half_tan)).abs() < 1e-4);
    }

    #[test]
    fn default_pose_keeps_the_whole_opening_in_view() {
        let cfg = CameraConfig::default();
        let half_tan = (cfg.fov_y() * 0.5).tan();
        let room = RoomDimensions {
            width: 12.0,
            height: 5.0,
            depth: 8.0,
        };
        for (w, h) in [(1920.0, 1080.0), (900.0, 900.0), (600.0, 1000.0), (3000.0, 800.0)] {
            let vp = Viewport::new(w, h);
            let pose = default_pose(&room, &cfg, vp);
            let distance = pose.position.z - room.depth * 0.5;
            let half_h = distance * half_tan;
            let half_w = half_h * vp.aspect();
            assert!(half_w >= room.width * 0.5 - 1e-3, "{}x{}", w, h);
            assert!(half_h >= room.height * 0.5 - 1e-3, "{}x{}", w, h);
            // and one of them is exact
            let snug = (half_w - room.width * 0.5).abs().min((half_h - room.height * 0.5).abs());
            assert!(snug < 1e-3, "{}x{}", w, h);
        }
    }
}
