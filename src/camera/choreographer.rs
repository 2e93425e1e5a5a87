//! Focus/reset/resize state machine on top of [`CameraRig`].

use super::framing::{default_pose, Viewport};
use super::{CameraPose, CameraRig, ResizeHold};
use crate::config::CameraConfig;
use crate::layout::{PaintingId, RoomDimensions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Overview of the whole room
    Default,
    Focused(PaintingId),
}

/// Owns the rig and decides which desired pose and speeds are active.
#[derive(Debug, Clone)]
pub struct Choreographer {
    rig: CameraRig,
    mode: CameraMode,
    room: RoomDimensions,
    viewport: Viewport,
    cfg: CameraConfig,
}

impl Choreographer {
    /// Start at rest on the overview pose.
    pub fn new(room: RoomDimensions, viewport: Viewport, cfg: CameraConfig) -> Self {
        let pose = default_pose(&room, &cfg, viewport);
        Self {
            rig: CameraRig::at_rest(pose, cfg.reset_speeds),
            mode: CameraMode::Default,
            room,
            viewport,
            cfg,
        }
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &CameraConfig {
        &self.cfg
    }

    pub fn current_pose(&self) -> CameraPose {
        self.rig.current()
    }

    pub fn default_pose(&self) -> CameraPose {
        default_pose(&self.room, &self.cfg, self.viewport)
    }

    /// Fly to an already framed pose.
    pub fn focus(&mut self, id: PaintingId, pose: CameraPose) {
        self.rig.desired = pose;
        self.rig.speeds = self.cfg.focus_speeds;
        self.rig.resize_hold = None;
        self.mode = CameraMode::Focused(id);
        log::debug!("Camera → focus {}", id);
    }

    /// Fly back to the overview.
    pub fn reset(&mut self) {
        self.rig.desired = self.default_pose();
        self.rig.speeds = self.cfg.reset_speeds;
        self.rig.resize_hold = None;
        self.mode = CameraMode::Default;
        log::debug!("Camera → overview");
    }

    /// Track a new viewport. A focused pose is left alone; the overview
    /// snaps to its new distance using the resize speeds for a short hold.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.mode != CameraMode::Default {
            return;
        }
        self.rig.desired = self.default_pose();
        self.rig.speeds = self.cfg.resize_speeds;
        self.rig.resize_hold = Some(ResizeHold {
            remaining: self.cfg.resize_hold_secs,
            then: self.cfg.reset_speeds,
        });
    }

    /// Per-frame update.
    pub fn tick(&mut self, dt: f32) {
        self.rig = self.rig.step(dt);
    }
}
