//! Camera choreography: framing math, the overview pose and the smoothed rig.
//!
//! The rig never animates over a fixed duration. Every tick moves the
//! current pose a fixed fraction of the remaining way toward the desired
//! pose (exponential easing). Transitions only rewrite the desired pose and
//! the active speed pair.

pub mod choreographer;
pub mod framing;

use glam::{Mat3, Quat, Vec3};
use serde::Deserialize;

pub use self::choreographer::{CameraMode, Choreographer};
pub use self::framing::{default_pose, framing_distance, optimal_camera_pose, FramedPose, Viewport};

/// Fraction of the remaining distance/angle covered per tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpeedPair {
    pub position: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraPose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `eye` looking at `target`, Y up. The camera looks down its local `-z`.
    pub fn look_at(eye: Vec3, target: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
        Self {
            position: eye,
            rotation,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite()
    }
}

/// Active resize speeds and what to fall back to when they expire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeHold {
    pub remaining: f32,
    pub then: SpeedPair,
}

/// Current and desired camera pose plus the speeds chasing one with the other.
///
/// `current` is only ever produced by [`CameraRig::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    current: CameraPose,
    pub desired: CameraPose,
    pub speeds: SpeedPair,
    pub resize_hold: Option<ResizeHold>,
}

impl CameraRig {
    /// A rig resting at `pose`.
    pub fn at_rest(pose: CameraPose, speeds: SpeedPair) -> Self {
        Self {
            current: pose,
            desired: pose,
            speeds,
            resize_hold: None,
        }
    }

    pub fn current(&self) -> CameraPose {
        self.current
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.desired
    }

    /// Advance one frame. `dt` (seconds) only drives the resize hold;
    /// the easing fraction is per tick.
    pub fn step(&self, dt: f32) -> CameraRig {
        let mut next = *self;

        if self.current.position != self.desired.position {
            next.current.position = self
                .current
                .position
                .lerp(self.desired.position, self.speeds.position);
        }
        if self.current.rotation != self.desired.rotation {
            next.current.rotation = self
                .current
                .rotation
                .slerp(self.desired.rotation, self.speeds.rotation)
                .normalize();
        }

        if let Some(hold) = self.resize_hold {
            let remaining = hold.remaining - dt;
            if remaining <= 0.0 {
                next.speeds = hold.then;
                next.resize_hold = None;
            } else {
                next.resize_hold = Some(ResizeHold { remaining, ..hold });
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEEDS: SpeedPair = SpeedPair {
        position: 0.1,
        rotation: 0.2,
    };

    #[test]
    fn step_is_identity_at_the_fixed_point() {
        let pose = CameraPose::look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.5, -2.0));
        let rig = CameraRig::at_rest(pose, SPEEDS);
        let next = rig.step(0.016);
        assert_eq!(next, rig);
        assert_eq!(next.current(), pose);
    }

    #[test]
    fn step_eases_exponentially() {
        let start = CameraPose::new(Vec3::ZERO, Quat::IDENTITY);
        let mut rig = CameraRig::at_rest(start, SPEEDS);
        rig.desired = CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Quat::from_rotation_y(1.0));

        let one = rig.step(0.016);
        assert!((one.current().position.x - 1.0).abs() < 1e-5);
        let two = one.step(0.016);
        assert!((two.current().position.x - 1.9).abs() < 1e-5);

        let (_, angle) = one.current().rotation.to_axis_angle();
        assert!((angle - 0.2).abs() < 1e-4);

        let mut settled = rig;
        for _ in 0..400 {
            settled = settled.step(0.016);
        }
        assert!((settled.current().position - rig.desired.position).length() < 1e-3);
        assert!(settled.current().rotation.angle_between(rig.desired.rotation) < 1e-3);
        assert_eq!(settled.desired, rig.desired);
    }

    #[test]
    fn resize_hold_expires_into_fallback_speeds() {
        let pose = CameraPose::new(Vec3::ZERO, Quat::IDENTITY);
        let mut rig = CameraRig::at_rest(pose, SpeedPair { position: 0.9, rotation: 0.9 });
        rig.resize_hold = Some(ResizeHold {
            remaining: 0.3,
            then: SPEEDS,
        });
        let rig = rig.step(0.2);
        assert_eq!(rig.speeds.position, 0.9);
        let rig = rig.step(0.2);
        assert_eq!(rig.speeds, SPEEDS);
        assert!(rig.resize_hold.is_none());
    }

    #[test]
    fn look_at_faces_target() {
        let pose = CameraPose::look_at(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 1.0, 0.0));
        assert!((pose.forward() - Vec3::NEG_Z).length() < 1e-5);
        assert!((pose.up() - Vec3::Y).length() < 1e-5);

        let side = CameraPose::look_at(Vec3::new(3.0, 2.0, 0.0), Vec3::new(-1.0, 2.0, 0.0));
        assert!((side.forward() - Vec3::NEG_X).length() < 1e-5);
        assert!((side.right() - Vec3::NEG_Z).length() < 1e-5);
    }
}
