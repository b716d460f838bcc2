use nalgebra::{UnitQuaternion, Vector3};

use crate::host::CameraState;

/// Below this speed (m/s) the velocity direction is noise and the prograde markers are not drawn.
pub const SPEED_DRAW_THRESHOLD: f32 = 0.1;

/// Smoothed view of one frame, produced by the sampler and consumed by the projector.
/// All vectors are in the world frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub vessel_rotation: UnitQuaternion<f32>,
    pub up: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub north: Vector3<f32>,
    pub east: Vector3<f32>,
    pub camera: CameraState,
}

impl FrameSnapshot {
    pub fn is_moving(&self) -> bool {
        //! squared compare, no sqrt needed.
        self.velocity.norm_squared() > SPEED_DRAW_THRESHOLD * SPEED_DRAW_THRESHOLD
    }
}
