//! Turns a smoothed flight snapshot into marker placements on the screen.
//!
//! Everything is recomputed from the snapshot each frame; nothing is carried over.
//! The camera frame is the camera transform's own frame (camera looks down +z), so a
//! direction with z >= 0 is in front of the camera.

use kfi_flight::FrameSnapshot;
use kfi_utils::{is_on_screen, CameraProjection};
use nalgebra::{Vector2, Vector3};

use crate::markers::{MarkerFrame, MarkerSlot};

// velocities shorter than this normalize to zero instead of blowing up.
const MIN_NORMALIZE: f32 = 1.0e-5;

fn vessel_forward() -> Vector3<f32> {
    //! vessel-local nose direction.
    Vector3::z()
}

fn vessel_ventral() -> Vector3<f32> {
    //! vessel-local axis out of the belly; negated it is the canopy ("nose up") direction.
    -Vector3::y()
}

/// Camera-frame quantities derived from one snapshot. Exposed mainly so the blend logic can be
/// inspected without going through the screen projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    /// Local up.
    pub vertical: Vector3<f32>,
    /// Where the nose points.
    pub heading: Vector3<f32>,
    /// Canopy direction, perpendicular to the heading.
    pub nose_up: Vector3<f32>,
    /// Unit direction of travel, zero when not moving.
    pub velocity_direction: Vector3<f32>,
    /// Local north.
    pub north: Vector3<f32>,
    /// Heading with its vertical component removed, i.e. tangent to the horizon.
    pub horizon_heading: Vector3<f32>,
    /// Perpendicular to the heading, in the plane of heading and vertical.
    pub horizon_up: Vector3<f32>,
    /// vertical . heading
    pub heading_dot_up: f32,
    /// vertical . velocity_direction, zero when not moving.
    pub speed_dot_up: f32,
    /// Speed above the draw threshold.
    pub moving: bool,
    /// Fade input of the vertical marker.
    pub blend_vertical: f32,
    /// Fade input of the horizon marker; never larger than `blend_vertical`.
    pub blend_horizon: f32,
    /// Fade input of the level guide.
    pub blend_level_guide: f32,
}

impl FrameGeometry {
    /// Rotates the snapshot into the camera frame and derives the blend values.
    pub fn from_snapshot(snapshot: &FrameSnapshot) -> Self {
        let cam_inv = snapshot.camera.rotation.inverse();
        let vessel_to_cam = cam_inv * snapshot.vessel_rotation;
        let moving = snapshot.is_moving();

        let vertical = cam_inv * snapshot.up;
        let heading = vessel_to_cam * vessel_forward();
        let nose_up = -(vessel_to_cam * vessel_ventral());
        let velocity_direction = cam_inv
            * snapshot
                .velocity
                .try_normalize(MIN_NORMALIZE)
                .unwrap_or_else(Vector3::zeros);
        let north = cam_inv * snapshot.north;

        let horizon_heading = heading - project_onto(&heading, &vertical);
        let horizon_up = heading.cross(&vertical.cross(&heading));

        let heading_dot_up = vertical.dot(&heading);
        let speed_dot_up = if moving {
            vertical.dot(&velocity_direction)
        } else {
            0.0
        };

        // Steep attitude and steep flight path both favour the vertical marker; the horizon
        // marker only shows while both nose and velocity are close to level.
        let blend_vertical = heading_dot_up.abs().max(speed_dot_up.abs());
        let blend_horizon = heading_dot_up.abs().min(speed_dot_up.abs());
        let blend_level_guide = heading_dot_up.abs();

        Self {
            vertical,
            heading,
            nose_up,
            velocity_direction,
            north,
            horizon_heading,
            horizon_up,
            heading_dot_up,
            speed_dot_up,
            moving,
            blend_vertical,
            blend_horizon,
            blend_level_guide,
        }
    }
}

fn project_onto(v: &Vector3<f32>, onto: &Vector3<f32>) -> Vector3<f32> {
    let len_sq = onto.norm_squared();
    if len_sq < f32::EPSILON {
        return Vector3::zeros();
    }
    onto * (v.dot(onto) / len_sq)
}

fn screen_position(projection: &CameraProjection, direction: &Vector3<f32>) -> Option<Vector2<f32>> {
    let position = projection.project(direction);
    is_on_screen(&position).then_some(position)
}

/// Computes this frame's markers. Markers whose direction does not land on screen stay hidden.
pub fn project(snapshot: &FrameSnapshot) -> MarkerFrame {
    let geometry = FrameGeometry::from_snapshot(snapshot);
    place(&geometry, &snapshot.camera.projection)
}

/// Screen placement for already computed geometry.
pub fn place(g: &FrameGeometry, projection: &CameraProjection) -> MarkerFrame {
    let mut frame = MarkerFrame::hidden();

    if let Some(pos) = screen_position(projection, &g.horizon_heading) {
        frame.show(MarkerSlot::Horizon, pos, g.vertical.xy(), g.blend_horizon);
    }

    if let Some(pos) = screen_position(projection, &g.vertical) {
        frame.show(MarkerSlot::Vertical, pos, g.north.xy(), g.blend_vertical);
    }

    if g.moving {
        if let Some(pos) = screen_position(projection, &g.velocity_direction) {
            let slot = if g.velocity_direction.z >= 0.0 {
                MarkerSlot::Prograde
            } else {
                MarkerSlot::Retrograde
            };
            frame.show(slot, pos, Vector2::y(), 1.0);
        }
    }

    if let Some(pos) = screen_position(projection, &g.heading) {
        let slot = if g.heading.z >= 0.0 {
            MarkerSlot::Heading
        } else {
            MarkerSlot::Reverse
        };
        frame.show(slot, pos, g.nose_up.xy(), 1.0);
        frame.show(MarkerSlot::LevelGuide, pos, g.horizon_up.xy(), g.blend_level_guide);
    }

    frame
}
