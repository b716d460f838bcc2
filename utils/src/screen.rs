//! Screen-space helpers shared by everything that places markers on the overlay.
//! Positions here are normalized device coordinates: the visible area is [-1, 1] on both axes.

use nalgebra::{UnitQuaternion, Vector2, Vector3};

/// Markers are still placed slightly past the screen edge so they slide out instead of popping.
pub const SCREEN_LIMIT: f32 = 1.5;

// cosine above which the rotation is treated as the identity.
const IDENTITY_COS: f32 = 1.0 - 1.0e-7;

pub fn is_on_screen(position: &Vector2<f32>) -> bool {
    //! true when both coordinates are finite and within +/- SCREEN_LIMIT.
    //! NaN fails every comparison and infinities are out of range, so the range check covers both.
    position
        .iter()
        .all(|c| (-SCREEN_LIMIT..=SCREEN_LIMIT).contains(c))
}

pub fn rotation_from_up(up: Vector2<f32>) -> UnitQuaternion<f32> {
    //! produces the rotation about the screen normal which carries (0, 1) onto the direction of `up`.
    //! The angle is taken with atan2, which stays unit length where 1 - cos loses all precision.
    //! `up` does not need to be normalized. Zero, non-finite or straight-up inputs give the identity.
    let norm = up.norm();
    let cs = up.y / norm;
    let sn = -up.x / norm;

    if cs < IDENTITY_COS {
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), sn.atan2(cs))
    } else {
        // also reached when cs is NaN (zero-length or non-finite input).
        UnitQuaternion::identity()
    }
}
