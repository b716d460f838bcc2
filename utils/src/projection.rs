//! Perspective projection of camera-frame directions onto the screen.
//!
//! The camera looks down +z of its own transform while the projection matrix follows the
//! OpenGL convention (looking down -z). Points in front of the camera therefore come out
//! mirrored on both axes; the overlay compensates for that when it scales into its viewport.

use nalgebra::{Matrix4, Vector2, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraProjection {
    matrix: Matrix4<f32>,
}

impl CameraProjection {
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        //! builds the projection from a vertical field of view in radians.
        //! Degenerate parameters are not rejected: they produce non-finite screen positions,
        //! which the on-screen check then throws away.
        let f = 1.0 / (fov_y * 0.5).tan();
        let depth = near - far;

        #[rustfmt::skip]
        let matrix = Matrix4::new(
            f / aspect, 0.0, 0.0,                 0.0,
            0.0,        f,   0.0,                 0.0,
            0.0,        0.0, (far + near) / depth, 2.0 * far * near / depth,
            0.0,        0.0, -1.0,                0.0,
        );
        Self { matrix }
    }

    pub fn from_matrix(matrix: Matrix4<f32>) -> Self {
        //! wraps a projection matrix handed over by the host camera as-is.
        Self { matrix }
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    pub fn project(&self, direction: &Vector3<f32>) -> Vector2<f32> {
        //! maps a camera-frame point to normalized device coordinates, homogeneous divide included.
        //! A point in the camera plane (w == 0) yields infinities or NaN rather than a panic.
        let clip = self.matrix * direction.push(1.0);
        Vector2::new(clip.x / clip.w, clip.y / clip.w)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;
    use crate::is_on_screen;

    fn square_camera() -> CameraProjection {
        // 90 degree field of view: f == 1, so x/z maps straight through.
        CameraProjection::perspective(FRAC_PI_2, 1.0, 0.5, 1000.0)
    }

    #[test]
    fn forward_lands_in_the_centre() {
        let p = square_camera().project(&Vector3::z());
        assert_relative_eq!(p, Vector2::zeros(), epsilon = 1.0e-6);
    }

    #[test]
    fn points_in_front_are_mirrored() {
        let p = square_camera().project(&Vector3::new(0.5, 0.25, 1.0));
        assert_relative_eq!(p, Vector2::new(-0.5, -0.25), epsilon = 1.0e-6);
    }

    #[test]
    fn aspect_squeezes_the_horizontal_axis() {
        let wide = CameraProjection::perspective(FRAC_PI_2, 2.0, 0.5, 1000.0);
        let p = wide.project(&Vector3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(p, Vector2::new(-0.5, -1.0), epsilon = 1.0e-6);
    }

    #[test]
    fn directions_in_the_camera_plane_are_not_on_screen() {
        let p = square_camera().project(&Vector3::y());
        assert!(!is_on_screen(&p));
    }

    #[test]
    fn host_matrix_is_used_verbatim() {
        let m = *square_camera().matrix();
        assert_eq!(CameraProjection::from_matrix(m), square_camera());
    }
}
