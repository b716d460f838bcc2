//! Gates the indicators on the game state and low-pass filters the raw samples.
//!
//! The filter is the plain average of this frame's raw sample and the previous frame's raw
//! sample. History always stores raw values, never filtered ones, so a step input is fully
//! passed through after two frames instead of decaying geometrically.

use log::debug;
use nalgebra::{UnitQuaternion, Vector3};
use thiserror::Error;

use crate::{
    host::{CameraState, SimState, VesselState, VesselStatus},
    snapshot::FrameSnapshot,
    velocity, CameraMode,
};

// samples closer than this are not interpolated; the current one is used as-is.
const SLERP_EPSILON: f32 = 1.0e-6;

/// Why a frame produced no snapshot. None of these are faults: the frame is simply skipped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    #[error("flight scene not ready")]
    NotReady,
    #[error("no active vessel")]
    NoVessel,
    #[error("active vessel is dead")]
    VesselDead,
    #[error("no main camera")]
    NoCamera,
    #[error("camera mode {0:?} does not show indicators")]
    CameraMode(CameraMode),
}

/// The previous frame's raw samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingState {
    pub last_velocity: Vector3<f32>,
    pub last_rotation: UnitQuaternion<f32>,
}

impl Default for SmoothingState {
    fn default() -> Self {
        Self {
            last_velocity: Vector3::zeros(),
            last_rotation: UnitQuaternion::identity(),
        }
    }
}

impl SmoothingState {
    pub fn filter(
        &mut self,
        velocity: Vector3<f32>,
        rotation: UnitQuaternion<f32>,
    ) -> (Vector3<f32>, UnitQuaternion<f32>) {
        //! blends the new raw samples with the stored ones, then stores the raw samples.
        let filtered_velocity = (velocity + self.last_velocity) * 0.5;
        let filtered_rotation = rotation
            .try_slerp(&self.last_rotation, 0.5, SLERP_EPSILON)
            .unwrap_or(rotation);

        self.last_velocity = velocity;
        self.last_rotation = rotation;

        (filtered_velocity, filtered_rotation)
    }
}

#[derive(Debug, Default)]
pub struct StateSampler {
    history: SmoothingState,
    last_skip: Option<SkipReason>,
}

impl StateSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &SmoothingState {
        &self.history
    }

    pub fn sample(&mut self, sim: &SimState) -> Result<FrameSnapshot, SkipReason> {
        //! produces this frame's snapshot, or the reason nothing should be drawn.
        //! History is only advanced on success.
        let result = admit(sim).map(|(vessel, camera)| {
            let raw_velocity = velocity::select(vessel, sim.target.as_ref(), sim.speed_display_mode);
            let (velocity, vessel_rotation) = self.history.filter(raw_velocity, vessel.rotation);

            FrameSnapshot {
                vessel_rotation,
                up: vessel.up_axis,
                velocity,
                north: vessel.north,
                east: vessel.east,
                camera: *camera,
            }
        });

        self.log_transition(&result);
        result
    }

    fn log_transition(&mut self, result: &Result<FrameSnapshot, SkipReason>) {
        // only state changes are logged; this runs every frame.
        let skip = result.as_ref().err().copied();
        if skip != self.last_skip {
            match skip {
                Some(reason) => debug!("indicators hidden: {reason}"),
                None => debug!("indicators resumed"),
            }
        }
        self.last_skip = skip;
    }
}

fn admit(sim: &SimState) -> Result<(&VesselState, &CameraState), SkipReason> {
    if !sim.ready {
        return Err(SkipReason::NotReady);
    }

    let vessel = sim.vessel.as_ref().ok_or(SkipReason::NoVessel)?;
    if vessel.status == VesselStatus::Dead {
        return Err(SkipReason::VesselDead);
    }

    let camera = sim.camera.as_ref().ok_or(SkipReason::NoCamera)?;
    if !sim.camera_mode.is_admissible() {
        return Err(SkipReason::CameraMode(sim.camera_mode));
    }

    Ok((vessel, camera))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_relative_eq;
    use kfi_utils::CameraProjection;

    use super::*;
    use crate::host::SpeedDisplayMode;

    fn flying(velocity: Vector3<f32>) -> SimState {
        SimState {
            ready: true,
            vessel: Some(VesselState {
                surface_velocity: velocity,
                ..VesselState::default()
            }),
            target: None,
            camera: Some(CameraState {
                rotation: UnitQuaternion::identity(),
                projection: CameraProjection::perspective(FRAC_PI_2, 1.0, 0.5, 1000.0),
            }),
            camera_mode: CameraMode::Flight,
            speed_display_mode: SpeedDisplayMode::Surface,
        }
    }

    #[test]
    fn velocity_is_averaged_with_the_previous_raw_sample() {
        let mut sampler = StateSampler::new();
        let first = sampler.sample(&flying(Vector3::zeros())).unwrap();
        assert_eq!(first.velocity, Vector3::zeros());

        let second = sampler.sample(&flying(Vector3::new(10.0, 0.0, 0.0))).unwrap();
        assert_relative_eq!(second.velocity, Vector3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn history_holds_raw_not_filtered_samples() {
        let mut sampler = StateSampler::new();
        let step = Vector3::new(10.0, 0.0, 0.0);
        sampler.sample(&flying(step)).unwrap();
        assert_eq!(sampler.history().last_velocity, step);

        // a recursive average would still be at 7.5 here.
        let settled = sampler.sample(&flying(step)).unwrap();
        assert_relative_eq!(settled.velocity, step);
    }

    #[test]
    fn rotation_is_halfway_between_samples() {
        let mut state = SmoothingState::default();
        let quarter_turn = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let (_, filtered) = state.filter(Vector3::zeros(), quarter_turn);
        assert_relative_eq!(filtered.angle(), FRAC_PI_2 * 0.5, epsilon = 1.0e-5);
        assert_eq!(state.last_rotation, quarter_turn);
    }

    #[test]
    fn opposite_attitudes_meet_at_a_quarter_turn() {
        let mut state = SmoothingState::default();
        let half_turn = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::PI);
        let (_, filtered) = state.filter(Vector3::zeros(), half_turn);
        assert_relative_eq!(filtered.angle(), FRAC_PI_2, epsilon = 1.0e-5);
    }

    #[test]
    fn nearly_identical_rotations_pass_through() {
        let mut state = SmoothingState::default();
        let tiny = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.0e-7);
        let (_, filtered) = state.filter(Vector3::zeros(), tiny);
        assert_relative_eq!(filtered, tiny, epsilon = 1.0e-6);
    }

    #[test]
    fn gating_reasons() {
        let mut sampler = StateSampler::new();

        let not_ready = SimState { ready: false, ..flying(Vector3::zeros()) };
        assert_eq!(sampler.sample(&not_ready), Err(SkipReason::NotReady));

        let no_vessel = SimState { vessel: None, ..flying(Vector3::zeros()) };
        assert_eq!(sampler.sample(&no_vessel), Err(SkipReason::NoVessel));

        let mut dead = flying(Vector3::zeros());
        if let Some(v) = dead.vessel.as_mut() {
            v.status = VesselStatus::Dead;
        }
        assert_eq!(sampler.sample(&dead), Err(SkipReason::VesselDead));

        let no_camera = SimState { camera: None, ..flying(Vector3::zeros()) };
        assert_eq!(sampler.sample(&no_camera), Err(SkipReason::NoCamera));

        let map = SimState { camera_mode: CameraMode::Map, ..flying(Vector3::zeros()) };
        assert_eq!(sampler.sample(&map), Err(SkipReason::CameraMode(CameraMode::Map)));
    }

    #[test]
    fn skipped_frames_leave_history_alone() {
        let mut sampler = StateSampler::new();
        let moving = Vector3::new(4.0, 0.0, 0.0);
        let map = SimState { camera_mode: CameraMode::Map, ..flying(moving) };
        assert!(sampler.sample(&map).is_err());
        assert_eq!(*sampler.history(), SmoothingState::default());

        let resumed = sampler.sample(&flying(moving)).unwrap();
        assert_relative_eq!(resumed.velocity, Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn velocity_source_follows_display_mode() {
        let mut sampler = StateSampler::new();
        let mut sim = flying(Vector3::new(1.0, 0.0, 0.0));
        sim.speed_display_mode = SpeedDisplayMode::Orbit;
        if let Some(v) = sim.vessel.as_mut() {
            v.orbital_velocity = Vector3::new(0.0, 0.0, 200.0);
        }
        let snap = sampler.sample(&sim).unwrap();
        assert_relative_eq!(snap.velocity, Vector3::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn motion_threshold_is_strict() {
        let mut sampler = StateSampler::new();
        // 0.2 averaged with zero history gives exactly the threshold.
        let snap = sampler.sample(&flying(Vector3::new(0.2, 0.0, 0.0))).unwrap();
        assert!(!snap.is_moving());
        let snap = sampler.sample(&flying(Vector3::new(0.2, 0.0, 0.0))).unwrap();
        assert!(snap.is_moving());
    }
}
