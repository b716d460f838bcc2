//! Plain values the host fills in once per frame. Nothing in here holds on to engine objects;
//! the host copies what it knows and the sampler decides whether that is enough to draw.

use kfi_utils::CameraProjection;
use nalgebra::{UnitQuaternion, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Flight,
    Map,
    External,
    Internal,
    Iva,
}

impl CameraMode {
    pub fn is_admissible(self) -> bool {
        //! the indicators only make sense when looking at (or out of) the vessel.
        matches!(self, Self::Flight | Self::Internal | Self::Iva)
    }
}

/// Which velocity the navball is currently showing; the prograde markers follow the same choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedDisplayMode {
    Orbit,
    #[default]
    Surface,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VesselStatus {
    #[default]
    Active,
    Inactive,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselState {
    pub status: VesselStatus,
    pub rotation: UnitQuaternion<f32>,
    pub up_axis: Vector3<f32>, // away from the body being orbited
    pub north: Vector3<f32>,
    pub east: Vector3<f32>,
    pub surface_velocity: Vector3<f32>,
    pub orbital_velocity: Vector3<f32>,
    pub target_velocity: Vector3<f32>, // as reported by the game, see velocity::select
}

impl Default for VesselState {
    fn default() -> Self {
        Self {
            status: VesselStatus::Active,
            rotation: UnitQuaternion::identity(),
            up_axis: Vector3::y(),
            north: Vector3::z(),
            east: Vector3::x(),
            surface_velocity: Vector3::zeros(),
            orbital_velocity: Vector3::zeros(),
            target_velocity: Vector3::zeros(),
        }
    }
}

/// The currently targeted vessel, if the target is a vessel at all.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetState {
    pub landed_or_splashed: bool,
    pub loaded: bool,
    pub surface_velocity: Vector3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub rotation: UnitQuaternion<f32>,
    pub projection: CameraProjection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimState {
    pub ready: bool,
    pub vessel: Option<VesselState>,
    pub target: Option<TargetState>,
    pub camera: Option<CameraState>,
    pub camera_mode: CameraMode,
    pub speed_display_mode: SpeedDisplayMode,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            ready: false,
            vessel: None,
            target: None,
            camera: None,
            camera_mode: CameraMode::Flight,
            speed_display_mode: SpeedDisplayMode::default(),
        }
    }
}
