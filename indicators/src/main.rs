//! Replays a scripted ascent through the overlay and logs what would be drawn.
//!
//! Usage: `kfi-replay [data-dir]`. Settings and toolbar state are read from (and the state written
//! back to) the data directory, default the current directory. Set `RUST_LOG=debug` to also see
//! sampling transitions.

use std::{
    f32::consts::{FRAC_PI_2, FRAC_PI_3},
    path::PathBuf,
};

use kfi_flight::{CameraMode, CameraState, SimState, VesselState};
use kfi_indicators::{
    IndicatorOverlay, OverlayViewport, Settings, SettingsError, ToolbarState, SETTINGS_FILE,
    STATE_FILE,
};
use kfi_utils::CameraProjection;
use log::info;
use nalgebra::{UnitQuaternion, Vector3};
use rand::Rng;

const FRAMES: u32 = 1500;
const DT: f32 = 0.02; // s
const LOG_EVERY: u32 = 100;
const MAP_VIEW: std::ops::Range<u32> = 600..700;
const VELOCITY_NOISE: f32 = 0.5; // m/s, per axis

/// Nose pitch above the horizon for a gravity turn that starts vertical and ends near level.
fn pitch_program(t: f32) -> f32 {
    let start = 5.0;
    let end = 25.0;
    let progress = ((t - start) / (end - start)).clamp(0.0, 1.0);
    FRAC_PI_2 * (1.0 - 0.9 * progress)
}

fn ascent_state(t: f32, rng: &mut impl Rng) -> VesselState {
    let pitch = pitch_program(t);
    // flight path lags the nose slightly during the turn.
    let path = pitch_program(t - 1.5);
    let speed = 30.0 * t;
    let noise = Vector3::new(
        rng.gen_range(-VELOCITY_NOISE..VELOCITY_NOISE),
        rng.gen_range(-VELOCITY_NOISE..VELOCITY_NOISE),
        rng.gen_range(-VELOCITY_NOISE..VELOCITY_NOISE),
    );
    VesselState {
        // positive pitch raises the +z nose towards +y.
        rotation: UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -pitch),
        surface_velocity: Vector3::new(0.0, path.sin(), path.cos()) * speed + noise,
        ..VesselState::default()
    }
}

fn main() -> Result<(), SettingsError> {
    env_logger::init();

    let data_dir = std::env::args().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);
    let settings = Settings::load(&data_dir.join(SETTINGS_FILE))?;
    let toolbar = ToolbarState::load(&data_dir.join(STATE_FILE))?;

    let mut overlay =
        IndicatorOverlay::start(settings, toolbar, OverlayViewport::from_screen(1920.0, 1080.0), (512, 128));
    let mut frames = overlay.subscribe();
    let mut rng = rand::thread_rng();

    // chase camera behind the vessel, looking slightly upwards.
    let camera = CameraState {
        rotation: UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -0.3),
        projection: CameraProjection::perspective(FRAC_PI_3, 16.0 / 9.0, 0.5, 10_000.0),
    };

    let mut t = 0.0;
    for frame in 0..FRAMES {
        let sim = SimState {
            ready: true,
            vessel: Some(ascent_state(t, &mut rng)),
            camera: Some(camera),
            camera_mode: if MAP_VIEW.contains(&frame) {
                CameraMode::Map
            } else {
                CameraMode::Flight
            },
            ..SimState::default()
        };
        overlay.on_pre_cull(&sim);

        if frame % LOG_EVERY == 0 && frames.has_changed().unwrap_or(false) {
            let shown = frames.borrow_and_update().visible().count();
            info!("t={t:5.1}s pitch={:4.1}deg {shown} markers", pitch_program(t).to_degrees());
            for placement in overlay.placements().iter().filter(|p| p.visible) {
                info!(
                    "  {:<10} at ({:7.1}, {:7.1}) alpha {:.2}",
                    placement.slot.name(),
                    placement.local_position.x,
                    placement.local_position.y,
                    placement.color.a
                );
            }
        }
        t += DT;
    }

    info!("replay done, overlay visible = {}", overlay.toolbar().is_visible());
    overlay.shutdown(&data_dir.join(STATE_FILE))
}
