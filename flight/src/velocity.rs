//! Picks the velocity the prograde/retrograde markers follow.

use nalgebra::Vector3;

use crate::host::{SpeedDisplayMode, TargetState, VesselState};

pub fn select(
    vessel: &VesselState,
    target: Option<&TargetState>,
    mode: SpeedDisplayMode,
) -> Vector3<f32> {
    //! returns the raw (unfiltered) velocity for the current display mode.
    match mode {
        SpeedDisplayMode::Orbit => vessel.orbital_velocity,
        SpeedDisplayMode::Surface => vessel.surface_velocity,
        SpeedDisplayMode::Target => target_relative(vessel, target),
    }
}

fn target_relative(vessel: &VesselState, target: Option<&TargetState>) -> Vector3<f32> {
    // The game reports orbital velocity as "target relative" when the target is a landed vessel
    // that isn't loaded. Relative to something sitting on the ground, surface velocity is the answer.
    match target {
        Some(t) if t.landed_or_splashed && t.loaded => vessel.surface_velocity - t.surface_velocity,
        Some(t) if t.landed_or_splashed => vessel.surface_velocity,
        _ => vessel.target_velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vessel() -> VesselState {
        VesselState {
            surface_velocity: Vector3::new(1.0, 0.0, 0.0),
            orbital_velocity: Vector3::new(0.0, 2.0, 0.0),
            target_velocity: Vector3::new(0.0, 0.0, 3.0),
            ..VesselState::default()
        }
    }

    #[test]
    fn orbit_and_surface_modes() {
        let v = vessel();
        assert_eq!(select(&v, None, SpeedDisplayMode::Orbit), v.orbital_velocity);
        assert_eq!(select(&v, None, SpeedDisplayMode::Surface), v.surface_velocity);
    }

    #[test]
    fn target_mode_uses_the_reported_value_for_flying_targets() {
        let v = vessel();
        let flying = TargetState {
            landed_or_splashed: false,
            loaded: true,
            surface_velocity: Vector3::new(9.0, 9.0, 9.0),
        };
        assert_eq!(select(&v, Some(&flying), SpeedDisplayMode::Target), v.target_velocity);
        assert_eq!(select(&v, None, SpeedDisplayMode::Target), v.target_velocity);
    }

    #[test]
    fn landed_target_falls_back_to_surface_velocity() {
        let v = vessel();
        let unloaded = TargetState {
            landed_or_splashed: true,
            loaded: false,
            surface_velocity: Vector3::new(0.5, 0.0, 0.0),
        };
        assert_eq!(select(&v, Some(&unloaded), SpeedDisplayMode::Target), v.surface_velocity);

        let loaded = TargetState { loaded: true, ..unloaded };
        assert_eq!(
            select(&v, Some(&loaded), SpeedDisplayMode::Target),
            Vector3::new(0.5, 0.0, 0.0)
        );
    }
}
