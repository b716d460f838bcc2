//! Per-slot appearance constants: tint, draw depth and fade thresholds.

use kfi_utils::Rgba;

use super::MarkerSlot;

/// Horizon marker fades out as the vessel leaves level flight (roughly 15 to 20 degrees).
pub const HORIZON_BLEND: BlendThresholds = BlendThresholds::new(0.259, 0.342);
/// Vertical marker fades in when steeper than roughly 70 degrees. Note opaque > transparent.
pub const VERTICAL_BLEND: BlendThresholds = BlendThresholds::new(0.966, 0.94);
/// Level guide disappears within a few degrees of vertical where roll is meaningless.
pub const LEVEL_GUIDE_BLEND: BlendThresholds = BlendThresholds::new(0.984, 0.996);

/// The two blend values between which a marker fades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendThresholds {
    /// Blend value at (and beyond, away from `transparent`) which the marker is fully opaque.
    pub opaque: f32,
    /// Blend value at which the marker is fully transparent.
    pub transparent: f32,
}

impl BlendThresholds {
    /// Creates thresholds; `opaque` may be larger than `transparent` to fade the other way.
    pub const fn new(opaque: f32, transparent: f32) -> Self {
        Self {
            opaque,
            transparent,
        }
    }

    /// alpha = 1 - clamp01((blend - opaque) / (transparent - opaque)).
    pub fn alpha(&self, blend: f32) -> f32 {
        let t = (blend - self.opaque) / (self.transparent - self.opaque);
        if t.is_nan() {
            return 0.0;
        }
        1.0 - t.clamp(0.0, 1.0)
    }
}

/// The three shared marker colours.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Palette {
    /// Heading, reverse and level guide.
    pub attitude: Rgba,
    /// Prograde and retrograde.
    pub prograde: Rgba,
    /// Vertical and horizon.
    pub horizon: Rgba,
}

impl MarkerSlot {
    /// Base colour before fading.
    pub fn tint(self, palette: &Palette) -> Rgba {
        match self {
            Self::Heading | Self::Reverse | Self::LevelGuide => palette.attitude,
            Self::Prograde | Self::Retrograde => palette.prograde,
            Self::Vertical | Self::Horizon => palette.horizon,
        }
    }

    /// Distance from the overlay camera. Only used for draw order: attitude on top, horizon below.
    pub fn depth(self) -> f32 {
        match self {
            Self::Heading | Self::Reverse | Self::LevelGuide => 1.0,
            Self::Prograde | Self::Retrograde => 1.1,
            Self::Vertical | Self::Horizon => 1.2,
        }
    }

    /// Fade thresholds; `None` means always opaque.
    pub fn blend_thresholds(self) -> Option<BlendThresholds> {
        match self {
            Self::Horizon => Some(HORIZON_BLEND),
            Self::Vertical => Some(VERTICAL_BLEND),
            Self::LevelGuide => Some(LEVEL_GUIDE_BLEND),
            _ => None,
        }
    }

    /// Blend value before the first frame is projected: transparent for fading slots.
    pub fn resting_blend(self) -> f32 {
        self.blend_thresholds().map_or(1.0, |t| t.transparent)
    }

    /// Opacity multiplier for a blend value.
    pub fn alpha(self, blend: f32) -> f32 {
        self.blend_thresholds().map_or(1.0, |t| t.alpha(blend))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn horizon_fades_out_with_increasing_blend() {
        assert_eq!(HORIZON_BLEND.alpha(0.0), 1.0);
        assert_eq!(HORIZON_BLEND.alpha(0.259), 1.0);
        assert_relative_eq!(HORIZON_BLEND.alpha(0.3005), 0.5, epsilon = 1.0e-4);
        assert_eq!(HORIZON_BLEND.alpha(0.342), 0.0);
        assert_eq!(HORIZON_BLEND.alpha(1.0), 0.0);
    }

    #[test]
    fn vertical_fades_in_with_increasing_blend() {
        assert_eq!(VERTICAL_BLEND.alpha(0.5), 0.0);
        assert_eq!(VERTICAL_BLEND.alpha(0.94), 0.0);
        assert_relative_eq!(VERTICAL_BLEND.alpha(0.953), 0.5, epsilon = 1.0e-4);
        assert_eq!(VERTICAL_BLEND.alpha(1.0), 1.0);
    }

    #[test]
    fn resting_blend_is_transparent() {
        for slot in MarkerSlot::ALL {
            let expected = if slot.blend_thresholds().is_some() { 0.0 } else { 1.0 };
            assert_eq!(slot.alpha(slot.resting_blend()), expected, "{}", slot.name());
        }
    }

    #[test]
    fn undefined_blend_is_transparent() {
        assert_eq!(HORIZON_BLEND.alpha(f32::NAN), 0.0);
        assert_eq!(BlendThresholds::new(0.5, 0.5).alpha(0.5), 0.0);
    }

    #[test]
    fn tint_and_depth_groups() {
        let palette = Palette {
            attitude: Rgba::new(1.0, 0.0, 0.0, 1.0),
            prograde: Rgba::new(0.0, 1.0, 0.0, 1.0),
            horizon: Rgba::new(0.0, 0.0, 1.0, 1.0),
        };
        assert_eq!(MarkerSlot::LevelGuide.tint(&palette), palette.attitude);
        assert_eq!(MarkerSlot::Retrograde.tint(&palette), palette.prograde);
        assert_eq!(MarkerSlot::Vertical.tint(&palette), palette.horizon);

        assert!(MarkerSlot::Heading.depth() < MarkerSlot::Prograde.depth());
        assert!(MarkerSlot::Prograde.depth() < MarkerSlot::Horizon.depth());
    }
}
