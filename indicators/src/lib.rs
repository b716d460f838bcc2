//! Flight instrument overlay: heading, prograde/retrograde, level guide, vertical and horizon
//! markers drawn over the flight view.
//!
//! Each frame the host fills a [`kfi_flight::SimState`] and calls
//! [`IndicatorOverlay::on_pre_cull`]. The overlay samples and smooths the vessel state, projects the
//! seven markers onto the screen and publishes a [`MarkerFrame`]; [`IndicatorOverlay::placements`]
//! turns that into draw instructions in overlay camera space.

pub mod markers;
pub mod overlay;
pub mod projector;
pub mod settings;
pub mod toolbar;

pub use markers::{BlendThresholds, MarkerFrame, MarkerOutput, MarkerSlot, Palette};
pub use overlay::{IndicatorOverlay, MarkerAppearance, MarkerPlacement, OverlayViewport};
pub use projector::{project, FrameGeometry};
pub use settings::{Settings, SettingsError, SETTINGS_FILE};
pub use toolbar::{ToolbarState, VisibilityEvent, STATE_FILE};
