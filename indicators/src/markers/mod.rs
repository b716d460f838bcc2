//! The seven marker slots and the per-frame output the projector writes into them.

pub mod style;

use kfi_utils::rotation_from_up;
use nalgebra::{UnitQuaternion, Vector2};

pub use style::{BlendThresholds, Palette};

/// Fixed semantic identity of each marker. The declaration order is the storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerSlot {
    /// Where the nose points, when it points away from the camera.
    Heading,
    /// Direction of travel.
    Prograde,
    /// Opposite the direction of travel.
    Retrograde,
    /// Where the nose points, when it points towards the camera.
    Reverse,
    /// Wings-level reference, drawn on top of the heading marker.
    LevelGuide,
    /// Local vertical (zenith or nadir).
    Vertical,
    /// Heading projected onto the local horizon.
    Horizon,
}

impl MarkerSlot {
    /// Number of slots.
    pub const COUNT: usize = 7;

    /// Every slot, in storage order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Heading,
        Self::Prograde,
        Self::Retrograde,
        Self::Reverse,
        Self::LevelGuide,
        Self::Vertical,
        Self::Horizon,
    ];

    /// Position of this slot in [`MarkerSlot::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Heading => 0,
            Self::Prograde => 1,
            Self::Retrograde => 2,
            Self::Reverse => 3,
            Self::LevelGuide => 4,
            Self::Vertical => 5,
            Self::Horizon => 6,
        }
    }

    /// Name used in settings files and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heading => "Heading",
            Self::Prograde => "Prograde",
            Self::Retrograde => "Retrograde",
            Self::Reverse => "Reverse",
            Self::LevelGuide => "LevelGuide",
            Self::Vertical => "Vertical",
            Self::Horizon => "Horizon",
        }
    }

    /// Inverse of [`MarkerSlot::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

/// What the projector decided for one slot this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerOutput {
    /// Drawn this frame.
    pub visible: bool,
    /// Normalized device coordinates, mirrored as they come out of the camera projection.
    pub position: Vector2<f32>,
    /// In-plane rotation about the screen normal.
    pub rotation: UnitQuaternion<f32>,
    /// Fade input, see [`BlendThresholds::alpha`].
    pub blend: f32,
}

impl MarkerOutput {
    /// Invisible output carrying the slot's resting blend value.
    pub fn hidden(slot: MarkerSlot) -> Self {
        Self {
            visible: false,
            position: Vector2::zeros(),
            rotation: UnitQuaternion::identity(),
            blend: slot.resting_blend(),
        }
    }
}

/// One frame's worth of marker outputs, indexed by [`MarkerSlot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerFrame {
    outputs: [MarkerOutput; MarkerSlot::COUNT],
}

impl Default for MarkerFrame {
    fn default() -> Self {
        Self::hidden()
    }
}

impl MarkerFrame {
    /// A frame with nothing drawn.
    pub fn hidden() -> Self {
        Self {
            outputs: MarkerSlot::ALL.map(MarkerOutput::hidden),
        }
    }

    /// Output for one slot.
    #[allow(clippy::indexing_slicing)] // index() is bounded by COUNT, the array length.
    pub fn get(&self, slot: MarkerSlot) -> &MarkerOutput {
        &self.outputs[slot.index()]
    }

    /// All slots with their outputs, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerSlot, &MarkerOutput)> {
        MarkerSlot::ALL.into_iter().zip(self.outputs.iter())
    }

    /// Slots drawn this frame.
    pub fn visible(&self) -> impl Iterator<Item = MarkerSlot> + '_ {
        self.iter().filter(|(_, o)| o.visible).map(|(slot, _)| slot)
    }

    /// Marks `slot` visible at `position`, turned so its top edge points along `up`.
    #[allow(clippy::indexing_slicing)] // see get()
    pub fn show(&mut self, slot: MarkerSlot, position: Vector2<f32>, up: Vector2<f32>, blend: f32) {
        self.outputs[slot.index()] = MarkerOutput {
            visible: true,
            position,
            rotation: rotation_from_up(up),
            blend,
        };
    }
}
