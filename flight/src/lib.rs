//! Everything the indicators know about the flight: the per-frame state handed over by the game,
//! the velocity source policy and the sampler which turns both into a smoothed snapshot.
pub mod host;
pub mod sampler;
pub mod snapshot;
pub mod velocity;

pub use host::{CameraMode, CameraState, SimState, SpeedDisplayMode, TargetState, VesselState, VesselStatus};
pub use sampler::{SkipReason, SmoothingState, StateSampler};
pub use snapshot::{FrameSnapshot, SPEED_DRAW_THRESHOLD};
