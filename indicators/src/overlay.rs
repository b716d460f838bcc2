//! Host-facing adapter: owns the sampler, runs it once per frame before culling and publishes the
//! resulting marker frame for the renderer.
//!
//! The latest frame is kept in a `watch` channel. The renderer (or anything else interested, such
//! as the replay tool) subscribes and reads whatever is current; older frames are simply dropped.

use std::path::Path;

use kfi_flight::{SimState, StateSampler};
use kfi_utils::{Rgba, UvRect};
use log::{info, trace};
use nalgebra::{UnitQuaternion, Vector2, Vector3};
use tokio::sync::watch;

use crate::{
    markers::{MarkerFrame, MarkerSlot},
    projector,
    settings::{Settings, SettingsError},
    toolbar::{ToolbarState, VisibilityEvent},
};

/// Orthographic overlay camera covering the screen, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayViewport {
    /// Width over height.
    pub aspect: f32,
    /// Half the screen height; the overlay camera's orthographic size.
    pub half_height: f32,
}

impl OverlayViewport {
    /// Viewport for a screen of the given pixel size.
    pub fn from_screen(width: f32, height: f32) -> Self {
        Self {
            aspect: width / height,
            half_height: height * 0.5,
        }
    }

    /// Overlay-local position of a projected marker.
    pub fn to_local(&self, screen: Vector2<f32>, depth: f32) -> Vector3<f32> {
        //! the camera projection mirrors both axes (see `CameraProjection`), hence the negation.
        Vector3::new(
            screen.x * -self.aspect * self.half_height,
            screen.y * -self.half_height,
            depth,
        )
    }
}

/// Everything about a marker that does not change between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerAppearance {
    /// Texture coordinates in the atlas.
    pub uv: UvRect,
    /// Quad size in overlay pixels.
    pub size: Vector2<f32>,
    /// Colour before fading.
    pub tint: Rgba,
    /// Distance from the overlay camera.
    pub depth: f32,
}

impl MarkerAppearance {
    /// Resolves a slot's appearance against an atlas of `atlas_size` pixels.
    pub fn for_slot(settings: &Settings, slot: MarkerSlot, atlas_size: (u32, u32)) -> Self {
        let rect = settings.rect(slot);
        Self {
            uv: rect.tex_coords(atlas_size.0, atlas_size.1),
            size: rect.size() * settings.display_scale_factor,
            tint: slot.tint(&settings.palette),
            depth: slot.depth(),
        }
    }
}

/// Where and how to draw one marker this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPlacement {
    /// Which marker.
    pub slot: MarkerSlot,
    /// Drawn this frame.
    pub visible: bool,
    /// Position in the overlay camera's local frame.
    pub local_position: Vector3<f32>,
    /// In-plane rotation.
    pub rotation: UnitQuaternion<f32>,
    /// Tint with the blend-derived alpha applied.
    pub color: Rgba,
    /// Quad size in overlay pixels.
    pub size: Vector2<f32>,
    /// Atlas texture coordinates.
    pub uv: UvRect,
}

/// The overlay for one flight scene.
#[derive(Debug)]
pub struct IndicatorOverlay {
    settings: Settings,
    appearances: [MarkerAppearance; MarkerSlot::COUNT],
    toolbar: ToolbarState,
    viewport: OverlayViewport,
    sampler: StateSampler,
    frames: watch::Sender<MarkerFrame>,
}

impl IndicatorOverlay {
    /// Sets up the overlay at scene start. Nothing is drawn until the first pre-cull.
    pub fn start(
        settings: Settings,
        toolbar: ToolbarState,
        viewport: OverlayViewport,
        atlas_size: (u32, u32),
    ) -> Self {
        let appearances =
            MarkerSlot::ALL.map(|slot| MarkerAppearance::for_slot(&settings, slot, atlas_size));
        let (frames, _) = watch::channel(MarkerFrame::hidden());
        info!(
            "overlay started: atlas {} {}x{}, camera depth {}, visible {}",
            settings.atlas_texture,
            atlas_size.0,
            atlas_size.1,
            settings.overlay_camera_depth(),
            toolbar.is_visible()
        );
        Self {
            settings,
            appearances,
            toolbar,
            viewport,
            sampler: StateSampler::new(),
            frames,
        }
    }

    /// Receiver that always holds the most recently published frame.
    pub fn subscribe(&self) -> watch::Receiver<MarkerFrame> {
        self.frames.subscribe()
    }

    /// Once per rendered frame, before culling. Returns the frame it published.
    pub fn on_pre_cull(&mut self, sim: &SimState) -> MarkerFrame {
        //! every slot starts hidden; a skipped sample publishes nothing but hidden slots.
        let frame = if self.toolbar.is_visible() {
            self.sampler
                .sample(sim)
                .map_or_else(|_| MarkerFrame::hidden(), |snapshot| projector::project(&snapshot))
        } else {
            MarkerFrame::hidden()
        };
        trace!("published {} visible markers", frame.visible().count());
        self.frames.send_replace(frame);
        frame
    }

    /// Applies a visibility event. Hiding takes effect immediately, without waiting for a frame.
    pub fn handle(&mut self, event: VisibilityEvent) {
        if self.toolbar.apply(event) && !self.toolbar.is_visible() {
            self.frames.send_replace(MarkerFrame::hidden());
        }
    }

    /// Follows a screen resize.
    pub fn set_viewport(&mut self, viewport: OverlayViewport) {
        self.viewport = viewport;
    }

    /// Most recently published frame.
    pub fn current_frame(&self) -> MarkerFrame {
        *self.frames.borrow()
    }

    /// Draw instructions for the current frame, in slot order.
    pub fn placements(&self) -> [MarkerPlacement; MarkerSlot::COUNT] {
        let frame = self.current_frame();
        MarkerSlot::ALL.map(|slot| {
            let output = frame.get(slot);
            let appearance = self.appearance(slot);
            MarkerPlacement {
                slot,
                visible: output.visible,
                local_position: self.viewport.to_local(output.position, appearance.depth),
                rotation: output.rotation,
                color: appearance.tint.with_alpha_scaled(slot.alpha(output.blend)),
                size: appearance.size,
                uv: appearance.uv,
            }
        })
    }

    /// Resolved appearance of one slot.
    #[allow(clippy::indexing_slicing)] // index() is bounded by COUNT, the array length.
    pub fn appearance(&self, slot: MarkerSlot) -> &MarkerAppearance {
        &self.appearances[slot.index()]
    }

    /// Settings the overlay was started with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current visibility switches.
    pub fn toolbar(&self) -> &ToolbarState {
        &self.toolbar
    }

    /// Scene teardown: persists the toolbar switch to `state_path`.
    pub fn shutdown(self, state_path: &Path) -> Result<(), SettingsError> {
        info!("overlay shutting down");
        self.frames.send_replace(MarkerFrame::hidden());
        self.toolbar.save(state_path)
    }
}
