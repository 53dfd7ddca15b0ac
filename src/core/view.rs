//! Pan/zoom view state for the infinite plane.

use glam::Vec2;

/// Lower bound of the zoom accumulator. Keeps `scale` inside a safe
/// numeric band and, together with the spacing cull in grid generation,
/// bounds per-frame line counts.
pub const ZOOM_LEVEL_MIN: f32 = -9.0;
/// Upper bound of the zoom accumulator.
pub const ZOOM_LEVEL_MAX: f32 = 10.05;

/// The current view of the world plane: which world point sits at the
/// viewport center and how many screen units one world unit occupies.
///
/// Invariant: `scale == zoom_level.exp()` and `zoom_level` stays within
/// the clamp bounds. Both fields are private and only mutated together.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    center: Vec2,
    zoom_level: f32,
    scale: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// View centered on the world origin at scale 1.
    pub fn new() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom_level: 0.0,
            scale: 1.0,
        }
    }

    /// View centered on an arbitrary world point at scale 1.
    pub fn with_center(center: Vec2) -> Self {
        let mut view = Self::new();
        view.center = center;
        view
    }

    /// World-space point currently at the viewport center.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Zoom accumulator, always within `[ZOOM_LEVEL_MIN, ZOOM_LEVEL_MAX]`.
    pub fn zoom_level(&self) -> f32 {
        self.zoom_level
    }

    /// World-to-screen multiplier, always `zoom_level.exp()`.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
        log::trace!(target: "gridplane", "center {:?}", self.center);
    }

    /// Set the zoom accumulator, clamping it to the allowed range and
    /// re-deriving `scale`.
    pub fn set_zoom_level(&mut self, zoom_level: f32) {
        self.zoom_level = zoom_level.clamp(ZOOM_LEVEL_MIN, ZOOM_LEVEL_MAX);
        self.scale = self.zoom_level.exp();
    }

    /// Adjust the zoom accumulator by `delta`. Returns whether the view
    /// actually changed (it does not when pinned at a clamp boundary).
    pub fn zoom_by(&mut self, delta: f32) -> bool {
        let before = self.zoom_level;
        self.set_zoom_level(before + delta);
        self.zoom_level != before
    }
}
