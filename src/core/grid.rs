//! Grid line generation: a bounded set of line instances for the current
//! view, covering every grid resolution legible on screen plus the two
//! axis lines.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::core::view::ViewState;

/// World-space spacing of the coarsest grid level.
pub const BASE_STEP: f32 = 250_000.0;
/// How many times the base step is subdivided by ten.
pub const GRID_SUBDIVISIONS: usize = 7;
/// Levels whose on-screen spacing is at or below this are culled.
pub const MIN_SPACING_PX: f32 = 5.0;
/// Background clear value; the faintest grid lines fade into it.
pub const BACKGROUND_GRAYSCALE: f32 = 0.2;
pub const X_AXIS_COLOR: Vec3 = Vec3::new(1.0, 0.3, 0.3);
pub const Y_AXIS_COLOR: Vec3 = Vec3::new(0.3, 1.0, 0.3);

const GRID_MAX_GRAYSCALE: f32 = 0.35;
const SIGMOID_GROWTH_RATE: f32 = 30.0;
const SIGMOID_OFFSET: f32 = 0.04;

/// One line to draw: a model matrix positioning the shared unit segment
/// in NDC, and a flat color.
#[derive(Debug, Clone, PartialEq)]
pub struct LineInstance {
    pub model: Mat4,
    pub color: Vec3,
}

/// The step ladder, coarsest first.
pub fn grid_steps() -> [f32; GRID_SUBDIVISIONS + 1] {
    let mut steps = [0.0; GRID_SUBDIVISIONS + 1];
    let mut step = BASE_STEP;
    for slot in &mut steps {
        *slot = step;
        step /= 10.0;
    }
    steps
}

/// Generate the draw list for one frame: per-level horizontals then
/// verticals, coarse to fine, with the two axis lines appended last so
/// they always paint over the grid. A zero-area viewport yields only the
/// axes.
pub fn generate_lines(view: &ViewState, viewport: (u32, u32)) -> Vec<LineInstance> {
    let (width, height) = viewport;
    let mut lines = Vec::new();

    if width > 0 && height > 0 {
        let scale = view.scale();
        let width = width as f32;
        let height = height as f32;

        for step in grid_steps() {
            let spacing = step * scale;
            if !(spacing > MIN_SPACING_PX) {
                continue;
            }
            let color = level_color(step, scale, (width, height));

            for ndc in line_positions_ndc(step, height, scale, view.center().y) {
                lines.push(LineInstance {
                    model: Mat4::from_translation(Vec3::new(0.0, ndc, 0.0)),
                    color,
                });
            }
            for ndc in line_positions_ndc(step, width, scale, view.center().x) {
                lines.push(LineInstance {
                    model: vertical_model(ndc),
                    color,
                });
            }
        }

        // Axes, drawn last. Never culled, even off screen.
        lines.push(LineInstance {
            model: Mat4::from_translation(Vec3::new(
                0.0,
                axis_ndc(view.center().y, height, scale),
                0.0,
            )),
            color: X_AXIS_COLOR,
        });
        lines.push(LineInstance {
            model: vertical_model(axis_ndc(view.center().x, width, scale)),
            color: Y_AXIS_COLOR,
        });
    } else {
        lines.push(LineInstance {
            model: Mat4::IDENTITY,
            color: X_AXIS_COLOR,
        });
        lines.push(LineInstance {
            model: vertical_model(0.0),
            color: Y_AXIS_COLOR,
        });
    }

    lines
}

/// NDC coordinates of every multiple of `step` visible along one axis of
/// the viewport. `extent_px` is the viewport dimension in pixels,
/// `origin_offset` the view center along that axis. Degenerate inputs
/// (non-positive or non-finite step or extent, steps too small to advance
/// the window start) produce an empty list rather than stalling.
pub fn line_positions_ndc(step: f32, extent_px: f32, scale: f32, origin_offset: f32) -> Vec<f32> {
    if !(step > 0.0) {
        return Vec::new();
    }
    let extent = extent_px / scale;
    if !extent.is_finite() || extent <= 0.0 {
        return Vec::new();
    }

    let w0 = origin_offset - extent / 2.0;
    let w1 = origin_offset + extent / 2.0;
    if w0 + step == w0 {
        return Vec::new();
    }

    let mut positions = Vec::new();
    let mut pos = (w0 / step).floor() * step + step;
    while pos < w1 {
        positions.push(2.0 * (pos - w0) / extent - 1.0);
        pos += step;
    }
    positions
}

/// Grayscale for one grid level: a sigmoid of its on-screen spacing
/// relative to the larger half-extent of the visible world window.
/// Monotonic in `step`, continuous in `scale`, clamped between the
/// background value and the brightest grid gray.
pub fn level_color(step: f32, scale: f32, viewport: (f32, f32)) -> Vec3 {
    let (width, height) = viewport;
    let max_dim = width.max(height) / 2.0 / scale;
    let x = 1.3 / (1.0 + (-SIGMOID_GROWTH_RATE * (step / max_dim - SIGMOID_OFFSET)).exp()) - 0.3;
    let gray = BACKGROUND_GRAYSCALE + (GRID_MAX_GRAYSCALE - BACKGROUND_GRAYSCALE) * x.clamp(0.0, 1.0);
    Vec3::splat(gray)
}

fn vertical_model(ndc_x: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(ndc_x, 0.0, 0.0)) * Mat4::from_rotation_z(FRAC_PI_2)
}

fn axis_ndc(center_coord: f32, extent_px: f32, scale: f32) -> f32 {
    -2.0 * center_coord * scale / extent_px
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_descend_by_powers_of_ten() {
        let steps = grid_steps();
        assert_eq!(steps[0], BASE_STEP);
        for pair in steps.windows(2) {
            assert!((pair[0] / pair[1] - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn positions_for_centered_window() {
        // Window [-200, 200], step 100: interior lines at -100, 0, 100.
        let positions = line_positions_ndc(100.0, 400.0, 1.0, 0.0);
        assert_eq!(positions.len(), 3);
        for (got, want) in positions.iter().zip([-0.5, 0.0, 0.5]) {
            assert!((got - want).abs() < 1e-5);
        }
    }

    #[test]
    fn degenerate_steps_yield_no_lines() {
        assert!(line_positions_ndc(0.0, 400.0, 1.0, 0.0).is_empty());
        assert!(line_positions_ndc(-5.0, 400.0, 1.0, 0.0).is_empty());
        assert!(line_positions_ndc(f32::NAN, 400.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn vanishing_step_terminates() {
        // A step too small to advance the window start must not stall.
        assert!(line_positions_ndc(1e-40, 600.0, 1.0, 1e10).is_empty());
    }

    #[test]
    fn level_color_is_monotonic_in_step() {
        let viewport = (800.0, 600.0);
        let steps = grid_steps();
        for pair in steps.windows(2) {
            let coarse = level_color(pair[0], 1.0, viewport).x;
            let fine = level_color(pair[1], 1.0, viewport).x;
            assert!(coarse >= fine);
        }
    }

    #[test]
    fn faintest_levels_match_background() {
        let color = level_color(1e-6, 1.0, (800.0, 600.0));
        assert!((color.x - BACKGROUND_GRAYSCALE).abs() < 0.01);
    }
}
