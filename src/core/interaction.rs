//! Pointer and wheel input mapped onto [`ViewState`] mutations.

use glam::Vec2;

use crate::core::view::ViewState;

/// Zoom accumulator change per wheel notch.
pub const WHEEL_ZOOM_STEP: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    /// World point that must stay under the cursor for the whole drag.
    Dragging { anchor: Vec2 },
}

/// Translates pointer presses, moves, releases and wheel notches into view
/// changes. Drag keeps the world point grabbed at press time glued to the
/// cursor; move and wheel report whether a redraw is needed.
#[derive(Debug)]
pub struct InputController {
    drag: DragState,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    pub fn new() -> Self {
        Self {
            drag: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Start a drag at `screen` (pixels from the viewport center, y down).
    pub fn begin_drag(&mut self, view: &ViewState, screen: Vec2) {
        let scale = view.scale();
        let anchor = Vec2::new(
            view.center().x + screen.x / scale,
            view.center().y - screen.y / scale,
        );
        self.drag = DragState::Dragging { anchor };
    }

    /// Update an active drag; the anchor world point follows the cursor.
    /// Returns true when the view moved. Moves without a preceding press
    /// are ignored.
    pub fn drag_to(&mut self, view: &mut ViewState, screen: Vec2) -> bool {
        let DragState::Dragging { anchor } = self.drag else {
            return false;
        };
        let scale = view.scale();
        view.set_center(Vec2::new(
            anchor.x - screen.x / scale,
            anchor.y + screen.y / scale,
        ));
        true
    }

    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Apply one wheel event. Positive `delta_y` (scrolling down) zooms
    /// out, negative zooms in, each notch moving the zoom accumulator by a
    /// fixed step. Returns true when the zoom level actually changed.
    pub fn wheel(&mut self, view: &mut ViewState, delta_y: f32) -> bool {
        if delta_y == 0.0 {
            return false;
        }
        view.zoom_by(-delta_y.signum() * WHEEL_ZOOM_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_keeps_anchor_under_cursor() {
        let mut view = ViewState::new();
        view.set_zoom_level(1.0);
        let scale = view.scale();
        let mut controller = InputController::new();

        let press = Vec2::new(40.0, -25.0);
        controller.begin_drag(&view, press);
        let anchor = Vec2::new(
            view.center().x + press.x / scale,
            view.center().y - press.y / scale,
        );

        for screen in [Vec2::new(10.0, 5.0), Vec2::new(-120.0, 60.0)] {
            assert!(controller.drag_to(&mut view, screen));
            let under_cursor = Vec2::new(
                view.center().x + screen.x / view.scale(),
                view.center().y - screen.y / view.scale(),
            );
            assert!((under_cursor - anchor).length() < 1e-4);
        }
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut view = ViewState::new();
        let mut controller = InputController::new();
        assert!(!controller.drag_to(&mut view, Vec2::new(50.0, 50.0)));
        assert_eq!(view.center(), Vec2::ZERO);
    }

    #[test]
    fn release_ends_the_drag() {
        let mut view = ViewState::new();
        let mut controller = InputController::new();
        controller.begin_drag(&view, Vec2::ZERO);
        assert!(controller.is_dragging());
        controller.end_drag();
        assert!(!controller.is_dragging());
        assert!(!controller.drag_to(&mut view, Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn wheel_direction_and_dead_delta() {
        let mut view = ViewState::new();
        let mut controller = InputController::new();
        assert!(controller.wheel(&mut view, -1.0));
        assert_eq!(view.zoom_level(), WHEEL_ZOOM_STEP);
        assert!(controller.wheel(&mut view, 1.0));
        assert!(view.zoom_level().abs() < 1e-6);
        assert!(!controller.wheel(&mut view, 0.0));
    }
}
