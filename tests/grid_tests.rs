//! End-to-end tests of the pure grid core: line counts, NDC bounds,
//! brightness ordering, pan/zoom round trips and axis presence.

use glam::{Vec2, Vec3};
use gridplane::core::grid::{
    generate_lines, grid_steps, level_color, line_positions_ndc, BACKGROUND_GRAYSCALE,
    MIN_SPACING_PX, X_AXIS_COLOR, Y_AXIS_COLOR,
};
use gridplane::core::view::{ViewState, ZOOM_LEVEL_MIN};
use gridplane::InputController;

#[test]
fn line_count_at_default_view_800x600() {
    let view = ViewState::new();
    let (width, height) = (800u32, 600u32);
    let scale = view.scale();

    let surviving: Vec<f32> = grid_steps()
        .into_iter()
        .filter(|step| step * scale > MIN_SPACING_PX)
        .collect();
    assert_eq!(surviving, vec![250_000.0, 25_000.0, 2_500.0, 250.0, 25.0]);

    let mut expected = 2; // axes
    for step in surviving {
        expected += line_positions_ndc(step, height as f32, scale, 0.0).len();
        expected += line_positions_ndc(step, width as f32, scale, 0.0).len();
    }

    let lines = generate_lines(&view, (width, height));
    assert_eq!(lines.len(), expected);
}

#[test]
fn grid_lines_stay_inside_ndc() {
    let views = [
        ViewState::new(),
        ViewState::with_center(Vec2::new(123_456.0, -9_876.0)),
        {
            let mut v = ViewState::with_center(Vec2::new(-0.5, 0.25));
            v.set_zoom_level(4.0);
            v
        },
        {
            let mut v = ViewState::new();
            v.set_zoom_level(-6.0);
            v
        },
    ];

    for view in views {
        let lines = generate_lines(&view, (800, 600));
        // All but the trailing two axis lines are grid lines.
        for line in &lines[..lines.len() - 2] {
            let t = line.model.w_axis;
            assert!(t.x >= -1.0 && t.x <= 1.0, "x translation {} out of range", t.x);
            assert!(t.y >= -1.0 && t.y <= 1.0, "y translation {} out of range", t.y);
        }
    }
}

#[test]
fn coarser_levels_are_never_darker() {
    let viewport = (800.0, 600.0);
    for zoom in [-6.0f32, -2.0, 0.0, 3.0, 8.0] {
        let scale = zoom.exp();
        let grays: Vec<f32> = grid_steps()
            .into_iter()
            .map(|step| level_color(step, scale, viewport).x)
            .collect();
        for pair in grays.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        assert!(grays.iter().all(|g| *g >= BACKGROUND_GRAYSCALE - 1e-6));
    }
}

#[test]
fn pan_round_trip_restores_center() {
    let mut view = ViewState::with_center(Vec2::new(10.0, -3.0));
    view.set_zoom_level(1.5);
    let start = view.center();
    let mut controller = InputController::new();

    controller.begin_drag(&view, Vec2::new(0.0, 0.0));
    controller.drag_to(&mut view, Vec2::new(37.0, -81.0));
    controller.end_drag();

    controller.begin_drag(&view, Vec2::new(0.0, 0.0));
    controller.drag_to(&mut view, Vec2::new(-37.0, 81.0));
    controller.end_drag();

    assert!((view.center() - start).length() < 1e-4);
}

#[test]
fn zoom_round_trip_and_floor_clamp() {
    let mut view = ViewState::new();
    let mut controller = InputController::new();

    controller.wheel(&mut view, -1.0);
    controller.wheel(&mut view, 1.0);
    assert!(view.zoom_level().abs() < 1e-6);

    for _ in 0..200 {
        controller.wheel(&mut view, 1.0);
    }
    assert_eq!(view.zoom_level(), ZOOM_LEVEL_MIN);
    assert_eq!(view.scale(), ZOOM_LEVEL_MIN.exp());

    // Pinned at the floor, further zoom-out is a no-op.
    assert!(!controller.wheel(&mut view, 1.0));
    assert!(controller.wheel(&mut view, -1.0));
    assert!(view.zoom_level() > ZOOM_LEVEL_MIN);
}

#[test]
fn axes_are_always_last_and_always_present() {
    let lines = generate_lines(&ViewState::new(), (800, 600));
    assert!(lines.len() >= 2);
    assert_eq!(lines[lines.len() - 2].color, X_AXIS_COLOR);
    assert_eq!(lines[lines.len() - 1].color, Y_AXIS_COLOR);

    // Far from the origin the axes are off screen but still emitted.
    let far = ViewState::with_center(Vec2::new(1.0e6, 1.0e6));
    let lines = generate_lines(&far, (800, 600));
    assert_eq!(lines[lines.len() - 2].color, X_AXIS_COLOR);
    assert_eq!(lines[lines.len() - 1].color, Y_AXIS_COLOR);
    let x_axis = lines[lines.len() - 2].model.w_axis;
    assert!(x_axis.y < -1.0);
}

#[test]
fn tiny_viewport_yields_only_axes() {
    let view = ViewState::with_center(Vec2::new(7.0, 7.0));
    let lines = generate_lines(&view, (0, 0));
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].color, X_AXIS_COLOR);
    assert_eq!(lines[1].color, Y_AXIS_COLOR);
}

#[test]
fn axis_colors_differ_from_grid_grays() {
    let lines = generate_lines(&ViewState::new(), (800, 600));
    for line in &lines[..lines.len() - 2] {
        let c = line.color;
        assert_eq!(c.x, c.y);
        assert_eq!(c.y, c.z);
        assert_ne!(c, X_AXIS_COLOR);
        assert_ne!(c, Y_AXIS_COLOR);
    }
    assert_eq!(X_AXIS_COLOR, Vec3::new(1.0, 0.3, 0.3));
    assert_eq!(Y_AXIS_COLOR, Vec3::new(0.3, 1.0, 0.3));
}
