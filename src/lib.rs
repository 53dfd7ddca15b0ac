//! GPU-accelerated infinite 2D grid canvas.
//!
//! Renders an infinitely tileable Cartesian plane as a bounded, per-frame
//! set of line segments, with nested grid resolutions fading in as they
//! become legible on screen and two highlighted axis lines through a
//! movable origin.
//!
//! The crate splits into a GPU-free core (view state, input handling, grid
//! generation) that is fully unit-testable, and a thin wgpu/winit shell
//! that owns the surface and event loop.

pub mod core;
pub mod error;
pub mod gpu;
pub mod gui;

pub use crate::core::grid::{generate_lines, LineInstance};
pub use crate::core::interaction::InputController;
pub use crate::core::renderer::GridRenderer;
pub use crate::core::view::ViewState;
pub use crate::error::GridError;
pub use crate::gui::{GridWindow, WindowConfig};
