//! Core view-state, input and grid generation for gridplane.
//!
//! Everything in this module is free of GPU types apart from glam math,
//! so the grid algorithm and interaction logic can be tested without a
//! device.

pub mod grid;
pub mod interaction;
pub mod renderer;
pub mod view;

pub use grid::{generate_lines, LineInstance};
pub use interaction::InputController;
pub use renderer::GridRenderer;
pub use view::ViewState;
