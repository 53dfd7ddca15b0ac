//! Native windowing shell built on winit.

pub mod window;

pub use window::{GridWindow, WindowConfig};
