//! GPU-side resources: embedded WGSL shader sources.

pub mod shaders;
