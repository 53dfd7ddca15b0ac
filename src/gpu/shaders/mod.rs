//! WGSL shader sources, embedded as string constants.

pub mod line;
