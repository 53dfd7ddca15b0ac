//! Error type for window and GPU construction.
//!
//! Every variant here is fatal: without an adapter, device, surface or
//! event loop there is nothing to render with. Geometry degeneracy during
//! grid generation is not an error and is handled locally by producing
//! fewer lines.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("no compatible GPU adapter found")]
    AdapterUnavailable,
    #[error("failed to request GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("event loop already consumed by a previous run")]
    EventLoopConsumed,
}
