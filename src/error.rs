//! Error types for the visualizer window.
//!
//! The field core is infallible; only bringing up the window and the GPU can
//! fail.

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found (Vulkan, Metal, DX12 or GL required)")]
    NoAdapter,
    /// The surface reports no texture format the adapter can present.
    #[error("the window surface supports no presentable texture format")]
    NoSurfaceFormat,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface ran out of memory while presenting.
    #[error("GPU out of memory while presenting a frame")]
    OutOfMemory,
}

/// Errors that can occur while running the visualizer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}
