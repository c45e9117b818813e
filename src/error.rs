/// Errors raised while bringing the simulation up.
///
/// Every variant is fatal: once the pipelines are built and the first tick
/// has been submitted there is no recoverable error class, so nothing here
/// is ever constructed after startup.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("invalid grid configuration: {0}")]
    Configuration(String),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,

    #[error("kernel failed to compile: {0}")]
    KernelCompilation(String),
}
