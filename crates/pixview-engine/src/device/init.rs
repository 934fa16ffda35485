/// Initialization parameters for the GPU layer.
///
/// Intentionally small: a single-quad image viewer needs no optional device
/// features and no alpha compositing control.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Decoded image pixels are uploaded as sRGB; an sRGB surface keeps the
    /// output colors correct without a manual conversion pass.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is broadly supported and fine for
    /// an event-driven viewer that only redraws on mutation.
    pub present_mode: wgpu::PresentMode,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint; support depends
    /// on platform/backend).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
