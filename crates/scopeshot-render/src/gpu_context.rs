//! Headless wgpu device setup.

use std::sync::Arc;

use crate::error::{RenderError, RenderResult};
use crate::gpu_display_buffer::GpuDisplayBuffer;
use crate::texture_draw_pass::TextureDrawPass;

/// Format of every GPU display buffer.
pub const DISPLAY_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// A wgpu device with the shared texture-draw pipelines.
pub struct GpuContext {
    /// The wgpu instance.
    pub instance: wgpu::Instance,
    /// The wgpu adapter.
    pub adapter: wgpu::Adapter,
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The wgpu queue.
    pub queue: wgpu::Queue,
    pub(crate) draw_pass: Arc<TextureDrawPass>,
}

impl GpuContext {
    /// Requests an adapter and device without a surface.
    pub async fn new_headless() -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("scopeshot device (headless)"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        log::info!("headless GPU context on {}", adapter.get_info().name);

        let draw_pass = Arc::new(TextureDrawPass::new(&device, DISPLAY_FORMAT)?);

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            draw_pass,
        })
    }

    /// Allocates a display buffer on this device.
    #[must_use]
    pub fn create_display_buffer(&self, width: u32, height: u32) -> GpuDisplayBuffer {
        GpuDisplayBuffer::new(
            self.device.clone(),
            self.queue.clone(),
            Arc::clone(&self.draw_pass),
            width,
            height,
        )
    }
}
