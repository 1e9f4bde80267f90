//! A display buffer backed by a wgpu texture.
//!
//! The display texture follows wgpu's convention: texture row 0 is the top of
//! the image, matching what passes rendering into [`GpuDisplayBuffer::view`]
//! produce. Layers (bottom-to-top) are uploaded with their rows reversed, and
//! readback reverses them again so callers see bottom-to-top rows like every
//! other display buffer.

use std::sync::Arc;

use glam::Vec4;

use crate::display_buffer::{byte_len, CompositeMode, DisplayBuffer, Layer, CHANNELS};
use crate::error::{RenderError, RenderResult};
use crate::gpu_context::DISPLAY_FORMAT;
use crate::texture_draw_pass::TextureDrawPass;

/// Display texture plus the staging resources for upload and readback.
struct Targets {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    source_texture: wgpu::Texture,
    source_view: wgpu::TextureView,
    readback: wgpu::Buffer,
}

/// GPU-resident display buffer.
pub struct GpuDisplayBuffer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    draw_pass: Arc<TextureDrawPass>,
    targets: Targets,
    width: u32,
    height: u32,
}

impl GpuDisplayBuffer {
    pub(crate) fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        draw_pass: Arc<TextureDrawPass>,
        width: u32,
        height: u32,
    ) -> Self {
        let targets = Self::create_targets(&device, width, height);
        Self {
            device,
            queue,
            draw_pass,
            targets,
            width,
            height,
        }
    }

    /// The display texture view, for passes that render into the buffer directly.
    #[must_use]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.targets.view
    }

    /// Calculates bytes per row with proper alignment for wgpu buffer copies.
    fn aligned_bytes_per_row(width: u32) -> u32 {
        let unaligned = width * CHANNELS as u32;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        unaligned.div_ceil(align) * align
    }

    fn create_targets(device: &wgpu::Device, width: u32, height: u32) -> Targets {
        // wgpu rejects zero-sized textures
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("display buffer texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DISPLAY_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let source_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("display buffer layer texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DISPLAY_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let source_view = source_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("display buffer readback"),
            size: u64::from(Self::aligned_bytes_per_row(size.width)) * u64::from(size.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Targets {
            texture,
            view,
            source_texture,
            source_view,
            readback,
        }
    }

    fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

impl DisplayBuffer for GpuDisplayBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.targets = Self::create_targets(&self.device, width, height);
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self, color: Vec4) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("display buffer clear encoder"),
            });
        {
            let _render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("display buffer clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(color.x),
                            g: f64::from(color.y),
                            b: f64::from(color.z),
                            a: f64::from(color.w),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn composite(&mut self, layer: &Layer<'_>, mode: CompositeMode) -> RenderResult<()> {
        layer.check_size(self.width, self.height)?;
        if layer.pixels.is_empty() {
            return Ok(());
        }

        let row_bytes = self.width as usize * CHANNELS;
        let top_down = reverse_rows(layer.pixels, row_bytes);
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.targets.source_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &top_down,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.width * CHANNELS as u32),
                rows_per_image: Some(self.height),
            },
            self.extent(),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("display buffer composite encoder"),
            });
        self.draw_pass.draw(
            &self.device,
            &mut encoder,
            &self.targets.source_view,
            &self.targets.view,
            mode,
        );
        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn read_buffer(&mut self) -> RenderResult<Vec<u8>> {
        if self.width == 0 || self.height == 0 {
            return Ok(Vec::new());
        }

        let bytes_per_row = Self::aligned_bytes_per_row(self.width);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("display buffer copy encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.targets.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.targets.readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            self.extent(),
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        // Map buffer and read data
        let buffer_slice = self.targets.readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = self.device.poll(wgpu::PollType::wait_indefinitely());
        rx.recv()
            .map_err(|_| RenderError::BufferMapFailed)?
            .map_err(|e| {
                log::error!("display buffer readback failed: {e}");
                RenderError::BufferMapFailed
            })?;

        // Strip row padding, last texture row first
        let data = buffer_slice.get_mapped_range();
        let mut result = Vec::with_capacity(byte_len(self.width, self.height));
        let row_bytes = self.width as usize * CHANNELS;
        for row in (0..self.height as usize).rev() {
            let start = row * bytes_per_row as usize;
            result.extend_from_slice(&data[start..start + row_bytes]);
        }

        drop(data);
        self.targets.readback.unmap();

        Ok(result)
    }
}

/// Copies tightly packed rows in reverse order.
fn reverse_rows(pixels: &[u8], row_bytes: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len());
    for row in pixels.chunks_exact(row_bytes).rev() {
        out.extend_from_slice(row);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_rows() {
        let pixels = [1, 1, 2, 2, 3, 3];
        assert_eq!(reverse_rows(&pixels, 2), vec![3, 3, 2, 2, 1, 1]);
        assert!(reverse_rows(&[], 4).is_empty());
    }
}
