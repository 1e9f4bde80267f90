//! Display buffers: RGBA8 pixel stores the engine draws into and reads back.
//!
//! All buffers share one row convention: row 0 is the bottom row of the image.
//! Layers passed to [`DisplayBuffer::composite`] use the same ordering, and
//! [`DisplayBuffer::read_buffer`] returns rows bottom-to-top.

use glam::Vec4;

use crate::error::{RenderError, RenderResult};

/// Number of channels in every display buffer (RGBA).
pub const CHANNELS: usize = 4;

/// How a layer is combined with what is already in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeMode {
    /// Standard alpha blending of the layer over the buffer.
    Over,
    /// Front-to-back accumulation: the layer goes under what is already there.
    /// The buffer holds premultiplied color while peeling.
    Under,
    /// Write the layer's pixels unchanged, alpha included (light copy).
    Replace,
}

/// An RGBA8 image to be composited into a display buffer.
#[derive(Debug, Clone, Copy)]
pub struct Layer<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
}

impl<'a> Layer<'a> {
    /// Wraps a bottom-to-top RGBA8 pixel slice.
    #[must_use]
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Checks that the layer has the given size and a matching pixel count.
    pub fn check_size(&self, width: u32, height: u32) -> RenderResult<()> {
        if self.width != width
            || self.height != height
            || self.pixels.len() != byte_len(self.width, self.height)
        {
            return Err(RenderError::SizeMismatch {
                expected: (width, height),
                actual: (self.width, self.height),
            });
        }
        Ok(())
    }
}

/// Byte length of an RGBA8 image.
#[must_use]
pub fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

/// A pixel store the render engine draws into.
pub trait DisplayBuffer {
    /// Returns `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Reallocates the buffer at a new size. Contents are undefined afterwards.
    fn resize(&mut self, width: u32, height: u32);

    /// Fills the whole buffer with a color.
    fn clear(&mut self, color: Vec4);

    /// Draws a layer of the buffer's size using the given mode.
    fn composite(&mut self, layer: &Layer<'_>, mode: CompositeMode) -> RenderResult<()>;

    /// Reads the buffer back as `4 * width * height` bytes, rows bottom-to-top.
    fn read_buffer(&mut self) -> RenderResult<Vec<u8>>;
}

/// A display buffer held in host memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDisplayBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl HostDisplayBuffer {
    /// Creates a zero-filled buffer.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; byte_len(width, height)],
        }
    }

    /// Borrows the raw pixels, rows bottom-to-top.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl DisplayBuffer for HostDisplayBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; byte_len(width, height)];
    }

    fn clear(&mut self, color: Vec4) {
        let texel = to_unorm8(color);
        let dst: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut self.pixels);
        dst.fill(texel);
    }

    fn composite(&mut self, layer: &Layer<'_>, mode: CompositeMode) -> RenderResult<()> {
        layer.check_size(self.width, self.height)?;

        if mode == CompositeMode::Replace {
            self.pixels.copy_from_slice(layer.pixels);
            return Ok(());
        }

        let dst: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut self.pixels);
        let src: &[[u8; 4]] = bytemuck::cast_slice(layer.pixels);
        for (d, s) in dst.iter_mut().zip(src) {
            let d_f = from_unorm8(*d);
            let s_f = from_unorm8(*s);
            let out = match mode {
                CompositeMode::Over => blend_over(s_f, d_f),
                CompositeMode::Under => blend_under(s_f, d_f),
                CompositeMode::Replace => s_f,
            };
            *d = to_unorm8(out);
        }
        Ok(())
    }

    fn read_buffer(&mut self) -> RenderResult<Vec<u8>> {
        Ok(self.pixels.clone())
    }
}

/// `src * src.a + dst * (1 - src.a)` for color; `src.a + dst.a * (1 - src.a)` for alpha.
fn blend_over(src: Vec4, dst: Vec4) -> Vec4 {
    let inv = 1.0 - src.w;
    let rgb = src.truncate() * src.w + dst.truncate() * inv;
    rgb.extend(src.w + dst.w * inv)
}

/// Premultiplies the layer and adds it behind the accumulated result.
fn blend_under(src: Vec4, dst: Vec4) -> Vec4 {
    let inv = 1.0 - dst.w;
    let rgb = dst.truncate() + src.truncate() * src.w * inv;
    rgb.extend(dst.w + src.w * inv)
}

fn from_unorm8(texel: [u8; 4]) -> Vec4 {
    Vec4::new(
        f32::from(texel[0]),
        f32::from(texel[1]),
        f32::from(texel[2]),
        f32::from(texel[3]),
    ) / 255.0
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_unorm8(color: Vec4) -> [u8; 4] {
    let scaled = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [
        scaled.x as u8,
        scaled.y as u8,
        scaled.z as u8,
        scaled.w as u8,
    ]
}
