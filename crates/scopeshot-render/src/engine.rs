//! The render engine: primary and alternate display buffers plus the
//! buffer-selection flags the draw routine consults.

use glam::Vec4;

use crate::display_buffer::{CompositeMode, DisplayBuffer, HostDisplayBuffer, Layer};
use crate::error::RenderResult;

/// Owns the primary and alternate display buffers.
///
/// `use_alt_display_buffer` routes draws into the alternate buffer, leaving
/// the on-screen buffer untouched. `light_copy` composites without blending so
/// a transparent background survives; it is only meaningful while the
/// alternate buffer is active, which is not checked.
pub struct RenderEngine<B: DisplayBuffer> {
    display_buffer: B,
    display_buffer_alt: B,
    use_alt_display_buffer: bool,
    light_copy: bool,
    /// Color the target buffer is cleared to at the start of a frame.
    pub background_color: Vec4,
}

impl<B: DisplayBuffer> RenderEngine<B> {
    /// Creates an engine from two buffers of equal size.
    pub fn new(display_buffer: B, display_buffer_alt: B) -> Self {
        debug_assert_eq!(
            display_buffer.dimensions(),
            display_buffer_alt.dimensions(),
            "display buffers must share a size"
        );
        Self {
            display_buffer,
            display_buffer_alt,
            use_alt_display_buffer: false,
            light_copy: false,
            background_color: Vec4::ONE,
        }
    }

    pub fn enable_alt_buffer(&mut self) {
        self.use_alt_display_buffer = true;
    }

    pub fn disable_alt_buffer(&mut self) {
        self.use_alt_display_buffer = false;
    }

    pub fn enable_light_copy(&mut self) {
        self.light_copy = true;
    }

    pub fn disable_light_copy(&mut self) {
        self.light_copy = false;
    }

    #[must_use]
    pub fn use_alt_display_buffer(&self) -> bool {
        self.use_alt_display_buffer
    }

    #[must_use]
    pub fn light_copy(&self) -> bool {
        self.light_copy
    }

    /// Returns the viewport dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.display_buffer.dimensions()
    }

    /// Resizes both buffers.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.display_buffer.resize(width, height);
        self.display_buffer_alt.resize(width, height);
        log::debug!("display buffers resized to {width}x{height}");
    }

    #[must_use]
    pub fn display_buffer(&self) -> &B {
        &self.display_buffer
    }

    #[must_use]
    pub fn display_buffer_alt(&self) -> &B {
        &self.display_buffer_alt
    }

    /// The buffer draws currently go to.
    pub fn target_buffer_mut(&mut self) -> &mut B {
        if self.use_alt_display_buffer {
            &mut self.display_buffer_alt
        } else {
            &mut self.display_buffer
        }
    }

    /// Blend mode for scene layers: replace under light copy, over otherwise.
    #[must_use]
    pub fn composite_mode(&self) -> CompositeMode {
        if self.light_copy {
            CompositeMode::Replace
        } else {
            CompositeMode::Over
        }
    }

    /// Clears the target buffer to the background color.
    ///
    /// Under light copy the background is cleared fully transparent.
    pub fn clear_target(&mut self) {
        let color = if self.light_copy {
            self.background_color.truncate().extend(0.0)
        } else {
            self.background_color
        };
        self.target_buffer_mut().clear(color);
    }

    /// Composites a scene layer into the target buffer.
    pub fn composite_layer(&mut self, layer: &Layer<'_>) -> RenderResult<()> {
        let mode = self.composite_mode();
        self.target_buffer_mut().composite(layer, mode)
    }

    /// Accumulates one depth-peeled layer behind what the target already holds.
    pub fn composite_peel_layer(&mut self, layer: &Layer<'_>) -> RenderResult<()> {
        self.target_buffer_mut()
            .composite(layer, CompositeMode::Under)
    }

    /// Reads back the alternate buffer (rows bottom-to-top).
    pub fn read_alt_buffer(&mut self) -> RenderResult<Vec<u8>> {
        self.display_buffer_alt.read_buffer()
    }
}

impl RenderEngine<HostDisplayBuffer> {
    /// Creates an engine with host-memory buffers.
    #[must_use]
    pub fn new_host(width: u32, height: u32) -> Self {
        Self::new(
            HostDisplayBuffer::new(width, height),
            HostDisplayBuffer::new(width, height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_default_off() {
        let engine = RenderEngine::new_host(4, 4);
        assert!(!engine.use_alt_display_buffer());
        assert!(!engine.light_copy());
        assert_eq!(engine.composite_mode(), CompositeMode::Over);
    }

    #[test]
    fn test_alt_buffer_routes_draws() {
        let mut engine = RenderEngine::new_host(2, 2);
        engine.background_color = Vec4::new(0.0, 1.0, 0.0, 1.0);

        engine.enable_alt_buffer();
        engine.clear_target();
        engine.disable_alt_buffer();

        assert!(engine.display_buffer().pixels().iter().all(|&b| b == 0));
        assert!(engine
            .display_buffer_alt()
            .pixels()
            .chunks(4)
            .all(|px| px == [0, 255, 0, 255]));
    }

    #[test]
    fn test_light_copy_clears_transparent_and_replaces() {
        let mut engine = RenderEngine::new_host(1, 1);
        engine.enable_alt_buffer();
        engine.enable_light_copy();
        assert_eq!(engine.composite_mode(), CompositeMode::Replace);

        engine.clear_target();
        assert_eq!(engine.display_buffer_alt().pixels(), &[255, 255, 255, 0]);

        let layer = [9, 8, 7, 6];
        engine.composite_layer(&Layer::new(1, 1, &layer)).unwrap();
        assert_eq!(engine.read_alt_buffer().unwrap(), layer.to_vec());
    }

    #[test]
    fn test_peel_layers_accumulate_front_to_back() {
        let mut engine = RenderEngine::new_host(1, 1);
        engine.background_color = Vec4::ZERO;
        engine.clear_target();
        engine
            .composite_peel_layer(&Layer::new(1, 1, &[255, 0, 0, 128]))
            .unwrap();
        engine
            .composite_peel_layer(&Layer::new(1, 1, &[0, 0, 255, 255]))
            .unwrap();
        let px = engine.display_buffer().pixels();
        assert_eq!(px[3], 255);
        assert!((i32::from(px[0]) - 128).abs() <= 1);
        assert!((i32::from(px[2]) - 127).abs() <= 1);
    }

    #[test]
    fn test_resize_both() {
        let mut engine = RenderEngine::new_host(2, 2);
        engine.resize(7, 3);
        assert_eq!(engine.dimensions(), (7, 3));
        assert_eq!(engine.display_buffer_alt().dimensions(), (7, 3));
    }
}
