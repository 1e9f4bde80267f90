//! Headless GPU construction for viewers.

use pollster::FutureExt;
use scopeshot_core::{CaptureError, Result};
use scopeshot_render::{GpuContext, GpuDisplayBuffer, RenderEngine};

use crate::scheduler::FrameDraw;
use crate::viewer::Viewer;

impl Viewer<GpuDisplayBuffer> {
    /// Creates a viewer whose display buffers live on a headless GPU device.
    ///
    /// # Example
    /// ```no_run
    /// use scopeshot::*;
    ///
    /// struct Background;
    ///
    /// impl FrameDraw<GpuDisplayBuffer> for Background {
    ///     fn draw(
    ///         &mut self,
    ///         engine: &mut RenderEngine<GpuDisplayBuffer>,
    ///         _swap_buffers: bool,
    ///     ) -> RenderResult<()> {
    ///         engine.clear_target();
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let mut viewer = Viewer::new_headless(800, 600, Box::new(Background)).unwrap();
    /// viewer.screenshot_to_file("output.png", false).unwrap();
    /// ```
    pub fn new_headless(
        width: u32,
        height: u32,
        drawer: Box<dyn FrameDraw<GpuDisplayBuffer>>,
    ) -> Result<Self> {
        let context = GpuContext::new_headless().block_on().map_err(|e| {
            CaptureError::Render(format!("Failed to create headless context: {e}"))
        })?;

        let engine = RenderEngine::new(
            context.create_display_buffer(width, height),
            context.create_display_buffer(width, height),
        );
        Ok(Self::new(engine, drawer))
    }
}
