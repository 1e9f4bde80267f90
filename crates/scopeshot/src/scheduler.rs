//! Dirty-flag frame scheduling and the capture-triggered forced draw.

use scopeshot_core::RedrawState;
use scopeshot_render::{DisplayBuffer, RenderEngine, RenderResult};

/// The scene draw routine driven by the scheduler.
///
/// Implementations draw into `engine.target_buffer_mut()` (typically via
/// [`RenderEngine::clear_target`] and [`RenderEngine::composite_layer`]) and
/// must respect the engine's alternate-buffer and light-copy flags.
pub trait FrameDraw<B: DisplayBuffer> {
    /// Renders one frame. `swap_buffers` asks for presentation afterwards.
    fn draw(&mut self, engine: &mut RenderEngine<B>, swap_buffers: bool) -> RenderResult<()>;

    /// Flushes deferred state before a forced draw.
    fn process_lazy_properties(&mut self) {}
}

/// Decides when a frame must be rendered.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    state: RedrawState,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_redraw(&mut self) {
        self.state.request_redraw();
    }

    #[must_use]
    pub fn redraw_requested(&self) -> bool {
        self.state.redraw_requested()
    }

    /// Runs one frame-loop iteration.
    ///
    /// Renders when a redraw is pending or `force_redraw` is set, consuming the
    /// pending flag. Returns whether a frame was rendered.
    pub fn draw<B: DisplayBuffer>(
        &mut self,
        engine: &mut RenderEngine<B>,
        drawer: &mut dyn FrameDraw<B>,
        swap_buffers: bool,
        force_redraw: bool,
    ) -> RenderResult<bool> {
        let pending = self.state.take();
        if !(pending || force_redraw) {
            return Ok(false);
        }
        drawer.draw(engine, swap_buffers)?;
        Ok(true)
    }

    /// Renders exactly one frame now without disturbing the pending flag.
    ///
    /// A redraw that was pending before the call is still pending afterwards;
    /// one that was not is not.
    pub fn draw_now<B: DisplayBuffer>(
        &mut self,
        engine: &mut RenderEngine<B>,
        drawer: &mut dyn FrameDraw<B>,
    ) -> RenderResult<()> {
        let requested_already = self.redraw_requested();
        self.request_redraw();

        log::debug!("forced draw (redraw pending before: {requested_already})");
        let result = self.draw(engine, drawer, false, false);

        if requested_already {
            self.request_redraw();
        }
        result.map(|_| ())
    }
}
