//! The viewer: render engine, frame scheduler and the capture pipeline.

use std::path::PathBuf;

use scopeshot_core::{
    index_file_name, keeps_transparency, CaptureError, CaptureOptions, DefaultNamePolicy,
    EmptyNamePolicy, Result, ScreenshotIndex,
};
use scopeshot_render::{
    force_opaque_alpha, save_image, screenshot::flip_rows, DisplayBuffer, HostDisplayBuffer,
    RenderEngine,
};

use crate::dialog::{default_save_dialog, SaveFileDialog};
use crate::scheduler::{FrameDraw, FrameScheduler};

/// Owns everything a capture touches.
///
/// All capture state (buffer-selection flags, pending redraw, screenshot
/// index) lives here and is borrowed mutably per call, so captures cannot
/// overlap each other or a frame.
pub struct Viewer<B: DisplayBuffer> {
    /// The render engine with its primary and alternate buffers.
    pub engine: RenderEngine<B>,
    /// Redraw bookkeeping for the frame loop.
    pub scheduler: FrameScheduler,
    /// Naming and format options.
    pub options: CaptureOptions,
    screenshot_index: ScreenshotIndex,
    drawer: Box<dyn FrameDraw<B>>,
    dialog: Box<dyn SaveFileDialog>,
}

impl<B: DisplayBuffer> Viewer<B> {
    /// Creates a viewer drawing with `drawer`.
    pub fn new(engine: RenderEngine<B>, drawer: Box<dyn FrameDraw<B>>) -> Self {
        Self {
            engine,
            scheduler: FrameScheduler::new(),
            options: CaptureOptions::default(),
            screenshot_index: ScreenshotIndex::default(),
            drawer,
            dialog: default_save_dialog(),
        }
    }

    /// Replaces the save dialog used for default names.
    #[must_use]
    pub fn with_dialog(mut self, dialog: Box<dyn SaveFileDialog>) -> Self {
        self.dialog = dialog;
        self
    }

    /// Replaces the capture options.
    #[must_use]
    pub fn with_options(mut self, options: CaptureOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs one iteration of the normal frame loop.
    pub fn draw_frame(&mut self) -> Result<bool> {
        self.scheduler
            .draw(&mut self.engine, self.drawer.as_mut(), true, false)
            .map_err(|e| CaptureError::Render(e.to_string()))
    }

    /// Marks the scene as needing a redraw.
    pub fn request_redraw(&mut self) {
        self.scheduler.request_redraw();
    }

    #[must_use]
    pub fn redraw_requested(&self) -> bool {
        self.scheduler.redraw_requested()
    }

    /// Index the next index-named screenshot will use.
    #[must_use]
    pub fn screenshot_index(&self) -> usize {
        self.screenshot_index.current()
    }

    /// Resets the index used for index-based default names.
    pub fn reset_screenshot_index(&mut self) {
        self.screenshot_index.reset();
    }

    /// Renders the scene into the alternate buffer and saves it to `filename`.
    ///
    /// The encoder is chosen from the file name suffix (see
    /// [`scopeshot_render::save_image`]). A transparent background is only kept
    /// for `.png` names; otherwise every pixel is written opaque.
    pub fn screenshot_to_file(
        &mut self,
        filename: &str,
        transparent_background: bool,
    ) -> Result<()> {
        let mut transparent_background = transparent_background;
        if transparent_background && !keeps_transparency(filename) {
            log::warn!("{filename}: not a .png name, capturing opaque background");
            transparent_background = false;
        }

        let (pixels, width, height) = self.capture_pixels(transparent_background)?;

        save_image(filename, &pixels, width, height)
            .map_err(|e| CaptureError::Screenshot(format!("Failed to save image: {e}")))?;
        log::info!("Screenshot saved to {filename}");
        Ok(())
    }

    /// Captures with a default file name.
    ///
    /// The name comes from the save dialog plus the default extension, or from
    /// the screenshot index, per [`CaptureOptions::default_name_policy`].
    /// Returns the path written, or `None` if the dialog was cancelled.
    pub fn screenshot(&mut self, transparent_background: bool) -> Result<Option<PathBuf>> {
        // only pngs can be written with transparency
        let transparent_background =
            transparent_background && self.options.default_supports_transparency();

        let Some(filename) = self.default_file_name() else {
            log::warn!("Screenshot cancelled: no file name chosen");
            return Ok(None);
        };

        self.screenshot_to_file(&filename, transparent_background)?;
        Ok(Some(PathBuf::from(filename)))
    }

    /// Captures the scene and returns RGBA pixels, rows top-to-bottom.
    pub fn screenshot_to_buffer(&mut self, transparent_background: bool) -> Result<Vec<u8>> {
        let (pixels, width, height) = self.capture_pixels(transparent_background)?;
        let img = flip_rows(pixels, width, height)
            .map_err(|e| CaptureError::Screenshot(e.to_string()))?;
        Ok(img.into_raw())
    }

    fn default_file_name(&mut self) -> Option<String> {
        let extension = &self.options.screenshot_extension;
        match self.options.default_name_policy {
            DefaultNamePolicy::Index => {
                Some(index_file_name(self.screenshot_index.advance(), extension))
            }
            DefaultNamePolicy::Dialog => {
                let base = self.dialog.request_save_file_path().unwrap_or_default();
                if !base.is_empty() {
                    return Some(format!("{base}{extension}"));
                }
                match self.options.empty_name_policy {
                    EmptyNamePolicy::Cancel => None,
                    EmptyNamePolicy::ExtensionOnly => Some(extension.clone()),
                }
            }
        }
    }

    /// Renders into the alternate buffer and reads it back (rows bottom-to-top).
    ///
    /// The engine's alternate-buffer and light-copy flags are cleared before
    /// returning, on success and failure alike.
    fn capture_pixels(&mut self, transparent_background: bool) -> Result<(Vec<u8>, u32, u32)> {
        self.engine.enable_alt_buffer();
        if transparent_background {
            // copy directly into the buffer without blending
            self.engine.enable_light_copy();
        }

        let result = self.render_and_read(transparent_background);

        self.engine.disable_alt_buffer();
        self.engine.disable_light_copy();
        result
    }

    fn render_and_read(&mut self, transparent_background: bool) -> Result<(Vec<u8>, u32, u32)> {
        self.drawer.process_lazy_properties();
        self.scheduler
            .draw_now(&mut self.engine, self.drawer.as_mut())
            .map_err(|e| CaptureError::Render(e.to_string()))?;

        let (width, height) = self.engine.dimensions();
        if width == 0 || height == 0 {
            return Err(CaptureError::InvalidDimensions { width, height });
        }

        let mut pixels = self
            .engine
            .read_alt_buffer()
            .map_err(|e| CaptureError::Render(format!("Failed to read display buffer: {e}")))?;

        if !transparent_background {
            force_opaque_alpha(&mut pixels);
        }
        Ok((pixels, width, height))
    }
}

impl Viewer<HostDisplayBuffer> {
    /// Creates a viewer with host-memory display buffers.
    #[must_use]
    pub fn new_host(
        width: u32,
        height: u32,
        drawer: Box<dyn FrameDraw<HostDisplayBuffer>>,
    ) -> Self {
        Self::new(RenderEngine::new_host(width, height), drawer)
    }
}
