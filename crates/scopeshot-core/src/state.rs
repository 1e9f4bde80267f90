//! Frame and capture bookkeeping owned by the viewer.

/// Tracks whether the next frame loop iteration must re-render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawState {
    redraw_requested: bool,
}

impl RedrawState {
    /// Creates a state with no pending redraw.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a redraw as pending.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Returns whether a redraw is pending.
    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// Clears the pending flag, returning its previous value.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

/// Counter used for index-based default screenshot names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenshotIndex(usize);

impl ScreenshotIndex {
    /// Returns the index the next index-named capture will use.
    pub fn current(self) -> usize {
        self.0
    }

    /// Returns the current index and advances the counter by one.
    pub fn advance(&mut self) -> usize {
        let index = self.0;
        self.0 += 1;
        index
    }

    /// Resets the counter to zero.
    pub fn reset(&mut self) {
        log::debug!("screenshot index reset (was {})", self.0);
        self.0 = 0;
    }
}
