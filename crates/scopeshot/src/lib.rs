//! scopeshot: off-screen capture for real-time 3D visualization.
//!
//! A capture renders one frame into an alternate display buffer, reads it
//! back, fixes up alpha and writes PNG or JPEG, without disturbing the
//! on-screen buffer or the frame loop's pending-redraw state.
//!
//! # Quick Start
//!
//! ```no_run
//! use scopeshot::*;
//!
//! struct Gradient;
//!
//! impl FrameDraw<HostDisplayBuffer> for Gradient {
//!     fn draw(
//!         &mut self,
//!         engine: &mut RenderEngine<HostDisplayBuffer>,
//!         _swap_buffers: bool,
//!     ) -> RenderResult<()> {
//!         engine.clear_target();
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!     let mut viewer = Viewer::new_host(640, 480, Box::new(Gradient));
//!     viewer.screenshot_to_file("scene.png", true)?;
//!     Ok(())
//! }
//! ```

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod dialog;
mod headless;
pub mod scheduler;
pub mod viewer;

pub use scopeshot_core::{
    has_extension, index_file_name, keeps_transparency, CaptureError, CaptureOptions,
    DefaultNamePolicy, EmptyNamePolicy, ImageFileFormat, Result,
};
pub use scopeshot_render::{
    all_shader_stages, save_image, save_to_buffer, shader_stage, CompositeMode, DisplayBuffer,
    GpuContext, GpuDisplayBuffer, HostDisplayBuffer, Layer, RenderEngine, RenderError,
    RenderResult, ShaderStageSpecification,
};

#[cfg(feature = "native-dialog")]
pub use dialog::NativeSaveDialog;
pub use dialog::{NoSaveDialog, SaveFileDialog, ScriptedSaveDialog};
pub use scheduler::{FrameDraw, FrameScheduler};
pub use viewer::Viewer;

pub use glam::Vec4;

/// Installs the `env_logger` backend for the `log` facade.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
