//! Core abstractions for scopeshot.
//!
//! This crate provides the types shared by the render backend and the capture
//! pipeline:
//! - [`CaptureOptions`] configuration (default extension, naming policies)
//! - [`RedrawState`] and [`ScreenshotIndex`] frame/capture bookkeeping
//! - [`ImageFileFormat`] dispatch by file-name suffix
//! - Error types

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod file_name;
pub mod options;
pub mod state;

pub use error::{CaptureError, Result};
pub use file_name::{has_extension, index_file_name, keeps_transparency, ImageFileFormat};
pub use options::{CaptureOptions, DefaultNamePolicy, EmptyNamePolicy};
pub use state::{RedrawState, ScreenshotIndex};
