//! Rendering backend for scopeshot.
//!
//! This crate provides:
//! - The shader stage registry (WGSL) and a builder combining stages into modules
//! - [`DisplayBuffer`] with host-memory and wgpu-backed implementations
//! - [`RenderEngine`], which owns the primary and alternate buffers and the
//!   alternate-buffer / light-copy flags
//! - Image encoding of captured buffers

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

pub mod display_buffer;
pub mod engine;
pub mod error;
pub mod gpu_context;
pub mod gpu_display_buffer;
pub mod screenshot;
pub mod shader;
pub mod shaders;
pub mod texture_draw_pass;

pub use display_buffer::{CompositeMode, DisplayBuffer, HostDisplayBuffer, Layer};
pub use engine::RenderEngine;
pub use error::{RenderError, RenderResult};
pub use gpu_context::GpuContext;
pub use gpu_display_buffer::GpuDisplayBuffer;
pub use screenshot::{force_opaque_alpha, save_image, save_to_buffer, ScreenshotError};
pub use shader::ShaderBuilder;
pub use shaders::{all_shader_stages, shader_stage, ShaderStageSpecification, ShaderStageType};
pub use texture_draw_pass::TextureDrawPass;
