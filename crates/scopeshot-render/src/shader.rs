//! Shader module construction from registered stages.

use crate::error::{RenderError, RenderResult};
use crate::shaders::{ShaderStageSpecification, ShaderStageType};

/// Builder combining a vertex and a fragment stage into one WGSL module.
#[derive(Default)]
pub struct ShaderBuilder {
    vertex: Option<&'static ShaderStageSpecification>,
    fragment: Option<&'static ShaderStageSpecification>,
    label: Option<String>,
}

impl ShaderBuilder {
    /// Creates a new shader builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the vertex stage.
    #[must_use]
    pub fn with_vertex(mut self, stage: &'static ShaderStageSpecification) -> Self {
        self.vertex = Some(stage);
        self
    }

    /// Sets the fragment stage.
    #[must_use]
    pub fn with_fragment(mut self, stage: &'static ShaderStageSpecification) -> Self {
        self.fragment = Some(stage);
        self
    }

    /// Sets the shader label for debugging.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Vertex entry point of the combined module.
    #[must_use]
    pub fn vertex_entry(&self) -> Option<&'static str> {
        self.vertex.map(ShaderStageSpecification::entry_point)
    }

    /// Fragment entry point of the combined module.
    #[must_use]
    pub fn fragment_entry(&self) -> Option<&'static str> {
        self.fragment.map(ShaderStageSpecification::entry_point)
    }

    /// Builds the shader module (does not create pipeline).
    pub fn build_module(&self, device: &wgpu::Device) -> RenderResult<wgpu::ShaderModule> {
        let source = self.combined_source()?;

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: self.label.as_deref(),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        Ok(module)
    }

    /// Concatenates the vertex and fragment sources after checking stage kinds.
    pub fn combined_source(&self) -> RenderResult<String> {
        let vertex = self
            .vertex
            .ok_or_else(|| RenderError::ShaderCompilationFailed("missing vertex shader".into()))?;
        let fragment = self.fragment.ok_or_else(|| {
            RenderError::ShaderCompilationFailed("missing fragment shader".into())
        })?;

        if vertex.stage != ShaderStageType::Vertex {
            return Err(RenderError::ShaderCompilationFailed(format!(
                "{} is not a vertex stage",
                vertex.name
            )));
        }
        if fragment.stage != ShaderStageType::Fragment {
            return Err(RenderError::ShaderCompilationFailed(format!(
                "{} is not a fragment stage",
                fragment.name
            )));
        }

        Ok(format!("{}\n\n{}", vertex.source, fragment.source))
    }
}
