//! Fullscreen texture-draw pipelines used to composite layers on the GPU.

use crate::display_buffer::CompositeMode;
use crate::error::RenderResult;
use crate::shader::ShaderBuilder;
use crate::shaders::{
    ShaderStageSpecification, COMPOSITE_PEEL, PLAIN_TEXTURE_DRAW_FRAG_SHADER,
    TEXTURE_DRAW_VERT_SHADER,
};

/// Blend state for front-to-back peel compositing of premultiplied layers.
const UNDER_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::OneMinusDstAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::OneMinusDstAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Fragment stage drawing a layer in the given mode.
fn fragment_stage(mode: CompositeMode) -> &'static ShaderStageSpecification {
    match mode {
        CompositeMode::Over | CompositeMode::Replace => &PLAIN_TEXTURE_DRAW_FRAG_SHADER,
        // premultiplies before the under blend
        CompositeMode::Under => &COMPOSITE_PEEL,
    }
}

fn blend_state(mode: CompositeMode) -> wgpu::BlendState {
    match mode {
        CompositeMode::Over => wgpu::BlendState::ALPHA_BLENDING,
        CompositeMode::Replace => wgpu::BlendState::REPLACE,
        CompositeMode::Under => UNDER_BLENDING,
    }
}

/// Texture-draw render resources, one pipeline per [`CompositeMode`].
pub struct TextureDrawPass {
    bind_group_layout: wgpu::BindGroupLayout,
    over_pipeline: wgpu::RenderPipeline,
    replace_pipeline: wgpu::RenderPipeline,
    under_pipeline: wgpu::RenderPipeline,
}

impl TextureDrawPass {
    /// Creates the pipelines for the given target format.
    pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat) -> RenderResult<Self> {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Draw Bind Group Layout"),
            entries: &[
                // Source layer, read with textureLoad
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Texture Draw Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let create = |label: &str, mode: CompositeMode| -> RenderResult<wgpu::RenderPipeline> {
            let fragment = fragment_stage(mode);
            let module = ShaderBuilder::new()
                .with_vertex(&TEXTURE_DRAW_VERT_SHADER)
                .with_fragment(fragment)
                .with_label(label)
                .build_module(device)?;

            Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: Some(TEXTURE_DRAW_VERT_SHADER.entry_point()),
                    buffers: &[],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: Some(fragment.entry_point()),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: output_format,
                        blend: Some(blend_state(mode)),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            }))
        };

        let over_pipeline = create("Texture Draw Pipeline (over)", CompositeMode::Over)?;
        let replace_pipeline = create("Texture Draw Pipeline (replace)", CompositeMode::Replace)?;
        let under_pipeline = create("Composite Peel Pipeline", CompositeMode::Under)?;

        Ok(Self {
            bind_group_layout,
            over_pipeline,
            replace_pipeline,
            under_pipeline,
        })
    }

    fn pipeline(&self, mode: CompositeMode) -> &wgpu::RenderPipeline {
        match mode {
            CompositeMode::Over => &self.over_pipeline,
            CompositeMode::Replace => &self.replace_pipeline,
            CompositeMode::Under => &self.under_pipeline,
        }
    }

    /// Draws `source_view` over the whole of `target_view`, keeping its contents.
    pub fn draw(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        source_view: &wgpu::TextureView,
        target_view: &wgpu::TextureView,
        mode: CompositeMode,
    ) {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Draw Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(source_view),
            }],
        });

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Texture Draw Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });

        render_pass.set_pipeline(self.pipeline(mode));
        render_pass.set_bind_group(0, &bind_group, &[]);
        render_pass.draw(0..3, 0..1); // Fullscreen triangle
    }
}
