//! GPU display buffer integration tests.
//!
//! These need a GPU adapter (real or software fallback). Without one the
//! test prints a note and returns early.

use glam::Vec4;
use scopeshot_render::shaders::paired_vertex_stage;
use scopeshot_render::*;

const WIDTH: u32 = 70;
const HEIGHT: u32 = 5;

fn gradient_layer(alpha: u8) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((WIDTH * HEIGHT * 4) as usize);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            pixels.extend_from_slice(&[(x * 3) as u8, (y * 40) as u8, 128, alpha]);
        }
    }
    pixels
}

/// Red triangle covering the upper half of clip space (y > 0).
const UPPER_HALF_WGSL: &str = r"
@vertex
fn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> {
    var corners = array<vec2<f32>, 3>(vec2(-1.0, 0.0), vec2(3.0, 0.0), vec2(-1.0, 4.0));
    return vec4<f32>(corners[i], 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
";

/// Renders [`UPPER_HALF_WGSL`] straight into the buffer's texture view.
fn draw_upper_half(context: &GpuContext, buffer: &GpuDisplayBuffer) {
    let device = &context.device;
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("upper half"),
        source: wgpu::ShaderSource::Wgsl(UPPER_HALF_WGSL.into()),
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("upper half"),
        layout: None,
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: gpu_context::DISPLAY_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("upper half"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: buffer.view(),
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
        pass.set_pipeline(&pipeline);
        pass.draw(0..3, 0..1);
    }
    context.queue.submit(std::iter::once(encoder.finish()));
}

fn assert_close(gpu: &[u8], host: &[u8], what: &str) {
    assert_eq!(gpu.len(), host.len(), "{what}: length");
    for (i, (a, b)) in gpu.iter().zip(host).enumerate() {
        assert!(a.abs_diff(*b) <= 1, "{what}: byte {i} gpu {a} host {b}");
    }
}

/// Single test so the device is created once.
#[test]
fn headless_gpu_tests() {
    let context = match pollster::block_on(GpuContext::new_headless()) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Skipping GPU tests: no adapter available ({e})");
            return;
        }
    };

    // --- Every fragment stage compiles with its vertex stage ---
    for stage in all_shader_stages() {
        let Some(vertex) = paired_vertex_stage(stage) else {
            continue;
        };
        let builder = ShaderBuilder::new()
            .with_vertex(vertex)
            .with_fragment(stage)
            .with_label(stage.name);
        builder.build_module(&context.device).unwrap();
    }

    // --- Clear and read back ---
    let background = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let mut gpu = context.create_display_buffer(WIDTH, HEIGHT);
    let mut host = HostDisplayBuffer::new(WIDTH, HEIGHT);
    gpu.clear(background);
    host.clear(background);
    assert_close(&gpu.read_buffer().unwrap(), host.pixels(), "clear");

    // --- Each composite mode matches the host blend ---
    for mode in [
        CompositeMode::Replace,
        CompositeMode::Over,
        CompositeMode::Under,
    ] {
        let layer_pixels = gradient_layer(100);
        let layer = Layer::new(WIDTH, HEIGHT, &layer_pixels);
        gpu.clear(Vec4::new(0.2, 0.4, 0.6, 0.5));
        host.clear(Vec4::new(0.2, 0.4, 0.6, 0.5));
        gpu.composite(&layer, mode).unwrap();
        host.composite(&layer, mode).unwrap();
        assert_close(
            &gpu.read_buffer().unwrap(),
            host.pixels(),
            &format!("{mode:?}"),
        );
    }

    // --- Size mismatch is rejected ---
    let small = vec![0u8; 16];
    let err = gpu.composite(&Layer::new(2, 2, &small), CompositeMode::Over);
    assert!(matches!(err, Err(RenderError::SizeMismatch { .. })));

    // --- Resize reallocates, readback follows the new size ---
    gpu.resize(3, 2);
    gpu.clear(Vec4::ONE);
    let pixels = gpu.read_buffer().unwrap();
    assert_eq!(pixels.len(), 3 * 2 * 4);
    assert!(pixels.iter().all(|&b| b == 255));

    // --- Geometry drawn into the view reads back bottom-to-top ---
    let mut view_buffer = context.create_display_buffer(4, 4);
    view_buffer.clear(Vec4::new(0.0, 0.0, 0.0, 1.0));
    draw_upper_half(&context, &view_buffer);
    let pixels = view_buffer.read_buffer().unwrap();
    let rows: Vec<&[u8]> = pixels.chunks(4 * 4).collect();
    for (i, row) in rows.iter().enumerate() {
        let expected: [u8; 4] = if i >= 2 { [255, 0, 0, 255] } else { [0, 0, 0, 255] };
        assert!(
            row.chunks(4).all(|px| px == expected),
            "row {i} (bottom = 0): {row:?}"
        );
    }
    // Saved images put the drawn half at the top
    let png = save_to_buffer(&pixels, 4, 4).unwrap();
    let img = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(0, 3).0, [0, 0, 0, 255]);

    // --- Layers and direct draws share one orientation ---
    // Layer with only its top row (last in the buffer) opaque green
    let mut layer_pixels = vec![0u8; 4 * 4 * 4];
    for px in layer_pixels[3 * 16..].chunks_mut(4) {
        px.copy_from_slice(&[0, 255, 0, 255]);
    }
    view_buffer.clear(Vec4::new(0.0, 0.0, 0.0, 1.0));
    draw_upper_half(&context, &view_buffer);
    view_buffer
        .composite(&Layer::new(4, 4, &layer_pixels), CompositeMode::Over)
        .unwrap();
    let pixels = view_buffer.read_buffer().unwrap();
    assert_eq!(&pixels[3 * 16..3 * 16 + 4], &[0, 255, 0, 255]);
    assert_eq!(&pixels[2 * 16..2 * 16 + 4], &[255, 0, 0, 255]);
    assert_eq!(&pixels[..4], &[0, 0, 0, 255]);

    // --- Engine on GPU buffers: light copy keeps alpha ---
    let mut engine = RenderEngine::new(
        context.create_display_buffer(WIDTH, HEIGHT),
        context.create_display_buffer(WIDTH, HEIGHT),
    );
    engine.enable_alt_buffer();
    engine.enable_light_copy();
    engine.clear_target();
    let layer_pixels = gradient_layer(0);
    engine
        .composite_layer(&Layer::new(WIDTH, HEIGHT, &layer_pixels))
        .unwrap();
    let pixels = engine.read_alt_buffer().unwrap();
    assert!(pixels.chunks(4).all(|px| px[3] == 0));
}
