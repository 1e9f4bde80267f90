//! Renders a gradient "scene" and captures it a few ways.
//!
//! Uses a headless GPU device when one is available and host buffers
//! otherwise. Run with `RUST_LOG=info` to see where files land.

use scopeshot::*;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

/// A disc of gradient color on an empty background.
struct Gradient {
    pixels: Vec<u8>,
}

impl Gradient {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn new() -> Self {
        let (cx, cy) = (WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);
        let radius = cy * 0.8;
        let mut pixels = Vec::with_capacity((WIDTH * HEIGHT * 4) as usize);
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let (dx, dy) = (x as f32 - cx, y as f32 - cy);
                if dx.hypot(dy) < radius {
                    let r = (x * 255 / WIDTH) as u8;
                    let g = (y * 255 / HEIGHT) as u8;
                    pixels.extend_from_slice(&[r, g, 160, 255]);
                } else {
                    pixels.extend_from_slice(&[0, 0, 0, 0]);
                }
            }
        }
        Self { pixels }
    }
}

impl<B: DisplayBuffer> FrameDraw<B> for Gradient {
    fn draw(&mut self, engine: &mut RenderEngine<B>, _swap_buffers: bool) -> RenderResult<()> {
        engine.clear_target();
        engine.composite_layer(&Layer::new(WIDTH, HEIGHT, &self.pixels))
    }
}

fn capture<B: DisplayBuffer>(mut viewer: Viewer<B>) -> Result<()> {
    viewer.engine.background_color = Vec4::new(0.1, 0.1, 0.15, 1.0);
    viewer.options.default_name_policy = DefaultNamePolicy::Index;

    viewer.screenshot_to_file("capture_demo_transparent.png", true)?;
    viewer.screenshot_to_file("capture_demo.jpg", false)?;

    // screenshot_000000.png, screenshot_000001.png
    for _ in 0..2 {
        if let Some(path) = viewer.screenshot(false)? {
            println!("wrote {}", path.display());
        }
    }

    let pixels = viewer.screenshot_to_buffer(false)?;
    println!("in-memory capture: {} bytes", pixels.len());
    Ok(())
}

fn main() -> Result<()> {
    init_logging();

    match Viewer::new_headless(WIDTH, HEIGHT, Box::new(Gradient::new())) {
        Ok(viewer) => capture(viewer.with_dialog(Box::new(NoSaveDialog))),
        Err(e) => {
            log::warn!("no GPU ({e}), using host buffers");
            let viewer = Viewer::new_host(WIDTH, HEIGHT, Box::new(Gradient::new()));
            capture(viewer.with_dialog(Box::new(NoSaveDialog)))
        }
    }
}
