//! Command-line renderer.

mod scenes;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ember_live::{Dispatcher, Framebuffer};
use ember_tracer::{
    pixel_to_color, render_parallel, save_png, save_ppm, Camera, Pixel, PixelBuffer, RenderConfig,
    Scene, Vec3,
};
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "ember", about = "Stochastic path tracer", version)]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 450)]
    height: u32,

    /// Samples per pixel
    #[arg(short, long, default_value_t = 100)]
    samples: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value_t = 50)]
    max_depth: u32,

    /// Seed for scene generation and sampling
    #[arg(long, default_value_t = 3000)]
    seed: u64,

    /// Worker threads for the live renderer
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Render through the live worker pool instead of rayon
    #[arg(long)]
    live: bool,

    /// Output path; .png selects PNG, anything else plain-text PPM
    #[arg(short, long, default_value = "output.ppm")]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let mut camera = Camera::new()
        .with_resolution(args.width, args.height)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);
    camera.initialize();

    let scene = scenes::cover_scene(args.seed).context("failed to build scene")?;
    info!("scene ready: {} primitives", scene.len());

    let config = RenderConfig {
        samples_per_pixel: args.samples,
        max_depth: args.max_depth,
        seed: args.seed,
    };

    let image = if args.live {
        render_live(camera, scene, config, args.threads)?
    } else {
        render_parallel(&camera, &scene, &config).context("render failed")?
    };

    save_image(&args.output, &image)
}

/// Drive a full pass through the live worker pool and collect the result
/// as a linear pixel buffer.
fn render_live(
    camera: Camera,
    scene: Scene,
    config: RenderConfig,
    threads: usize,
) -> anyhow::Result<PixelBuffer> {
    let camera = Arc::new(camera);
    let scene = Arc::new(scene);
    let framebuffer = Arc::new(Framebuffer::new(camera.image_width, camera.image_height));

    let dispatcher = Dispatcher::spawn(
        Arc::clone(&camera),
        Arc::clone(&scene),
        config,
        Arc::clone(&framebuffer),
        threads,
    )
    .context("failed to start render workers")?;

    while !dispatcher.is_finished() {
        let (done, total) = dispatcher.progress();
        info!("progress: {done}/{total} rows");
        thread::sleep(Duration::from_millis(500));
    }
    dispatcher.join();

    // The framebuffer holds gamma-encoded words; square the decoded
    // channels back to linear so the writers' gamma pass applies cleanly.
    let snapshot = framebuffer.snapshot();
    let mut image = PixelBuffer::new(framebuffer.width(), framebuffer.height());
    for y in 0..framebuffer.height() {
        for x in 0..framebuffer.width() {
            let word = snapshot[(y * framebuffer.width() + x) as usize];
            let encoded = pixel_to_color(Pixel {
                r: (word >> 24) as u8,
                g: (word >> 16) as u8,
                b: (word >> 8) as u8,
            });
            image.set(x, y, encoded * encoded);
        }
    }
    Ok(image)
}

/// Save by extension: .png through the image crate, anything else as
/// plain-text PPM.
fn save_image(path: &Path, image: &PixelBuffer) -> anyhow::Result<()> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        save_png(path, image).with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        save_ppm(path, image).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}
