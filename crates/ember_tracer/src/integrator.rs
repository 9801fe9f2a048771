//! Recursive path integrator and the offline render drivers.

use std::time::Instant;

use ember_math::{Interval, Ray};
use log::info;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

use crate::camera::Camera;
use crate::hittable::Scene;
use crate::material::Color;

/// Hard upper bound on the bounce budget.
///
/// The integrator recurses once per bounce, so this also bounds worst-case
/// stack depth for any accepted configuration.
pub const MAX_DEPTH_LIMIT: u32 = 256;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Independent samples accumulated per pixel.
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth.
    pub max_depth: u32,
    /// Base seed for the per-row random streams.
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
        }
    }
}

/// Error raised by an unusable render configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("samples_per_pixel must be at least 1")]
    ZeroSamples,
    #[error("max_depth must be at least 1")]
    ZeroDepth,
    #[error("max_depth {0} exceeds the limit of {}", MAX_DEPTH_LIMIT)]
    DepthTooLarge(u32),
}

impl RenderConfig {
    /// Reject configurations the renderer cannot honor, before any pixel
    /// work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::DepthTooLarge(self.max_depth));
        }
        Ok(())
    }
}

/// Seeded generator for one image row.
///
/// Every render path (serial, rayon, live workers) draws a row's samples
/// from this stream, so all of them produce identical images for the same
/// configuration. The multiplier spreads adjacent row indices across the
/// seed space.
pub fn row_rng(seed: u64, row: u32) -> StdRng {
    let spread = (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(seed ^ spread)
}

/// Sky background: vertical gradient between white and light blue.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::ONE + a * Color::new(0.5, 0.7, 1.0)
}

/// Compute the color seen along a ray.
///
/// Recursive radiance estimate: find the nearest hit, scatter at its
/// material, and attenuate whatever the scattered ray sees. Every terminal
/// branch returns a defined color - black at depth exhaustion or
/// absorption, the sky gradient on a miss. Pure function of its inputs;
/// safe to call concurrently.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    // Bounce budget exhausted: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    // The 0.001 lower bound avoids self-intersection at the ray's origin
    match scene.hit(ray, Interval::new(0.001, f32::INFINITY)) {
        Some(rec) => match rec.material.scatter(ray, &rec, rng) {
            Some((attenuation, scattered)) => {
                attenuation * ray_color(&scattered, scene, depth - 1, rng)
            }
            None => Color::ZERO,
        },
        None => sky_gradient(ray),
    }
}

/// Render a single pixel: accumulate the configured sample count and
/// return the arithmetic mean (linear, not yet gamma encoded).
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Dense row-major buffer of linear pixel colors.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

/// Render the scene single-threaded.
///
/// Deterministic: a fixed seed, scene, camera, and sample count always
/// produce the same buffer.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> Result<PixelBuffer, ConfigError> {
    config.validate()?;

    let start = Instant::now();
    let mut image = PixelBuffer::new(camera.image_width, camera.image_height);

    for y in 0..camera.image_height {
        let mut rng = row_rng(config.seed, y);
        for x in 0..camera.image_width {
            image.set(x, y, render_pixel(camera, scene, config, x, y, &mut rng));
        }
    }

    info!(
        "rendered {}x{} at {} spp in {:.2?}",
        image.width, image.height, config.samples_per_pixel, start.elapsed()
    );
    Ok(image)
}

/// Render the scene with one rayon task per row.
///
/// Rows draw from the same per-row streams as [`render`], so the output is
/// byte-identical to the single-threaded path.
pub fn render_parallel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> Result<PixelBuffer, ConfigError> {
    config.validate()?;

    let start = Instant::now();
    let width = camera.image_width;
    let height = camera.image_height;

    let rows: Vec<Vec<Color>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut rng = row_rng(config.seed, y);
            (0..width)
                .map(|x| render_pixel(camera, scene, config, x, y, &mut rng))
                .collect()
        })
        .collect();

    let mut image = PixelBuffer::new(width, height);
    for (y, row) in rows.into_iter().enumerate() {
        for (x, color) in row.into_iter().enumerate() {
            image.set(x as u32, y as u32, color);
        }
    }

    info!(
        "rendered {}x{} at {} spp on {} threads in {:.2?}",
        width,
        height,
        config.samples_per_pixel,
        rayon::current_num_threads(),
        start.elapsed()
    );
    Ok(image)
}
