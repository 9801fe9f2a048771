//! Ember's CPU path tracing core.
//!
//! A Monte Carlo path tracer over a flat list of primitives:
//! - Recursive radiance estimation with a hard bounce budget
//! - Diffuse, reflective, and refractive materials
//! - Thin-lens camera with anti-aliasing jitter and defocus blur
//! - Deterministic per-row sampling, serial or rayon-parallel
//! - Gamma-mapped 8-bit quantization and PPM/PNG output

mod camera;
mod color;
mod hittable;
mod integrator;
mod material;
mod output;
mod sampling;
mod sphere;

pub use camera::Camera;
pub use color::{color_to_pixel, linear_to_gamma, pack_rgba, pixel_to_color, Pixel};
pub use hittable::{HitRecord, Primitive, Scene, SceneError};
pub use integrator::{
    ray_color, render, render_parallel, render_pixel, row_rng, sky_gradient, ConfigError,
    PixelBuffer, RenderConfig, MAX_DEPTH_LIMIT,
};
pub use material::{Color, Material};
pub use output::{save_png, save_ppm, write_ppm};
pub use sampling::{gen_f32, gen_range, random_in_unit_disk, random_unit_vector};
pub use sphere::Sphere;

/// Re-export the math types the public API is expressed in.
pub use ember_math::{Interval, Ray, Vec3};
