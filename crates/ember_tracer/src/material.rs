//! Surface scattering model.
//!
//! Materials are a closed set, so they are modeled as a sum type rather
//! than trait objects: scattering stays exhaustively matched and scenes
//! hold plain values instead of boxed pointers.

use ember_math::{Ray, Vec3};
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_unit_vector};

/// Linear RGB color (values typically 0-1).
pub type Color = Vec3;

/// Surface material variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse surface for matte objects.
    Diffuse {
        /// Surface color/reflectance.
        albedo: Color,
    },
    /// Metallic surface with specular reflection.
    Reflective {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = very rough).
        fuzz: f32,
    },
    /// Transparent dielectric with refraction.
    Refractive {
        /// Carried for scene description; transmission does not tint.
        albedo: Color,
        /// Index of refraction (1.0 = air, 1.5 = glass).
        ior: f32,
    },
}

impl Material {
    /// Scatter an incoming ray at a hit point.
    ///
    /// Returns the attenuation color and the outgoing ray, or `None` when
    /// the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        match *self {
            Material::Diffuse { albedo } => scatter_diffuse(albedo, rec, rng),
            Material::Reflective { albedo, fuzz } => {
                scatter_reflective(albedo, fuzz, ray_in, rec, rng)
            }
            Material::Refractive { ior, .. } => scatter_refractive(ior, ray_in, rec, rng),
        }
    }
}

/// Diffuse scattering: bounce around the normal, never absorb.
fn scatter_diffuse(albedo: Color, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<(Color, Ray)> {
    let mut direction = rec.normal + random_unit_vector(rng);

    // Catch degenerate scatter direction (opposite vectors cancelling out)
    if direction.length_squared() < 1e-8 {
        direction = rec.normal;
    }

    Some((albedo, Ray::new(rec.point, direction)))
}

/// Metallic reflection, optionally fuzzed; grazing reflections that end up
/// pointing into the surface are absorbed.
fn scatter_reflective(
    albedo: Color,
    fuzz: f32,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<(Color, Ray)> {
    let reflected = reflect(ray_in.direction, rec.normal);
    let direction =
        reflected.normalize_or_zero() + fuzz.clamp(0.0, 1.0) * random_unit_vector(rng);

    if direction.dot(rec.normal) > 0.0 {
        Some((albedo, Ray::new(rec.point, direction)))
    } else {
        None
    }
}

/// Dielectric scattering: probabilistic reflect/refract with Schlick's
/// approximation driving the Fresnel branch.
fn scatter_refractive(
    ior: f32,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<(Color, Ray)> {
    // Glass doesn't attenuate light
    let attenuation = Color::ONE;

    let ratio = if rec.front_face { 1.0 / ior } else { ior };

    let unit_direction = ray_in.direction.normalize_or_zero();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    // The boundary itself must reflect: refracting at exactly the
    // critical angle would produce a tangent ray along the surface.
    let cannot_refract = ratio * sin_theta >= 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ratio) > gen_f32(rng) {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ratio)
    };

    Some((attenuation, Ray::new(rec.point, direction)))
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface using Snell's law, decomposed
/// into perpendicular and parallel components.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation of the Fresnel reflectance.
fn reflectance(cosine: f32, ratio: f32) -> f32 {
    let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_at_origin(normal: Vec3, front_face: bool, material: &Material) -> HitRecord<'_> {
        HitRecord {
            point: Vec3::ZERO,
            normal,
            t: 1.0,
            front_face,
            material,
        }
    }

    #[test]
    fn test_diffuse_never_absorbs() {
        let material = Material::Diffuse {
            albedo: Color::splat(0.5),
        };
        let rec = hit_at_origin(Vec3::Y, true, &material);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let scatter = material.scatter(&ray, &rec, &mut rng);
            assert!(scatter.is_some());
        }
    }

    #[test]
    fn test_mirror_reflection_is_deterministic() {
        // fuzz = 0 must give the analytic mirror direction regardless of
        // the random stream.
        let material = Material::Reflective {
            albedo: Color::splat(0.9),
            fuzz: 0.0,
        };
        let rec = hit_at_origin(Vec3::Y, true, &material);
        let incoming = Vec3::new(1.0, -1.0, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), incoming);

        let expected = reflect(incoming, Vec3::Y).normalize();

        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (_, scattered) = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!((scattered.direction - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_total_internal_reflection_reflects() {
        // Exiting glass at a grazing angle: ratio * sin(theta) > 1, so the
        // integrator must reflect no matter what the random draw says.
        let material = Material::Refractive {
            albedo: Color::ONE,
            ior: 1.5,
        };
        let rec = hit_at_origin(Vec3::Y, false, &material);
        let incoming = Vec3::new(0.99, -0.141, 0.0).normalize();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), incoming);

        let expected = reflect(incoming, Vec3::Y);

        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (attenuation, scattered) = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(attenuation, Color::ONE);
            assert!((scattered.direction - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_negative_fuzz_is_treated_as_mirror() {
        let material = Material::Reflective {
            albedo: Color::splat(0.9),
            fuzz: -0.5,
        };
        let rec = hit_at_origin(Vec3::Y, true, &material);
        let incoming = Vec3::new(1.0, -1.0, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), incoming);

        let expected = reflect(incoming, Vec3::Y).normalize();

        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (_, scattered) = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!((scattered.direction - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_exact_critical_angle_reflects() {
        // Exiting glass exactly at the critical angle: refraction would
        // yield a tangent ray along the surface, so the boundary itself
        // must reflect regardless of the random draw.
        let material = Material::Refractive {
            albedo: Color::ONE,
            ior: 1.5,
        };
        let rec = hit_at_origin(Vec3::Y, false, &material);

        // Unit direction landing on the boundary in f32: x = 2/3 and
        // y = -0.74535596 give length_squared == 1.0 exactly, and the
        // recomputed 1.5 * sin_theta == 1.0 exactly.
        let incoming = Vec3::new(2.0 / 3.0, -0.745_355_96, 0.0);
        let cos_theta = (-incoming).dot(Vec3::Y);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        assert_eq!(incoming.length_squared(), 1.0);
        assert_eq!(1.5 * sin_theta, 1.0);

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), incoming);
        let expected = reflect(incoming, Vec3::Y);

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (_, scattered) = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!((scattered.direction - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_refraction_bends_toward_normal_entering_glass() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let refracted = refract(uv, Vec3::Y, 1.0 / 1.5);

        // Entering a denser medium bends toward the normal: the transverse
        // component shrinks while still heading into the surface.
        assert!(refracted.y < 0.0);
        assert!(refracted.x.abs() < uv.x.abs());
        assert!((refracted.length() - 1.0).abs() < 1e-4);
    }
}
