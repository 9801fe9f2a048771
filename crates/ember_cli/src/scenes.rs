//! Built-in scene setups.

use ember_tracer::{gen_f32, gen_range, Color, Material, Scene, SceneError, Sphere, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The classic cover scene: a grey ground sphere, three feature spheres,
/// and a 22x22 grid of small randomized spheres. The same seed always
/// produces the same scene.
pub fn cover_scene(seed: u64) -> Result<Scene, SceneError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new();

    scene.add(
        Sphere::new(
            Vec3::new(0.0, -1000.0, 0.0),
            1000.0,
            Material::Diffuse {
                albedo: Color::splat(136.0 / 255.0),
            },
        )
        .into(),
    )?;

    scene.add(
        Sphere::new(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            Material::Refractive {
                albedo: Color::ONE,
                ior: 1.5,
            },
        )
        .into(),
    )?;
    scene.add(
        Sphere::new(
            Vec3::new(4.0, 1.0, 0.0),
            1.0,
            Material::Reflective {
                albedo: Color::new(0.7, 0.6, 0.5),
                fuzz: 0.0,
            },
        )
        .into(),
    )?;
    scene.add(
        Sphere::new(
            Vec3::new(-4.0, 1.0, 0.0),
            1.0,
            Material::Diffuse {
                albedo: Color::new(0.4, 0.2, 0.1),
            },
        )
        .into(),
    )?;

    for i in -11..11 {
        for j in -11..11 {
            let center = Vec3::new(
                i as f32 + 0.9 * gen_f32(&mut rng),
                0.2,
                j as f32 + 0.9 * gen_f32(&mut rng),
            );

            // Keep the grid clear of the large metal sphere
            if (center - Vec3::new(4.0, 0.2, 9.0)).length() <= 0.9 {
                continue;
            }

            let choose = gen_f32(&mut rng);
            let material = if choose < 0.8 {
                let albedo = Color::new(
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                );
                Material::Diffuse { albedo }
            } else if choose < 0.95 {
                let albedo = Color::new(
                    gen_range(&mut rng, 0.5, 1.0),
                    gen_range(&mut rng, 0.5, 1.0),
                    gen_range(&mut rng, 0.5, 1.0),
                );
                Material::Reflective {
                    albedo,
                    fuzz: gen_range(&mut rng, 0.0, 0.5),
                }
            } else {
                Material::Refractive {
                    albedo: Color::ONE,
                    ior: 1.5,
                }
            };

            scene.add(Sphere::new(center, 0.2, material).into())?;
        }
    }

    Ok(scene)
}
