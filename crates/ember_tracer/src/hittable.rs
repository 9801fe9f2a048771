//! Hit records, primitive variants, and the scene's nearest-hit search.

use ember_math::{Interval, Ray, Vec3};
use thiserror::Error;

use crate::material::Material;
use crate::sphere::Sphere;

/// Record of a ray-primitive intersection.
///
/// Transient: constructed per intersection test and discarded after the
/// bounce it informs. Borrows its material from the scene.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection.
    pub point: Vec3,
    /// Surface normal, always oriented against the incoming ray.
    pub normal: Vec3,
    /// Parameter t where the intersection occurs.
    pub t: f32,
    /// Whether the ray hit the outer (front) face of the surface.
    pub front_face: bool,
    /// Material at the intersection point.
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the outward normal, flipping it to face the ray.
    ///
    /// `front_face` records which side was struck; refraction depends on it.
    pub fn new(
        ray: &Ray,
        t: f32,
        point: Vec3,
        outward_normal: Vec3,
        material: &'a Material,
    ) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            point,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Geometric primitive variants.
///
/// Sphere is the only shape for now; new shapes add a variant and an arm
/// in [`Primitive::hit`].
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
}

impl Primitive {
    /// Test the ray against this primitive within `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

/// Error raised while assembling a scene.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// The scene was built with a fixed capacity and it is full.
    #[error("scene capacity of {0} primitives exceeded")]
    CapacityExceeded(usize),
}

/// Ordered collection of primitives, immutable once the render starts.
///
/// Order affects nothing but tie-break determinism: the nearest-hit scan
/// keeps the first primitive that produced the minimum t.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    capacity: Option<usize>,
}

impl Scene {
    /// Create an empty scene with no capacity limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene that holds at most `capacity` primitives.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            primitives: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Add a primitive, failing fast at setup time when a fixed-capacity
    /// scene is full rather than mid-render.
    pub fn add(&mut self, primitive: Primitive) -> Result<(), SceneError> {
        if let Some(capacity) = self.capacity {
            if self.primitives.len() >= capacity {
                return Err(SceneError::CapacityExceeded(capacity));
            }
        }
        self.primitives.push(primitive);
        Ok(())
    }

    /// Number of primitives in the scene.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether the scene holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Nearest hit across all primitives within `ray_t`.
    ///
    /// Exhaustive scan, shrinking the interval max as closer hits are
    /// found. No early exit, no spatial acceleration.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest_so_far = ray_t.max;
        let mut hit = None;

        for primitive in &self.primitives {
            if let Some(rec) = primitive.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                hit = Some(rec);
            }
        }

        hit
    }
}
