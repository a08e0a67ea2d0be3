use crate::{UnitVec3, Vec3};

/// A ray in 3D space with an origin and a unit-length direction.
///
/// Rays are never mutated while tracing; every bounce builds a new one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: UnitVec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: UnitVec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction. Since the direction is unit length,
    /// `t` is a world-space distance.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + *self.direction * t
    }
}
