//! Ray/triangle intersection and nearest-hit search.
//!
//! There is no acceleration structure: every ray is tested against every
//! triangle in the scene, which is fine for scenes of a few hundred triangles.

use lumen_core::{Scene, Triangle, TriangleId};
use lumen_math::{Interval, Ray, UnitVec3, Vec3};

/// Hits at or beyond this distance are ignored. Also the distance reported
/// by a miss.
pub const MAX_DISTANCE: f32 = 100.0;

/// Rays whose direction makes a cosine below this with the plane normal are
/// treated as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Where a ray meets a triangle's plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Barycentric coordinates of the hit point relative to `v2` and `v3`
    pub u: f32,
    pub v: f32,
    /// Distance along the ray, `MAX_DISTANCE` for a miss
    pub distance: f32,
    /// World-space hit point
    pub position: Vec3,
}

impl Intersection {
    /// The sentinel returned when the ray does not reach the plane.
    pub const MISS: Intersection = Intersection {
        u: -1.0,
        v: -1.0,
        distance: MAX_DISTANCE,
        position: Vec3::ZERO,
    };

    /// True if the plane hit lies within the triangle (edges included).
    #[inline]
    pub fn is_inside(&self) -> bool {
        self.u >= 0.0 && self.v >= 0.0 && self.u + self.v <= 1.0
    }
}

/// Nearest surface along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub intersection: Intersection,
    pub triangle: TriangleId,
    /// Flat face normal of the hit triangle (not flipped towards the ray)
    pub normal: UnitVec3,
}

impl Hit {
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.intersection.position
    }
}

/// Intersect a ray with the plane of a triangle.
///
/// Returns the barycentric coordinates of the plane hit without checking
/// whether they lie inside the triangle; use [`Intersection::is_inside`].
/// Rays pointing away from the plane, rays parallel to it and zero-area
/// triangles all return [`Intersection::MISS`].
pub fn intersect_triangle(triangle: &Triangle, ray: &Ray) -> Intersection {
    let (e1, e2) = triangle.edges();
    let plane_normal = e1.cross(e2);

    let facing = plane_normal.dot(*ray.direction);
    if facing.abs() <= PARALLEL_EPSILON * plane_normal.length() {
        return Intersection::MISS;
    }

    let t = -plane_normal.dot(ray.origin - triangle.v1) / facing;
    if !t.is_finite() || t < 0.0 {
        return Intersection::MISS;
    }

    let uu = e1.dot(e1);
    let uv = e1.dot(e2);
    let vv = e2.dot(e2);
    // Only depends on the triangle; zero iff the triangle has no area.
    let denom = uv * uv - uu * vv;
    if denom == 0.0 {
        return Intersection::MISS;
    }

    let position = ray.at(t);
    let w = position - triangle.v1;
    let wu = w.dot(e1);
    let wv = w.dot(e2);

    Intersection {
        u: (uv * wv - vv * wu) / denom,
        v: (uv * wu - uu * wv) / denom,
        distance: t,
        position,
    }
}

/// Find the closest triangle hit by `ray`.
///
/// Scans every triangle and keeps the inside hit with the smallest distance
/// in `(0, MAX_DISTANCE)`. When two triangles are hit at exactly the same
/// distance the one added to the scene first wins.
pub fn find_nearest_hit(scene: &Scene, ray: &Ray) -> Option<Hit> {
    let mut window = Interval::new(0.0, MAX_DISTANCE);
    let mut nearest: Option<(TriangleId, Intersection)> = None;

    for (id, triangle) in scene.triangles() {
        let candidate = intersect_triangle(triangle, ray);
        if candidate.is_inside() && window.surrounds(candidate.distance) {
            window = window.with_max(candidate.distance);
            nearest = Some((id, candidate));
        }
    }

    let (triangle, intersection) = nearest?;
    // Zero-area triangles never produce an inside hit, so this always succeeds.
    let normal = scene.triangle(triangle).face_normal()?;

    Some(Hit {
        intersection,
        triangle,
        normal,
    })
}
