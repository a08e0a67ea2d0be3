//! Triangle geometry.

use lumen_math::{UnitVec3, Vec3};

/// A triangle given by three vertices.
///
/// Vertex order matters: the outward normal is `(v2 - v1) × (v3 - v1)`
/// (right-hand rule). There are no per-vertex normals, shading is flat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
}

impl Triangle {
    pub const fn new(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self { v1, v2, v3 }
    }

    /// The two edges leaving `v1`: `(v2 - v1, v3 - v1)`.
    #[inline]
    pub fn edges(&self) -> (Vec3, Vec3) {
        (self.v2 - self.v1, self.v3 - self.v1)
    }

    /// Unnormalized normal, with length equal to twice the area.
    #[inline]
    pub fn plane_normal(&self) -> Vec3 {
        let (e1, e2) = self.edges();
        e1.cross(e2)
    }

    /// Unit face normal, `None` for a zero-area triangle.
    #[inline]
    pub fn face_normal(&self) -> Option<UnitVec3> {
        UnitVec3::new(self.plane_normal())
    }

    /// Surface area.
    #[inline]
    pub fn area(&self) -> f32 {
        0.5 * self.plane_normal().length()
    }

    /// True if the vertices are collinear (or coincide), so the triangle can
    /// never be hit.
    pub fn is_degenerate(&self) -> bool {
        self.area() == 0.0
    }
}

/// Split a planar quad into two triangles, `(a, b, c)` and `(c, d, a)`.
///
/// Both halves share the winding of the quad, so they face the same way.
pub fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> [Triangle; 2] {
    [Triangle::new(a, b, c), Triangle::new(c, d, a)]
}
