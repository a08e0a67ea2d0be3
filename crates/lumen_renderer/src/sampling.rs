//! Direction sampling for diffuse bounces.

use lumen_math::{Axis, UnitVec3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Below this squared length the `normal × up` tangent is considered too
/// short and `normal × forward` is used instead.
pub const TANGENT_THRESHOLD: f32 = 0.1;

/// Orthonormal basis around a surface normal.
#[derive(Debug, Clone, Copy)]
pub struct TangentFrame {
    pub normal: UnitVec3,
    pub tangent: UnitVec3,
    pub bitangent: Vec3,
}

impl TangentFrame {
    /// Build a frame from the world up axis, falling back to the forward axis
    /// when the normal is nearly vertical.
    pub fn new(normal: UnitVec3) -> Option<Self> {
        let mut base = normal.cross(Axis::Up.vector());
        if base.length_squared() < TANGENT_THRESHOLD {
            base = normal.cross(Axis::Forward.vector());
        }

        let tangent = UnitVec3::new(base)?;
        let bitangent = normal.cross(*tangent);

        Some(Self {
            normal,
            tangent,
            bitangent,
        })
    }

    /// Map local coordinates (x along tangent, y along bitangent, z along
    /// normal) to world space.
    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        *self.normal * local.z + *self.tangent * local.x + self.bitangent * local.y
    }
}

/// Pick a random direction in the hemisphere around `normal`.
///
/// A point is drawn uniformly from the box `[-1, 1) × [-1, 1) × [0, 1)` in the
/// tangent frame and projected onto the unit sphere. This is neither uniform
/// over the hemisphere nor cosine-weighted: directions bunch up towards the
/// box corners. Kept as-is because changing it changes the noise profile of
/// every render.
///
/// `incoming` and `roughness` are accepted for a future glossy model but are
/// ignored; every surface scatters as fully diffuse.
pub fn sample_diffuse_direction(
    _incoming: UnitVec3,
    normal: UnitVec3,
    _roughness: f32,
    rng: &mut dyn RngCore,
) -> UnitVec3 {
    // Any unit normal has a usable tangent on one of the two axes.
    let Some(frame) = TangentFrame::new(normal) else {
        return normal;
    };

    loop {
        let local = Vec3::new(
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>(),
        );
        // Redraw the (measure-zero) origin rather than normalizing it.
        let Some(local) = UnitVec3::new(local) else {
            continue;
        };
        if let Some(direction) = UnitVec3::new(frame.to_world(*local)) {
            return direction;
        }
    }
}

/// Random stream for one pixel.
///
/// The render seed and the pixel coordinates are mixed into a 64-bit state
/// (splitmix64 finalizer) so neighbouring pixels get unrelated streams and the
/// result does not depend on which thread renders the pixel.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let mut z = seed ^ ((u64::from(y) << 32) | u64::from(x));
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    StdRng::seed_from_u64(z ^ (z >> 31))
}
