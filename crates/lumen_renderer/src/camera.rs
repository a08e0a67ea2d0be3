//! Fixed pinhole camera for primary ray generation.

use lumen_math::{Axis, Ray, UnitVec3, Vec3};

/// Pinhole camera looking down +Z.
///
/// Pixel coordinates are mapped to `[-1, 1]` on both axes (y up) on an image
/// plane `focal_length` in front of the eye. There is no jitter, so every
/// sample of a pixel shares the same primary ray.
#[derive(Debug, Clone)]
pub struct PinholeCamera {
    pub image_width: u32,
    pub image_height: u32,
    origin: Vec3,
    focal_length: f32,
}

impl PinholeCamera {
    /// Create a camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 512,
            image_height: 512,
            origin: Vec3::new(0.0, 0.0, -0.5),
            focal_length: 1.0,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Point on the image plane for pixel (x, y), relative to the eye.
    fn image_plane_point(&self, x: u32, y: u32) -> Vec3 {
        Vec3::new(
            -1.0 + x as f32 / self.image_width as f32 * 2.0,
            1.0 - y as f32 / self.image_height as f32 * 2.0,
            self.focal_length,
        )
    }

    /// Generate the primary ray for pixel (x, y).
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let direction = UnitVec3::new(self.image_plane_point(x, y))
            .unwrap_or(Axis::Forward.unit());
        Ray::new(self.origin, direction)
    }
}

impl Default for PinholeCamera {
    fn default() -> Self {
        Self::new()
    }
}
