//! lumen renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over a flat list of triangles.
//! Pixels are rendered in parallel buckets, each pixel with its own
//! seeded random stream, and ray statistics are merged at the end.

mod bucket;
mod camera;
mod error;
mod intersect;
mod output;
mod renderer;
mod sampling;
mod stats;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::PinholeCamera;
pub use error::{RenderError, RenderResult};
pub use intersect::{find_nearest_hit, intersect_triangle, Hit, Intersection, MAX_DISTANCE};
pub use output::{save_image, write_ppm};
pub use renderer::{
    render, sample_pixel, trace_bounce, ImageBuffer, RenderConfig, RenderOutput, SURFACE_EPSILON,
};
pub use sampling::{pixel_rng, sample_diffuse_direction, TangentFrame, TANGENT_THRESHOLD};
pub use stats::RenderStats;

/// Re-export the math types used in the public API
pub use lumen_math::{Color, Ray, UnitVec3, Vec3};
