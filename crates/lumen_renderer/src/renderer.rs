//! Core path tracing kernel.
//!
//! Implements Monte Carlo path tracing with:
//! - Diffuse bounces until a light is hit, the ray escapes or the depth
//!   limit is reached
//! - Radiance built multiplicatively along the path
//! - Per-pixel averaging over independent bounce paths

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use lumen_core::Scene;
use lumen_math::{Color, Ray, Vec3};
use rand::RngCore;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::error::{RenderError, RenderResult};
use crate::intersect::{find_nearest_hit, Hit};
use crate::sampling::sample_diffuse_direction;
use crate::stats::RenderStats;
use crate::PinholeCamera;

/// Distance a new bounce origin is pushed off the surface along its normal,
/// so the next ray doesn't immediately hit the triangle it left.
pub const SURFACE_EPSILON: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Bounce paths averaged per pixel
    pub samples_per_pixel: u32,
    /// Maximum rays per bounce path
    pub max_depth: u32,
    /// Radiance of everything outside the scene
    pub background: Color,
    /// Seed for the per-pixel random streams; drawn from entropy if unset
    pub seed: Option<u64>,
    /// Edge length of the square tiles handed to worker threads
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 32,
            max_depth: 16,
            background: Color::WHITE,
            seed: None,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Reject settings that would make a render meaningless.
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        if self.bucket_size == 0 {
            return Err(RenderError::ZeroBucketSize);
        }
        Ok(())
    }
}

/// Cast a ray and count it.
#[inline]
fn cast(scene: &Scene, ray: &Ray, stats: &mut RenderStats) -> Option<Hit> {
    let hit = find_nearest_hit(scene, ray);
    stats.record_ray(hit.is_some());
    hit
}

/// Origin for a ray leaving `hit`, lifted off the surface.
#[inline]
fn offset_origin(hit: &Hit) -> Vec3 {
    hit.position() + *hit.normal * SURFACE_EPSILON
}

/// Follow one bounce path and return the radiance it carries back.
///
/// Casts at most `max_depth` rays. The path ends when it
/// - escapes the scene: `background * throughput`
/// - hits a light: `throughput * emission`, where the throughput already
///   includes the light's own diffuse tint
/// - runs out of depth: black
///
/// With `max_depth == 0` nothing is cast and black is returned.
pub fn trace_bounce(
    scene: &Scene,
    ray: Ray,
    max_depth: u32,
    background: Color,
    rng: &mut dyn RngCore,
    stats: &mut RenderStats,
) -> Color {
    let mut throughput = Color::WHITE;
    let mut ray = ray;

    for _ in 0..max_depth {
        let Some(hit) = cast(scene, &ray, stats) else {
            return background * throughput;
        };

        let material = scene.material_of(hit.triangle);
        throughput *= material.diffuse;

        if material.is_emissive() {
            stats.bounce_emissive += 1;
            return throughput * material.emission;
        }

        let direction =
            sample_diffuse_direction(ray.direction, hit.normal, material.roughness, rng);
        ray = Ray::new(offset_origin(&hit), direction);
    }

    stats.bounce_max_depth += 1;
    Color::BLACK
}

/// Estimate the radiance through pixel (x, y).
///
/// Looking straight at a light returns its radiance without sampling.
/// Otherwise `samples_per_pixel` bounce paths leave the primary hit and their
/// mean, tinted by the primary surface, is returned.
pub fn sample_pixel(
    scene: &Scene,
    camera: &PinholeCamera,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    stats: &mut RenderStats,
) -> Color {
    let primary = camera.primary_ray(x, y);
    stats.primary_rays += 1;

    let Some(hit) = cast(scene, &primary, stats) else {
        return config.background;
    };
    stats.primary_hits += 1;

    let material = scene.material_of(hit.triangle);
    if material.is_emissive() {
        stats.primary_emissive += 1;
        return material.radiance();
    }

    debug_assert!(config.samples_per_pixel > 0, "validate the config before sampling");
    let samples = config.samples_per_pixel.max(1);
    let origin = offset_origin(&hit);
    let mut pixel_color = Color::BLACK;

    for _ in 0..samples {
        let direction =
            sample_diffuse_direction(primary.direction, hit.normal, material.roughness, rng);
        let bounce = trace_bounce(
            scene,
            Ray::new(origin, direction),
            config.max_depth,
            config.background,
            rng,
            stats,
        );
        pixel_color += material.diffuse * bounce;
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Linear radiance for every pixel of an image.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (row, chunk) in result.pixels.chunks(bucket.width as usize).enumerate() {
            let start = self.offset(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + chunk.len()].copy_from_slice(chunk);
        }
    }

    /// Clamp and quantize to 8-bit RGB, row-major from the top-left.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_rgb8());
        }
        bytes
    }
}

/// A finished render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: ImageBuffer,
    pub stats: RenderStats,
    pub elapsed: Duration,
    /// Seed the random streams were derived from
    pub seed: u64,
}

/// Logs progress roughly every tenth of the image.
struct Progress {
    total: u64,
    step: u64,
    done: AtomicU64,
    start: Instant,
}

impl Progress {
    fn new(total: u64, start: Instant) -> Self {
        Self {
            total,
            step: (total / 10).max(1),
            done: AtomicU64::new(0),
            start,
        }
    }

    fn advance(&self, pixels: u64) {
        let before = self.done.fetch_add(pixels, Ordering::Relaxed);
        let after = before + pixels;
        if before / self.step == after / self.step || after >= self.total {
            return;
        }

        let fraction = after as f64 / self.total as f64;
        let elapsed = self.start.elapsed().as_secs();
        let estimate = (elapsed as f64 / fraction) as u64;
        log::info!(
            "Finished {:4.1}%, {:02}:{:02} / ~{:02}:{:02}",
            fraction * 100.0,
            elapsed / 60,
            elapsed % 60,
            estimate / 60,
            estimate % 60
        );
    }
}

/// Render the entire scene, buckets in parallel.
///
/// Each pixel draws from its own random stream derived from the seed and its
/// coordinates, so the image depends only on the seed, not on scheduling.
pub fn render(
    scene: &Scene,
    camera: &PinholeCamera,
    config: &RenderConfig,
) -> RenderResult<RenderOutput> {
    config.validate()?;
    if scene.is_empty() {
        return Err(RenderError::EmptyScene);
    }
    let (width, height) = (camera.image_width, camera.image_height);
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, seed {} ({} buckets on {} threads)",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        seed,
        buckets.len(),
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let progress = Progress::new(width as u64 * height as u64, start);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, scene, camera, config, seed);
            progress.advance(bucket.pixel_count() as u64);
            result
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }
    let stats: RenderStats = results.iter().map(|result| result.stats).sum();

    let elapsed = start.elapsed();
    log::info!("Rendered in {:?}", elapsed);

    Ok(RenderOutput {
        image,
        stats,
        elapsed,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::scenes::cornell_box;
    use lumen_core::{quad, Material, Triangle};
    use lumen_math::UnitVec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn camera() -> PinholeCamera {
        PinholeCamera::new().with_resolution(16, 16)
    }

    /// A grey wall at z = 1 facing the camera, lit by a white panel in the
    /// z = 0 plane off to the left. The centre pixel sees the wall; some of
    /// its bounce rays reach the panel, the rest escape into the background.
    fn wall_and_light() -> Scene {
        let mut scene = Scene::new("wall_and_light");
        let grey = scene.add_material(Material::diffuse(Color::new(0.5, 0.5, 0.5))).unwrap();
        let light = scene.add_material(Material::emissive(Color::WHITE, 1.0)).unwrap();

        scene
            .add_triangles(
                quad(
                    Vec3::new(-2.0, -3.0, 1.0),
                    Vec3::new(-2.0, 2.0, 1.0),
                    Vec3::new(2.0, 2.0, 1.0),
                    Vec3::new(2.0, -3.0, 1.0),
                ),
                grey,
            )
            .unwrap();
        scene
            .add_triangles(
                quad(
                    Vec3::new(-3.0, -3.0, 0.0),
                    Vec3::new(-3.0, 3.0, 0.0),
                    Vec3::new(-0.25, 3.0, 0.0),
                    Vec3::new(-0.25, -3.0, 0.0),
                ),
                light,
            )
            .unwrap();
        scene
    }

    fn empty_scene() -> Scene {
        let mut scene = Scene::new("empty");
        scene.add_material(Material::default()).unwrap();
        scene
    }

    #[test]
    fn test_zero_depth_returns_black_without_casting() {
        let scene = cornell_box().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = RenderStats::new();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.5), UnitVec3::new(Vec3::Z).unwrap());

        let color = trace_bounce(&scene, ray, 0, Color::WHITE, &mut rng, &mut stats);

        assert_eq!(color, Color::BLACK);
        assert_eq!(stats.rays, 0);
        assert_eq!(stats.bounce_max_depth, 1);
    }

    #[test]
    fn test_escaping_ray_returns_background() {
        let scene = cornell_box().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = RenderStats::new();
        // Out through the open front of the box.
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.5), UnitVec3::new(Vec3::NEG_Z).unwrap());
        let background = Color::new(0.2, 0.4, 0.6);

        let color = trace_bounce(&scene, ray, 16, background, &mut rng, &mut stats);

        assert_eq!(color, background);
        assert_eq!(stats.rays, 1);
        assert_eq!(stats.ray_hits, 0);
    }

    #[test]
    fn test_direct_light_hit_returns_tinted_emission() {
        let scene = cornell_box().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = RenderStats::new();
        // Straight up into the warm ceiling panel, away from its diagonal.
        let ray = Ray::new(Vec3::new(0.02, 0.0, 0.45), UnitVec3::new(Vec3::Y).unwrap());

        let color = trace_bounce(&scene, ray, 16, Color::WHITE, &mut rng, &mut stats);

        let expected = Color::new(1.0, 0.05, 0.01) * 2.0;
        assert!((color.r - expected.r).abs() < 1e-6);
        assert!((color.g - expected.g).abs() < 1e-6);
        assert!((color.b - expected.b).abs() < 1e-6);
        assert_eq!(stats.bounce_emissive, 1);
    }

    #[test]
    fn test_trace_bounce_never_negative() {
        let scene = cornell_box().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut stats = RenderStats::new();

        for _ in 0..2_000 {
            let origin = Vec3::new(
                rng.gen_range(-0.45..0.45),
                rng.gen_range(-0.45..0.45),
                rng.gen_range(0.05..0.95),
            );
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let Some(direction) = UnitVec3::new(direction) else {
                continue;
            };

            let ray = Ray::new(origin, direction);
            let color = trace_bounce(&scene, ray, 16, Color::WHITE, &mut rng, &mut stats);

            assert!(color.is_finite(), "{color:?}");
            assert!(color.min_channel() >= 0.0, "{color:?}");
        }
        assert!(stats.bounce_emissive > 0);
    }

    #[test]
    fn test_trace_bounce_respects_depth() {
        let scene = cornell_box().unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        for depth in [1, 2, 5] {
            for _ in 0..200 {
                let mut stats = RenderStats::new();
                let direction = UnitVec3::new(Vec3::new(0.3, -1.0, 0.2)).unwrap();
                let ray = Ray::new(Vec3::new(0.0, -0.2, 0.5), direction);
                trace_bounce(&scene, ray, depth, Color::WHITE, &mut rng, &mut stats);
                assert!(stats.rays <= depth as u64);
            }
        }
    }

    #[test]
    fn test_emissive_primary_hit_returns_radiance() {
        let mut scene = Scene::new("light");
        let light = scene
            .add_material(Material::emissive(Color::new(0.9, 0.6, 0.3), 3.0))
            .unwrap();
        scene
            .add_triangle(
                Triangle::new(
                    Vec3::new(-1.0, -1.0, 1.0),
                    Vec3::new(1.0, -1.0, 1.0),
                    Vec3::new(0.0, 1.0, 1.0),
                ),
                light,
            )
            .unwrap();

        let camera = camera();
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = RenderStats::new();

        let color = sample_pixel(&scene, &camera, 8, 8, &config, &mut rng, &mut stats);

        assert_eq!(color, Color::new(0.9, 0.6, 0.3) * 3.0);
        // One primary ray, no bounce sampling.
        assert_eq!(stats.rays, 1);
        assert_eq!(stats.primary_emissive, 1);
    }

    #[test]
    fn test_empty_scene_is_background_everywhere() {
        let scene = empty_scene();
        let camera = camera();
        let config = RenderConfig {
            background: Color::new(0.3, 0.2, 0.1),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = RenderStats::new();

        for y in 0..camera.image_height {
            for x in 0..camera.image_width {
                let color = sample_pixel(&scene, &camera, x, y, &config, &mut rng, &mut stats);
                assert_eq!(color, config.background);
            }
        }
        assert_eq!(stats.primary_hits, 0);
    }

    #[test]
    fn test_variance_falls_with_more_samples() {
        let scene = wall_and_light();
        let camera = camera();
        let seeds = 64;

        let variance = |spp: u32| {
            let config = RenderConfig {
                samples_per_pixel: spp,
                background: Color::BLACK,
                ..Default::default()
            };
            let values: Vec<f64> = (0..seeds)
                .map(|seed| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut stats = RenderStats::new();
                    let color =
                        sample_pixel(&scene, &camera, 8, 8, &config, &mut rng, &mut stats);
                    // Grey wall under a white light: all channels are equal.
                    color.r as f64
                })
                .collect();
            let mean = values.iter().sum::<f64>() / seeds as f64;
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (seeds - 1) as f64
        };

        let (v1, v16, v256) = (variance(1), variance(16), variance(256));
        assert!(v1 > 0.0);
        assert!(v1 > v16, "{v1} <= {v16}");
        assert!(v16 > v256, "{v16} <= {v256}");
    }

    #[test]
    fn test_diffuse_pixel_is_bounded_by_light() {
        let scene = wall_and_light();
        let config = RenderConfig {
            samples_per_pixel: 64,
            background: Color::BLACK,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let mut stats = RenderStats::new();

        let color = sample_pixel(&scene, &camera(), 8, 8, &config, &mut rng, &mut stats);

        // Every path is either 0.5 * 1.0 (light) or 0 (escaped).
        assert!(color.r > 0.0 && color.r < 0.5);
        assert_eq!(color.r, color.g);
        assert_eq!(color.g, color.b);
        assert_eq!(stats.primary_hits, 1);
    }

    #[test]
    fn test_image_buffer_layout() {
        let mut image = ImageBuffer::new(3, 2);
        image.pixels[2] = Color::WHITE;
        image.pixels[3] = Color::new(1.0, 0.0, 0.0);

        let bytes = image.to_rgb8();

        assert_eq!(bytes.len(), 3 * 2 * 3);
        assert_eq!(&bytes[6..9], &[255, 255, 255]);
        assert_eq!(&bytes[9..12], &[255, 0, 0]);
    }

    #[test]
    fn test_render_rejects_bad_input() {
        let scene = cornell_box().unwrap();
        let zero_spp = RenderConfig {
            samples_per_pixel: 0,
            ..Default::default()
        };

        assert!(matches!(render(&scene, &camera(), &zero_spp), Err(RenderError::ZeroSamples)));
        assert!(matches!(
            render(&empty_scene(), &camera(), &RenderConfig::default()),
            Err(RenderError::EmptyScene)
        ));
        assert!(matches!(
            render(&scene, &camera().with_resolution(0, 4), &RenderConfig::default()),
            Err(RenderError::EmptyImage { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_render_is_reproducible() {
        let scene = cornell_box().unwrap();
        let camera = PinholeCamera::new().with_resolution(24, 20);
        let config = RenderConfig {
            samples_per_pixel: 4,
            seed: Some(1234),
            bucket_size: 8,
            ..Default::default()
        };
        let rebucketed = RenderConfig {
            bucket_size: 5,
            ..config.clone()
        };

        let a = render(&scene, &camera, &config).unwrap();
        let b = render(&scene, &camera, &rebucketed).unwrap();

        assert_eq!(a.seed, 1234);
        assert_eq!(a.image.pixels, b.image.pixels);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.stats.primary_rays, 24 * 20);
    }
}
