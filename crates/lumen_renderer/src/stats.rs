//! Ray statistics.
//!
//! Each unit of parallel work owns a `RenderStats` and the results are summed
//! once rendering is done, so no counter is ever shared between threads.

use std::iter::Sum;
use std::ops::AddAssign;

/// Counters collected while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// All rays cast, primary and bounce
    pub rays: u64,
    /// Rays that hit any triangle
    pub ray_hits: u64,
    pub primary_rays: u64,
    pub primary_hits: u64,
    /// Primary rays that landed directly on a light
    pub primary_emissive: u64,
    /// Bounce paths that ended on a light
    pub bounce_emissive: u64,
    /// Bounce paths cut off by the depth limit
    pub bounce_max_depth: u64,
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one cast ray.
    #[inline]
    pub(crate) fn record_ray(&mut self, hit: bool) {
        self.rays += 1;
        if hit {
            self.ray_hits += 1;
        }
    }

    pub fn bounce_rays(&self) -> u64 {
        self.rays - self.primary_rays
    }

    pub fn bounce_hits(&self) -> u64 {
        self.ray_hits - self.primary_hits
    }

    /// Average number of bounce rays per path, given the samples per pixel
    /// used for every diffuse primary hit.
    pub fn average_bounce_depth(&self, samples_per_pixel: u32) -> f64 {
        let diffuse_primaries = self.primary_hits - self.primary_emissive;
        let paths = diffuse_primaries * samples_per_pixel as u64;
        if paths == 0 {
            return 0.0;
        }
        self.bounce_rays() as f64 / paths as f64
    }

    pub fn merge(&mut self, other: &RenderStats) {
        self.rays += other.rays;
        self.ray_hits += other.ray_hits;
        self.primary_rays += other.primary_rays;
        self.primary_hits += other.primary_hits;
        self.primary_emissive += other.primary_emissive;
        self.bounce_emissive += other.bounce_emissive;
        self.bounce_max_depth += other.bounce_max_depth;
    }
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, rhs: RenderStats) {
        self.merge(&rhs);
    }
}

impl Sum for RenderStats {
    fn sum<I: Iterator<Item = RenderStats>>(iter: I) -> RenderStats {
        iter.fold(RenderStats::default(), |mut total, stats| {
            total += stats;
            total
        })
    }
}
