//! Plain-text statistics report printed after a render.

use std::fmt;
use std::time::Duration;

use lumen_renderer::RenderStats;

/// Render statistics formatted as a three-section table.
pub struct StatsReport<'a> {
    pub stats: &'a RenderStats,
    pub elapsed: Duration,
    pub samples_per_pixel: u32,
}

impl<'a> StatsReport<'a> {
    pub fn new(stats: &'a RenderStats, elapsed: Duration, samples_per_pixel: u32) -> Self {
        Self {
            stats,
            elapsed,
            samples_per_pixel,
        }
    }

    fn rays_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.stats.rays as f64 / seconds
        } else {
            0.0
        }
    }
}

fn percent(value: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        value as f64 / total as f64 * 100.0
    }
}

fn total(f: &mut fmt::Formatter<'_>, label: &str, value: u64) -> fmt::Result {
    writeln!(f, "  {:<40}{:>16}", label, value)
}

fn total_percent(f: &mut fmt::Formatter<'_>, label: &str, value: u64, of: u64) -> fmt::Result {
    writeln!(f, "  {:<40}{:>16}    {:>4.1}%", label, value, percent(value, of))
}

fn factor(f: &mut fmt::Formatter<'_>, label: &str, value: f64) -> fmt::Result {
    writeln!(f, "  {:<40}{:>16.2}", label, value)
}

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let seconds = self.elapsed.as_secs();
        let bounce_rays = s.bounce_rays();

        writeln!(f, "Statistics")?;
        writeln!(f, "==========")?;

        writeln!(f, "GENERAL")?;
        writeln!(f, "  {:<40}{:>13}:{:02}", "Total time", seconds / 60, seconds % 60)?;
        total(f, "Total rays", s.rays)?;
        factor(f, "Rays per second", self.rays_per_second())?;

        writeln!(f, "PRIMARY RAYS")?;
        total(f, "Total primary rays", s.primary_rays)?;
        total_percent(f, "Primary ray hits", s.primary_hits, s.primary_rays)?;
        total_percent(f, "Primary rays to light source", s.primary_emissive, s.primary_rays)?;

        writeln!(f, "BOUNCE RAYS")?;
        total(f, "Total bounce rays", bounce_rays)?;
        total_percent(f, "Bounce ray hits", s.bounce_hits(), bounce_rays)?;
        total_percent(f, "Bounce rays to light source", s.bounce_emissive, bounce_rays)?;
        total_percent(f, "Bounce rays with max depth", s.bounce_max_depth, bounce_rays)?;
        factor(f, "Avg bounce ray depth", s.average_bounce_depth(self.samples_per_pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> RenderStats {
        RenderStats {
            rays: 1000,
            ray_hits: 800,
            primary_rays: 100,
            primary_hits: 90,
            primary_emissive: 10,
            bounce_emissive: 300,
            bounce_max_depth: 9,
        }
    }

    #[test]
    fn test_report_layout() {
        let stats = sample_stats();
        let report = StatsReport::new(&stats, Duration::from_secs(125), 3).to_string();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Statistics");
        assert_eq!(lines[2], "GENERAL");
        assert_eq!(lines[3], format!("  {:<40}{:>13}:05", "Total time", 2));
        assert_eq!(lines[4], format!("  {:<40}{:>16}", "Total rays", 1000));
        assert_eq!(lines[5], format!("  {:<40}{:>16}", "Rays per second", "8.00"));
        assert_eq!(lines[6], "PRIMARY RAYS");
        assert_eq!(lines[8], format!("  {:<40}{:>16}    90.0%", "Primary ray hits", 90));
        assert_eq!(lines[10], "BOUNCE RAYS");
        assert_eq!(lines[11], format!("  {:<40}{:>16}", "Total bounce rays", 900));
        // 710 of 900 bounce rays hit something
        assert_eq!(lines[12], format!("  {:<40}{:>16}    78.9%", "Bounce ray hits", 710));
        assert_eq!(lines[14], format!("  {:<40}{:>16}     1.0%", "Bounce rays with max depth", 9));
        // 900 bounce rays over 80 diffuse primaries x 3 samples
        assert_eq!(lines[15], format!("  {:<40}{:>16}", "Avg bounce ray depth", "3.75"));
        assert_eq!(lines.len(), 16);
    }

    #[test]
    fn test_empty_stats_print_zero_percent() {
        let stats = RenderStats::new();
        let report = StatsReport::new(&stats, Duration::ZERO, 32).to_string();

        assert!(report.contains(&format!("  {:<40}{:>16}     0.0%", "Primary ray hits", 0)));
        assert!(report.contains(&format!("  {:<40}{:>16}", "Rays per second", "0.00")));
        assert!(!report.contains("NaN"));
    }
}
