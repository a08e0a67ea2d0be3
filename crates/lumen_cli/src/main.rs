use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use lumen_core::scenes::cornell_box;
use lumen_renderer::{render, save_image, PinholeCamera, RenderConfig};

mod cli;
mod report;

use cli::Args;
use report::StatsReport;

/// Output path used when none is given: `out/render_<unix-time>_<spp>.ppm`.
fn default_output(samples: u32) -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    PathBuf::from("out").join(format!("render_{}_{}.ppm", now, samples))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level)
        .init();

    log::info!("Starting lumen");

    let scene = cornell_box().context("Failed to build the Cornell box scene")?;
    let camera = PinholeCamera::new().with_resolution(args.width, args.height);
    let config = RenderConfig {
        samples_per_pixel: args.samples,
        max_depth: args.max_depth,
        seed: args.seed,
        ..Default::default()
    };

    let output = render(&scene, &camera, &config).context("Render failed")?;

    let path = args.output.unwrap_or_else(|| default_output(args.samples));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    save_image(&path, &output.image)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote image to '{}'", path.display());

    if !args.no_stats {
        print!("{}", StatsReport::new(&output.stats, output.elapsed, args.samples));
    }

    Ok(())
}
