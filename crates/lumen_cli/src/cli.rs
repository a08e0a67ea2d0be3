use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render the built-in Cornell box with a Monte Carlo path tracer")]
pub struct Args {
    /// Bounce paths averaged per pixel
    #[arg(
        value_name = "SAMPLES",
        default_value_t = 32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub samples: u32,

    /// Image width in pixels
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Maximum rays per bounce path
    #[arg(long, default_value_t = 16)]
    pub max_depth: u32,

    /// Seed for reproducible renders (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file (.ppm, or any format the image crate can write, e.g. .png).
    /// Defaults to out/render_<unix-time>_<samples>.ppm
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the statistics report
    #[arg(long)]
    pub no_stats: bool,

    /// Logging level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}
