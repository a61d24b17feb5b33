use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lux_renderer::{RenderConfig, DEFAULT_BUCKET_SIZE};

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lux")]
#[command(about = "Recursive ray tracer with soft shadows, reflection and refraction")]
#[command(version)]
pub struct Args {
    /// Output image (.ppm or .png)
    #[arg(default_value = "lux.ppm")]
    pub output: PathBuf,

    /// Image side length in pixels
    #[arg(short, long, default_value_t = 512)]
    pub size: u32,

    /// Maximum reflection/refraction depth
    #[arg(short, long, default_value_t = 3)]
    pub depth: u32,

    /// Supersample pixels and soften shadows
    #[arg(short, long)]
    pub antialias: bool,

    /// JSON scene description; the built-in demo scene is used if omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Seed for shadow sampling
    #[arg(long, default_value_t = 1522)]
    pub seed: u64,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Bucket side length in pixels
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Render settings chosen on the command line.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            image_size: self.size,
            max_depth: self.depth,
            antialiasing: self.antialias,
            seed: self.seed,
            bucket_size: self.bucket_size,
            ..Default::default()
        }
    }
}
