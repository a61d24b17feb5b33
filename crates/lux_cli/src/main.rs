use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod cli;
mod demo;
mod logger;

use cli::Args;
use demo::{demo_scene, demo_view};
use logger::init_logger;
use lux_core::load_scene;
use lux_renderer::{render_parallel, Camera};

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.log_level.into());

    info!("Lux {}", env!("CARGO_PKG_VERSION"));

    let config = args.render_config();

    let (scene, view) = match &args.scene {
        Some(path) => {
            let loaded = load_scene(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            (loaded.scene, loaded.view)
        }
        None => (demo_scene(), demo_view().context("Invalid demo view")?),
    };

    info!(
        "Scene '{}': {} objects, {} lights",
        scene.name,
        scene.object_count(),
        scene.light_count()
    );
    info!(
        "Image {0}x{0}, depth {1}, antialiasing {2}",
        config.image_size,
        config.max_depth,
        if config.antialiasing { "on" } else { "off" }
    );

    let camera = Camera::from_config(view, &config);

    let image = match args.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build render thread pool")?;
            pool.install(|| render_parallel(&camera, &scene, &config))
        }
        None => render_parallel(&camera, &scene, &config),
    }
    .context("Render failed")?;

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
