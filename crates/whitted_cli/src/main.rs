mod cli;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;
use whitted_tracer::Threading;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Whitted ray tracer - scene {:?}", args.scene);

    let start = Instant::now();
    let demo = scenes::build(args.scene).context("Failed to build scene")?;
    log::info!(
        "Scene '{}' built in {:?} ({} objects, {} lights)",
        demo.scene.name,
        start.elapsed(),
        demo.scene.geometries.len(),
        demo.scene.lights.len()
    );

    let threading = Threading::from_count(args.threads).context("Invalid --threads value")?;
    let vp_height = demo.vp_width * args.height as f32 / args.width.max(1) as f32;
    let camera = demo
        .camera
        .vp_size(demo.vp_width, vp_height)
        .resolution(args.width, args.height)
        .anti_aliasing(args.anti_aliasing)
        .adaptive_super_sampling(args.adaptive)
        .threading(threading)
        .debug_print(args.progress)
        .build()
        .context("Invalid camera configuration")?;

    let start = Instant::now();
    let image = camera.render(&demo.scene);
    log::info!("Rendered in {:?}", start.elapsed());

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;

    Ok(())
}
