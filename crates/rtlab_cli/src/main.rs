mod cli;
mod logger;
mod output;

use anyhow::{bail, Context, Result};
use clap::Parser;

use rtlab_core::{ColorModel, ColorSpace, Hsl, Hsv, Rgb};
use rtlab_renderer::{Camera, RenderOutcome, Renderer};

use cli::{Args, LabConfig};
use logger::init_logger;
use output::{frame_path, save_png};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
        log::info!("Using {} worker threads", threads);
    }

    let config = LabConfig::from_args(&args)?;

    match config.scene.color_space {
        ColorSpace::Rgb => run::<Rgb>(&args, &config),
        ColorSpace::Hsv => run::<Hsv>(&args, &config),
        ColorSpace::Hsl => run::<Hsl>(&args, &config),
    }
}

/// Build the scene in color model `C`, render the orbit sequence and write
/// every frame.
fn run<C: ColorModel>(args: &Args, config: &LabConfig) -> Result<()> {
    let scene = config
        .scene
        .build::<C>()
        .context("Invalid scene configuration")?;

    let renderer = Renderer::new(scene, Camera::new(), config.render.clone())
        .context("Invalid render settings")?
        .with_frame_callback(|stats| {
            log::info!(
                "Frame rendered in {:.2?}: {} tiles, {} pixels",
                stats.elapsed,
                stats.tiles,
                stats.traced + stats.skipped
            );
        });

    if args.dolly != 0.0 {
        renderer.dolly(args.dolly);
    }
    if args.elevate != 0.0 {
        renderer.elevate(args.elevate);
    }

    let frames = args.frames.max(1);
    for index in 0..frames {
        if index > 0 {
            renderer.orbit(args.orbit_step, 0.0);
        }

        if let RenderOutcome::Busy = renderer.render() {
            bail!("Renderer was busy on frame {}", index + 1);
        }

        save_png(&renderer.frame(), &frame_path(&args.output, index, frames))?;
    }

    if let Some(elapsed) = renderer.last_render_time() {
        log::debug!("Last frame took {:.2?}", elapsed);
    }

    Ok(())
}
