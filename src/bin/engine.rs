//! Loads a scene and steps it headlessly, one render tick per frame.
//!
//! ```text
//! engine --input scenes/solar_system.xml --frames 600
//! engine --hold a --frames 120          # orbit the default world
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info, warn};

use orrery::animation::{Clock, ManualClock};
use orrery::config::{EngineConfig, ParseOptions, DEFAULT_LOG_FILTER, LOG_ENV};
use orrery::gfx::camera::CameraManager;
use orrery::gfx::scene::{DrawStats, StagingBuffers};
use orrery::parse::parse_world;
use orrery::performance::PerformanceMonitor;

#[derive(Parser, Debug)]
#[command(name = "engine", version, about = "Step an orrery scene without a window")]
struct Args {
    /// Scene file; the built-in world is used when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Milliseconds of scene time per frame
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Keys held down for the whole run
    #[arg(long, default_value = "")]
    hold: String,

    /// Read missing numeric attributes as zero
    #[arg(long)]
    lenient: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, DEFAULT_LOG_FILTER)).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = EngineConfig::default();
    if args.lenient {
        config.parse = ParseOptions::lenient();
    }
    let tick_ms = args.tick_ms.unwrap_or(config.render_tick_ms);

    let mut world = match &args.input {
        Some(path) => parse_world(path, &config.parse).with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            info!("No scene given, using the built-in world");
            orrery::default_world().context("failed to build the built-in world")?
        }
    };

    let mut staging = StagingBuffers::new();
    world
        .upload_buffers(&mut staging)
        .context("failed to upload vertex buffers")?;
    info!("{} vertex buffers, {} bytes staged", staging.len(), staging.used_bytes());

    let mut camera = CameraManager::from_config(world.camera, &config);
    for key in args.hold.chars() {
        camera.key_down(key);
    }

    let clock = ManualClock::new(0);
    let mut monitor = PerformanceMonitor::new();

    for frame in 0..args.frames {
        monitor.begin_frame();

        let time = clock.frame_time();
        camera.update();
        let mut stats = DrawStats::new(camera.get_view_proj_matrix(config.aspect_ratio()));
        world.traverse(time, &mut stats);

        if stats.unbound > 0 {
            warn!("Frame {}: {} models have no vertex buffer", frame, stats.unbound);
        }
        monitor.record_draws(stats.draw_calls, stats.vertices);
        monitor.end_frame();

        if frame % 60 == 0 {
            debug!(
                "Frame {} at {}ms: {} draws ({} in front), {} paths, camera at {:?}, view {:?}",
                frame,
                time.elapsed_ms,
                stats.draw_calls,
                stats.in_front,
                stats.paths,
                camera.camera.pos,
                camera.view
            );
        }
        clock.advance(tick_ms);
    }

    let metrics = monitor.get_metrics();
    info!(
        "Ran {} frames covering {:?} of scene time: {}",
        metrics.total_frames,
        Duration::from_millis(clock.elapsed_ms()),
        metrics
    );
    Ok(())
}
