use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod captions;
mod clock;
mod config;
mod constants;
mod engine;
mod error;
mod ffmpeg;
mod landing;
mod loader;
mod motion;
mod overlay;
mod sequencer;
mod state;
mod surface;
mod timeline;
mod timers;

use crate::clock::{Clock, FixedStepClock, WallClock};
use crate::config::Overrides;
use crate::engine::Scene;
use crate::ffmpeg::Recorder;
use crate::landing::Landing;

/// Full-screen animated landing page for the Fitness Club.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image that flies in and floats
    #[arg(long)]
    image: Option<PathBuf>,

    /// Logo shown in the top-left corner
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Page opened by the "Join" button
    #[arg(long)]
    link: Option<String>,

    /// Render offline at a fixed frame rate into this video file (needs ffmpeg)
    #[arg(long)]
    record: Option<PathBuf>,

    /// Length of the recording
    #[arg(long, default_value_t = 12.0)]
    record_seconds: f64,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("landing=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    if let Some(path) = &args.config {
        if !path.exists() {
            warn!(?path, "config file not found, using defaults");
        }
    }
    let config = config::load(args.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(Overrides {
            image: args.image.clone(),
            logo: args.logo.clone(),
            link: args.link.clone(),
        });
    info!(?config, "starting");

    let recording = args.record.is_some();
    let mut builder = raylib::init();
    builder
        .size(config.window_width, config.window_height)
        .title(&config.title)
        .vsync();
    if !recording {
        builder.resizable();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut clock: Box<dyn Clock> = if recording {
        Box::new(FixedStepClock::new(config.fps))
    } else {
        Box::new(WallClock::new())
    };
    let record_until_ms = args.record_seconds * 1000.0;
    let mut recorder: Option<Recorder> = None;

    let mut landing = Landing::new(&config, !recording);
    landing.mount(clock.now_ms());

    // --- Main Loop ---
    while !rl.window_should_close() {
        let now_ms = clock.now_ms();
        landing.render_frame(now_ms, &mut rl, &thread);

        if let Some(output) = &args.record {
            if now_ms >= record_until_ms {
                break;
            }
            if let Some(image) = landing.frame_image() {
                if recorder.is_none() {
                    recorder = Some(Recorder::new(image.width(), image.height(), config.fps, output)?);
                }
                if let Some(recorder) = recorder.as_mut() {
                    recorder.write(&image)?;
                }
            }
        }

        clock.tick();
    }

    landing.unmount(&mut rl);
    if let Some(recorder) = recorder {
        recorder.finish().context("failed to finish the recording")?;
    }
    Ok(())
}
