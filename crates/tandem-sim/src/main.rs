//! Tandem headless simulator.
//!
//! Runs a full session against the simulated platform, driver and game, in
//! either run mode, and logs what every frame observed.
//!
//! # Usage
//!
//! ```bash
//! # Platform-driven frames, 1600x960 physical pixels at scale 2
//! tandem-sim --frames 120 --width-px 1600 --height-px 960 --scale 2
//!
//! # Host-driven frames with graphics jobs on the host thread
//! tandem-sim --mode host-driven --log-level debug
//! ```

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tandem_app::{
    GraphicsLibrary, KeyDirection, RunError, Stage, TouchPhase, UiConfig, UserInterface,
};
use tandem_core::{FixedScale, FpsMode, Hooks};
use tandem_harness::{
    GameProbe, RecordingHooks, ScriptedGame, SimContext, SimDriverFactory, SimPlatform,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Key code typed once during a main-loop session.
const KEY_A: u16 = 29;

/// Who drives frames.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// The simulated platform owns the event loop.
    MainLoop,
    /// This binary calls `update` once per frame.
    HostDriven,
}

/// Frame pacing.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pacing {
    /// Continuous, display synchronized.
    VsyncOn,
    /// Continuous, as fast as possible.
    VsyncOffMaximum,
    /// On demand only.
    VsyncOffMinimum,
}

impl From<Pacing> for FpsMode {
    fn from(pacing: Pacing) -> Self {
        match pacing {
            Pacing::VsyncOn => Self::VsyncOn,
            Pacing::VsyncOffMaximum => Self::VsyncOffMaximum,
            Pacing::VsyncOffMinimum => Self::VsyncOffMinimum,
        }
    }
}

/// Tandem headless simulator
#[derive(Parser, Debug)]
#[command(name = "tandem-sim")]
#[command(about = "Drive a Tandem session with a scripted platform")]
#[command(version)]
struct Args {
    /// Number of frames to produce
    #[arg(short, long, default_value = "60")]
    frames: usize,

    /// Surface width in physical pixels
    #[arg(long, default_value = "800")]
    width_px: u32,

    /// Surface height in physical pixels
    #[arg(long, default_value = "480")]
    height_px: u32,

    /// Device scale factor
    #[arg(long, default_value = "2.0")]
    scale: f64,

    /// Run mode
    #[arg(long, value_enum, default_value = "main-loop")]
    mode: Mode,

    /// Frame pacing mode
    #[arg(long, value_enum, default_value = "vsync-on")]
    fps_mode: Pacing,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!(mode = ?args.mode, frames = args.frames, "Tandem simulator starting");

    let config = UiConfig {
        fps_mode: args.fps_mode.into(),
        graphics_library: GraphicsLibrary::Auto,
        ..UiConfig::default()
    };
    let hooks = Arc::new(RecordingHooks::new());
    let ui = UserInterface::<SimContext>::new(
        config,
        Arc::new(FixedScale(args.scale)),
        Arc::clone(&hooks) as Arc<dyn Hooks>,
    );

    let game = ScriptedGame::new();
    let probe = game.probe();
    match args.mode {
        Mode::MainLoop => run_main_loop(&args, &ui, game)?,
        Mode::HostDriven => run_host_driven(&args, &ui, game.with_graphics_job())?,
    }

    report(&probe);
    tracing::info!(
        library = ?ui.graphics_library(),
        hooks = ?hooks.calls(),
        "Tandem simulator finished"
    );
    Ok(())
}

fn run_main_loop(
    args: &Args,
    ui: &Arc<UserInterface<SimContext>>,
    game: ScriptedGame,
) -> Result<(), RunError> {
    let mut platform = SimPlatform::new().with_paint_budget(args.frames);
    platform.push_lifecycle(Stage::Alive, Stage::Focused, Some(SimContext(1)));
    platform.push_size(args.width_px, args.height_px);
    let (center_x, center_y) = (args.width_px as f32 / 2.0, args.height_px as f32 / 2.0);
    platform.push_touch(0, TouchPhase::Begin, center_x, center_y);
    platform.push_key(Some(KEY_A), Some('a'), KeyDirection::Press);
    platform.push_key(Some(KEY_A), None, KeyDirection::Release);
    platform.push_touch(0, TouchPhase::End, 0.0, 0.0);

    ui.run(game, SimDriverFactory::new(), &mut platform)?;

    tracing::info!(
        published = platform.published(),
        paint_requests = platform.paint_requests(),
        "platform event stream ended"
    );
    Ok(())
}

fn run_host_driven(
    args: &Args,
    ui: &Arc<UserInterface<SimContext>>,
    game: ScriptedGame,
) -> Result<(), RunError> {
    let update = ui.run_without_main_loop(game, SimDriverFactory::new())?;
    ui.set_outside_size(
        f64::from(args.width_px) / args.scale,
        f64::from(args.height_px) / args.scale,
    );

    let result = (0..args.frames).try_for_each(|_| ui.update());

    ui.shutdown();
    if update.join().is_err() {
        tracing::error!("update thread terminated outside the fault boundary");
    }
    result
}

fn report(probe: &GameProbe) {
    for record in probe.frames() {
        tracing::debug!(
            frame = record.frame,
            width = record.outside_size.0,
            height = record.outside_size.1,
            scale = record.device_scale_factor,
            keys = record.input.keys.len(),
            runes = ?record.input.runes,
            touches = record.input.touches.len(),
            "frame"
        );
    }
    tracing::info!(frames = probe.count(), "frames produced");
}
