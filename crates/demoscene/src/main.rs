//! Demoscene experiments player

use std::path::PathBuf;

use clap::Parser;
use demoscene::scene::{self, DemoKind};
use demoscene::{App, AppOptions};
use demoscene_core::canvas::Canvas;
use demoscene_core::config::DemoConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which demo to run
    #[arg(value_enum, default_value = "sand")]
    demo: DemoKind,

    /// Seed for all randomness (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// RON config file with demo parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image file (PNG or BMP) for the hello demo's sprite
    #[arg(long)]
    image: Option<PathBuf>,

    /// Render to an animated GIF instead of opening a window
    #[arg(long)]
    capture: Option<PathBuf>,

    /// Number of frames to capture
    #[arg(long, default_value_t = 200)]
    frames: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = DemoConfig::load(args.config.as_deref())?;
    config.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("starting demo {:?} with seed {seed}", args.demo);

    if let Some(path) = args.capture {
        let mut demo = scene::create_demo(args.demo, &config, seed, args.image.as_deref())?;
        let mut canvas = Canvas::new(config.canvas_width, config.canvas_height);
        return demoscene::capture::run_capture(demo.as_mut(), &mut canvas, args.frames, &path);
    }

    let options = AppOptions {
        kind: args.demo,
        config,
        seed,
        image: args.image,
    };
    pollster::block_on(run(options))
}

async fn run(options: AppOptions) -> anyhow::Result<()> {
    let (app, event_loop) = App::new(options).await?;
    App::run(event_loop, app)
}
