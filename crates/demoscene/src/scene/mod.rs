//! Demo scenes driven by the windowed player and headless capture

mod hello;
mod perlin;
mod sand;

pub use hello::HelloDemo;
pub use perlin::PerlinDemo;
pub use sand::SandDemo;

use std::path::Path;

use anyhow::Result;
use demoscene_core::canvas::Canvas;
use demoscene_core::config::DemoConfig;

/// Which demo to run, as selected on the command line or the number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DemoKind {
    /// Sprite blit hello world
    Hello,
    /// Perlin-noise interpolation slideshow
    Perlin,
    /// Falling sand over obstacle blocks
    Sand,
}

/// Trait every demo implements; the app and the capture path drive demos
/// exclusively through it.
pub trait Demo {
    /// Display name for the window title and HUD
    fn name(&self) -> &'static str;

    /// The demo's natural step rate, used to pace GIF capture.
    fn frame_rate(&self) -> u32;

    /// Advance one step unconditionally (capture and single-step mode).
    fn advance(&mut self);

    /// Real-time update: advance when the demo's own timer fires.
    fn update(&mut self);

    /// Draw the current state into the canvas.
    fn draw(&self, canvas: &mut Canvas);

    /// Pointer state in canvas coordinates. Demos that ignore the mouse
    /// keep the default no-op.
    fn pointer(&mut self, _x: i32, _y: i32, _pressed: bool) {}

    /// Key/value pairs for the HUD overlay.
    fn stats(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Build a demo from config, seed, and the optional hello-sprite path.
pub fn create_demo(
    kind: DemoKind,
    config: &DemoConfig,
    seed: u64,
    image: Option<&Path>,
) -> Result<Box<dyn Demo>> {
    Ok(match kind {
        DemoKind::Hello => Box::new(HelloDemo::new(config, image)?),
        DemoKind::Perlin => Box::new(PerlinDemo::new(config, seed)?),
        DemoKind::Sand => Box::new(SandDemo::new(config, seed)),
    })
}
