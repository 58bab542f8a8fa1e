//! Perlin-noise interpolation slideshow

use anyhow::{Context, Result};
use demoscene_core::canvas::{self, Canvas};
use demoscene_core::config::DemoConfig;
use demoscene_core::slideshow::{self, NoiseFrame};
use demoscene_core::timing::FrameTimer;

use super::Demo;

/// Cycles through pre-generated noise frames, one per configured delay,
/// wrapping after the last frame.
pub struct PerlinDemo {
    frames: Vec<NoiseFrame>,
    cursor: usize,
    timer: FrameTimer,
    frame_delay_ms: u64,
}

impl PerlinDemo {
    pub fn new(config: &DemoConfig, seed: u64) -> Result<Self> {
        let frames = slideshow::generate(&config.slideshow, seed)
            .context("failed to generate slideshow frames")?;
        log::info!("slideshow ready: {} frames", frames.len());

        Ok(Self {
            frames,
            cursor: 0,
            timer: FrameTimer::from_delay_ms(config.slideshow.frame_delay_ms),
            frame_delay_ms: config.slideshow.frame_delay_ms.max(1),
        })
    }
}

impl Demo for PerlinDemo {
    fn name(&self) -> &'static str {
        "perlin"
    }

    fn frame_rate(&self) -> u32 {
        (1000 / self.frame_delay_ms) as u32
    }

    fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.frames.len();
    }

    fn update(&mut self) {
        if self.timer.tick() {
            self.advance();
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.clear(canvas::BLACK);

        let frame = &self.frames[self.cursor];
        let dst_x = (canvas.width() as i32 - frame.width as i32) / 2;
        let dst_y = (canvas.height() as i32 - frame.height as i32) / 2;
        canvas.blit_rgba(&frame.to_rgba(), frame.width, frame.height, dst_x, dst_y);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![("frame", format!("{}/{}", self.cursor + 1, self.frames.len()))]
    }
}
