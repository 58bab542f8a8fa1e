//! Headless GIF capture
//!
//! Runs a demo without a window or GPU and encodes the frames as an
//! animated GIF.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use demoscene_core::canvas::Canvas;
use gif::{Encoder, Frame, Repeat};

use crate::scene::Demo;

/// GIF delays are in centiseconds, so 50 fps is the fastest a GIF can
/// faithfully play back.
const MAX_CAPTURE_FPS: u32 = 50;

/// Collects RGB frames and encodes them as an animated GIF.
pub struct GifCapture {
    frames: Vec<Vec<u8>>,
    width: u16,
    height: u16,
    /// Delay between frames in centiseconds
    frame_delay: u16,
}

impl GifCapture {
    pub fn new(width: u16, height: u16, fps: u16) -> Self {
        let frame_delay = if fps > 0 { (100 / fps).max(1) } else { 10 };
        Self {
            frames: Vec::new(),
            width,
            height,
            frame_delay,
        }
    }

    /// Snapshot the canvas as one GIF frame.
    pub fn capture_frame(&mut self, canvas: &Canvas) {
        self.frames.push(canvas.rgb_buffer());
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Encode all captured frames as an infinitely looping GIF.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.frames.is_empty() {
            anyhow::bail!("no frames to save");
        }

        let file = File::create(path.as_ref()).context("failed to create GIF file")?;
        let mut encoder =
            Encoder::new(file, self.width, self.height, &[]).context("failed to create GIF encoder")?;
        encoder
            .set_repeat(Repeat::Infinite)
            .context("failed to set GIF repeat")?;

        for frame_data in &self.frames {
            let mut frame = Frame::from_rgb(self.width, self.height, frame_data);
            frame.delay = self.frame_delay;
            encoder
                .write_frame(&frame)
                .context("failed to write GIF frame")?;
        }

        Ok(())
    }
}

/// Drive a demo for `frames` steps with no window and write the GIF.
pub fn run_capture(demo: &mut dyn Demo, canvas: &mut Canvas, frames: u32, path: &Path) -> Result<()> {
    let fps = demo.frame_rate().clamp(1, MAX_CAPTURE_FPS) as u16;
    let mut capture = GifCapture::new(canvas.width() as u16, canvas.height() as u16, fps);

    for _ in 0..frames {
        demo.advance();
        demo.draw(canvas);
        capture.capture_frame(canvas);
    }

    capture
        .save(path)
        .with_context(|| format!("failed to save capture to {}", path.display()))?;
    log::info!(
        "captured {} frames of {} to {}",
        capture.frame_count(),
        demo.name(),
        path.display()
    );
    Ok(())
}
