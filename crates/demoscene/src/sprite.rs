//! Sprite loading and the built-in hello banner

use std::path::Path;

use anyhow::{Context, Result};
use demoscene_core::canvas::Canvas;

/// Decoded RGBA image drawn by the hello demo.
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
}

const BANNER_TEXT: &str = "HELLO, WORLD!";
const BANNER_SCALE: u32 = 4;
const BANNER_PAD: u32 = 12;
const BANNER_CARD: [u8; 4] = [24, 28, 40, 255];
const BANNER_INK: [u8; 4] = [235, 235, 235, 255];

impl Sprite {
    /// Decode a sprite from image bytes (PNG or BMP).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .context("failed to decode sprite image")?
            .to_rgba8();

        Ok(Self {
            width: img.width(),
            height: img.height(),
            data: img.into_raw(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read sprite {}", path.display()))?;
        Self::from_bytes(&bytes)
    }

    /// The fallback hello-world banner, rendered from the embedded pixel
    /// font so the demo needs no asset files.
    pub fn builtin_banner() -> Self {
        let advance = 6 * BANNER_SCALE; // 5 glyph columns + 1 of spacing
        let width = BANNER_TEXT.len() as u32 * advance - BANNER_SCALE + BANNER_PAD * 2;
        let height = 7 * BANNER_SCALE + BANNER_PAD * 2;
        let mut data = vec![0u8; (width * height * 4) as usize];

        for pixel in data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&BANNER_CARD);
        }

        let mut put = |x: u32, y: u32| {
            let idx = ((y * width + x) * 4) as usize;
            data[idx..idx + 4].copy_from_slice(&BANNER_INK);
        };

        for (i, c) in BANNER_TEXT.chars().enumerate() {
            let Some(rows) = glyph(c) else { continue };
            let origin_x = BANNER_PAD + i as u32 * advance;
            for (row_idx, row) in rows.iter().enumerate() {
                for col in 0..5u32 {
                    if row & (0b10000 >> col) == 0 {
                        continue;
                    }
                    for dy in 0..BANNER_SCALE {
                        for dx in 0..BANNER_SCALE {
                            put(
                                origin_x + col * BANNER_SCALE + dx,
                                BANNER_PAD + row_idx as u32 * BANNER_SCALE + dy,
                            );
                        }
                    }
                }
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    /// Blit this sprite centered on the canvas.
    pub fn blit_centered(&self, canvas: &mut Canvas) {
        let dst_x = (canvas.width() as i32 - self.width as i32) / 2;
        let dst_y = (canvas.height() as i32 - self.height as i32) / 2;
        canvas.blit_rgba(&self.data, self.width, self.height, dst_x, dst_y);
    }
}

/// 5x7 glyph rows (MSB-left), covering just the banner's characters.
fn glyph(c: char) -> Option<[u8; 7]> {
    Some(match c {
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b01100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        ' ' => [0; 7],
        _ => return None,
    })
}
