//! Perlin-noise slideshow frame generation
//!
//! Pre-generates the full frame sequence for the interpolation slideshow:
//! a run of multi-octave Perlin fields with blended transition frames
//! between each consecutive pair. Generation is deterministic for a given
//! seed, so a slideshow can be regenerated instead of cached on disk.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Parameters for slideshow generation and playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideshowParams {
    /// Detail octaves per noise field
    pub octaves: u32,
    /// Number of independent base noise maps
    pub base_maps: u32,
    /// Blended transition frames between consecutive base maps
    pub transitions: u32,
    /// Map width in pixels (generation cost grows with this)
    pub map_width: u32,
    /// Map height in pixels
    pub map_height: u32,
    /// Playback delay per frame in milliseconds
    pub frame_delay_ms: u64,
}

impl Default for SlideshowParams {
    fn default() -> Self {
        Self {
            octaves: 6,
            base_maps: 8,
            transitions: 3,
            map_width: 150,
            map_height: 150,
            frame_delay_ms: 10,
        }
    }
}

/// A single grayscale frame of the slideshow.
#[derive(Debug, Clone)]
pub struct NoiseFrame {
    pub width: u32,
    pub height: u32,
    /// One gray byte per pixel, row-major
    pub pixels: Vec<u8>,
}

impl NoiseFrame {
    /// Expand to RGBA for blitting onto a canvas.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() * 4);
        for &g in &self.pixels {
            rgba.extend_from_slice(&[g, g, g, 255]);
        }
        rgba
    }
}

/// Total frames produced for the given parameters: every base map plus
/// the transition frames between each consecutive pair.
pub fn frame_count(params: &SlideshowParams) -> u32 {
    (params.base_maps * (params.transitions + 1)).saturating_sub(params.transitions)
}

/// Map a noise value in [-1, 1] to a gray byte. Blended transition values
/// can leave that range, so the result is clamped.
#[inline]
fn to_gray(value: f64) -> u8 {
    ((1.0 + value) * 127.5).clamp(0.0, 255.0) as u8
}

/// Generate the full frame sequence.
///
/// Each base map gets its own seed (`seed + map_index`) for variety.
/// Between base maps `k` and `k + 1`, transition frame `z` adds the next
/// field weighted by `(z + 1) / (transitions + 1)`, so the upcoming map
/// fades in progressively.
pub fn generate(params: &SlideshowParams, seed: u64) -> Result<Vec<NoiseFrame>> {
    if params.base_maps == 0 {
        return Err(CoreError::BadParams("base_maps must be > 0".into()));
    }
    if params.map_width == 0 || params.map_height == 0 {
        return Err(CoreError::BadParams("map size must be > 0".into()));
    }

    let fields: Vec<Fbm<Perlin>> = (0..params.base_maps)
        .map(|k| {
            Fbm::<Perlin>::new((seed as u32).wrapping_add(k)).set_octaves(params.octaves.max(1) as usize)
        })
        .collect();

    let mut frames = Vec::with_capacity(frame_count(params) as usize);
    for (k, field) in fields.iter().enumerate() {
        frames.push(render_field(params, |x, y| field.get([x, y])));

        if let Some(next) = fields.get(k + 1) {
            for z in 0..params.transitions {
                let weight = (z + 1) as f64 / (params.transitions + 1) as f64;
                frames.push(render_field(params, |x, y| {
                    field.get([x, y]) + weight * next.get([x, y])
                }));
            }
        }
    }

    log::debug!(
        "generated {} slideshow frames ({}x{}, {} base maps)",
        frames.len(),
        params.map_width,
        params.map_height,
        params.base_maps
    );
    Ok(frames)
}

/// Sample a noise field over the unit square and quantize to gray.
fn render_field(params: &SlideshowParams, field: impl Fn(f64, f64) -> f64) -> NoiseFrame {
    let (w, h) = (params.map_width, params.map_height);
    let mut pixels = vec![0u8; w as usize * h as usize];

    for y in 0..h {
        for x in 0..w {
            let value = field(x as f64 / w as f64, y as f64 / h as f64);
            pixels[y as usize * w as usize + x as usize] = to_gray(value);
        }
    }

    NoiseFrame {
        width: w,
        height: h,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> SlideshowParams {
        SlideshowParams {
            octaves: 2,
            base_maps: 3,
            transitions: 2,
            map_width: 16,
            map_height: 16,
            frame_delay_ms: 10,
        }
    }

    #[test]
    fn test_frame_count_formula() {
        let params = small_params();
        // 3 base maps with 2 transitions between each pair: 3 + 2*2 = 7.
        assert_eq!(frame_count(&params), 7);

        let defaults = SlideshowParams::default();
        assert_eq!(frame_count(&defaults), 8 * 4 - 3);
    }

    #[test]
    fn test_single_map_has_no_transitions() {
        let params = SlideshowParams {
            base_maps: 1,
            ..small_params()
        };
        assert_eq!(frame_count(&params), 1);
        let frames = generate(&params, 7).unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_zero_transitions_yields_base_maps_only() {
        let params = SlideshowParams {
            transitions: 0,
            ..small_params()
        };
        let frames = generate(&params, 7).unwrap();
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn test_generate_matches_frame_count() {
        let params = small_params();
        let frames = generate(&params, 42).unwrap();
        assert_eq!(frames.len(), frame_count(&params) as usize);
        for frame in &frames {
            assert_eq!(frame.pixels.len(), (params.map_width * params.map_height) as usize);
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let params = small_params();
        let a = generate(&params, 123).unwrap();
        let b = generate(&params, 123).unwrap();
        for (fa, fb) in a.iter().zip(&b) {
            assert_eq!(fa.pixels, fb.pixels);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let params = small_params();
        let a = generate(&params, 1).unwrap();
        let b = generate(&params, 2).unwrap();
        assert_ne!(a[0].pixels, b[0].pixels);
    }

    #[test]
    fn test_base_maps_vary_within_a_run() {
        let params = SlideshowParams {
            transitions: 0,
            ..small_params()
        };
        let frames = generate(&params, 9).unwrap();
        assert_ne!(frames[0].pixels, frames[1].pixels);
    }

    #[test]
    fn test_zero_base_maps_rejected() {
        let params = SlideshowParams {
            base_maps: 0,
            ..small_params()
        };
        assert!(generate(&params, 0).is_err());
    }

    #[test]
    fn test_gray_mapping_bounds() {
        assert_eq!(to_gray(-1.0), 0);
        assert_eq!(to_gray(1.0), 255);
        assert_eq!(to_gray(0.0), 127);
        // Blended values can exceed the nominal range; they clamp.
        assert_eq!(to_gray(1.8), 255);
        assert_eq!(to_gray(-1.5), 0);
    }

    #[test]
    fn test_to_rgba_expands_gray() {
        let frame = NoiseFrame {
            width: 2,
            height: 1,
            pixels: vec![10, 200],
        };
        assert_eq!(
            frame.to_rgba(),
            vec![10, 10, 10, 255, 200, 200, 200, 255]
        );
    }
}
