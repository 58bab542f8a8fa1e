//! Hello-world sprite blit

use std::path::Path;

use anyhow::Result;
use demoscene_core::canvas::{self, Canvas};
use demoscene_core::config::DemoConfig;

use super::Demo;
use crate::sprite::Sprite;

/// Draws one sprite centered on a black canvas. The sprite comes from a
/// user-supplied PNG/BMP, or the built-in banner when none is given.
pub struct HelloDemo {
    sprite: Sprite,
}

impl HelloDemo {
    pub fn new(_config: &DemoConfig, image: Option<&Path>) -> Result<Self> {
        let sprite = match image {
            Some(path) => {
                log::info!("loading hello sprite from {}", path.display());
                Sprite::from_path(path)?
            }
            None => Sprite::builtin_banner(),
        };
        Ok(Self { sprite })
    }
}

impl Demo for HelloDemo {
    fn name(&self) -> &'static str {
        "hello"
    }

    fn frame_rate(&self) -> u32 {
        // Static image; rate only matters for capture pacing.
        10
    }

    fn advance(&mut self) {}

    fn update(&mut self) {}

    fn draw(&self, canvas: &mut Canvas) {
        canvas.clear(canvas::BLACK);
        self.sprite.blit_centered(canvas);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![(
            "sprite",
            format!("{}x{}", self.sprite.width, self.sprite.height),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sprite_is_visible_on_canvas() {
        let config = DemoConfig::default();
        let demo = HelloDemo::new(&config, None).unwrap();
        let mut canvas = Canvas::new(config.canvas_width, config.canvas_height);

        demo.draw(&mut canvas);

        // Something other than the black background must have been drawn.
        let non_black = canvas
            .data()
            .chunks_exact(4)
            .filter(|px| px[0] != 0 || px[1] != 0 || px[2] != 0)
            .count();
        assert!(non_black > 0);
    }

    #[test]
    fn test_missing_image_file_is_an_error() {
        let config = DemoConfig::default();
        let result = HelloDemo::new(&config, Some(Path::new("/nonexistent/hello.bmp")));
        assert!(result.is_err());
    }
}
