//! Demo configuration
//!
//! All tunables for the three demos in one serializable struct. Presets
//! are RON files; a missing file just means defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::sand::SandParams;
use crate::slideshow::SlideshowParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Initial window size in logical pixels
    pub window_width: u32,
    pub window_height: u32,
    /// Size of the CPU canvas the demos draw into
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Show the stats overlay on startup
    pub show_hud: bool,
    pub slideshow: SlideshowParams,
    pub sand: SandParams,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 480,
            canvas_width: 640,
            canvas_height: 480,
            show_hud: true,
            slideshow: SlideshowParams::default(),
            sand: SandParams::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, Default::default())?)
    }

    /// Load a config file, or fall back to defaults when no path is given
    /// or the file does not exist. A file that exists but fails to parse
    /// is an error rather than a silent fallback.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            log::warn!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| CoreError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    /// Reject configurations no demo can run with.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(CoreError::BadParams("canvas size must be > 0".into()));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(CoreError::BadParams("window size must be > 0".into()));
        }
        if self.slideshow.base_maps == 0 {
            return Err(CoreError::BadParams("slideshow.base_maps must be > 0".into()));
        }
        if self.sand.gravity_interval == 0 {
            return Err(CoreError::BadParams("sand.gravity_interval must be > 0".into()));
        }
        if self.sand.kick_min > self.sand.kick_max {
            return Err(CoreError::BadParams("sand.kick_min must be <= kick_max".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, 480);
        assert_eq!(config.slideshow.base_maps, 8);
        assert_eq!(config.sand.grains, 300);
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = DemoConfig::default();
        config.sand.grains = 123;
        config.slideshow.octaves = 4;

        let text = config.to_ron_string().unwrap();
        let parsed = DemoConfig::from_ron_str(&text).unwrap();
        assert_eq!(parsed.sand.grains, 123);
        assert_eq!(parsed.slideshow.octaves, 4);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = DemoConfig::load(Some(Path::new("/nonexistent/demos.ron"))).unwrap();
        assert_eq!(config.sand.grains, DemoConfig::default().sand.grains);
    }

    #[test]
    fn test_malformed_ron_is_an_error() {
        assert!(DemoConfig::from_ron_str("(window_width: \"nope\")").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_canvas() {
        let config = DemoConfig {
            canvas_width: 0,
            ..DemoConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_kick_range() {
        let mut config = DemoConfig::default();
        config.sand.kick_min = 9;
        config.sand.kick_max = 2;
        assert!(config.validate().is_err());
    }
}
