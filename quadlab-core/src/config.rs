//! Program configuration.
//!
//! Every field has a default, so a config file only needs to list what it
//! changes. Without a file the program behaves like the plain tutorial: a
//! 640x480 window titled "Window" with vsync on, drawing the indexed quad
//! with the built-in shader and an animated color.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::animation::{Channel, ColorPulse};
use crate::geometry::Geometry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// When set, `width` and `height` are ignored.
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Window".to_string(),
            width: 640,
            height: 480,
            vsync: true,
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub channel: Channel,
    pub step: f32,
    pub initial_color: [f32; 4],
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let pulse = ColorPulse::default();
        Self {
            enabled: true,
            channel: Channel::Red,
            step: pulse.step(),
            initial_color: pulse.color().to_array(),
        }
    }
}

impl AnimationConfig {
    pub fn pulse(&self) -> ColorPulse {
        ColorPulse::new(self.initial_color.into(), self.channel, self.step)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Annotated shader file. The built-in shader is used when unset.
    pub shader_path: Option<PathBuf>,
    pub geometry: Geometry,
    pub animation: AnimationConfig,
    pub clear_color: [f32; 4],
    /// One of `error`, `warn`, `info`, `debug`, `trace`. Falls back to the
    /// build's default level when unset.
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            shader_path: None,
            geometry: Geometry::default(),
            animation: AnimationConfig::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            log_level: None,
        }
    }
}

impl Config {
    /// `<config dir>/quadlab/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quadlab").join("config.json"))
    }

    /// Parses a config from JSON text.
    pub fn from_json(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }

    /// Reads the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        Self::from_json(&text).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
    }

    /// Loads `path`, or the default config file when `path` is `None`.
    ///
    /// A missing default file silently gives the defaults. An explicit path
    /// that cannot be loaded, or a default file that fails to parse, is
    /// logged and also gives the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Self::default(),
            },
        };

        if !explicit && !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// The log level named by `log_level`, if it names one.
    pub fn log_level_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.as_deref()?.parse().ok()
    }
}
