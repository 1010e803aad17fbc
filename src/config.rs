// src/config.rs

//! Configuration structures for `langplot`.
//!
//! Every struct deserializes with `#[serde(default)]`, so a configuration file
//! only needs to name the settings it changes. The defaults reproduce the
//! reference rendering: an 800x800 black window, a black-to-green gradient
//! with a 2.5 emphasis exponent and an 11x11 blur kernel of sharpness 3.5.

use crate::color::{Color, NamedColor};
use crate::gradient::GradientStop;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Value-to-color mapping.
    pub gradient: GradientConfig,
    /// Post-process blur.
    pub blur: BlurConfig,
    /// Which matrix to show when `--matrix` is not given.
    pub selection: SelectionConfig,
}

impl Config {
    /// Loads a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!("No config file given, using defaults.");
                Ok(Self::default())
            }
        }
    }
}

// --- Window ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Preferred window width in pixels.
    pub width: u32,
    /// Preferred window height in pixels.
    pub height: u32,
    /// Background shown before the first paint.
    pub background: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 800,
            background: Color::Named(NamedColor::Black),
        }
    }
}

// --- Gradient ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GradientConfig {
    /// Exponent applied to the normalized value before interpolation.
    pub exponent: f64,
    /// Color stops, ascending by position in `[0, 1]`.
    pub stops: Vec<GradientStop>,
}

impl Default for GradientConfig {
    fn default() -> Self {
        GradientConfig {
            exponent: 2.5,
            stops: vec![
                GradientStop::new(0.0, Color::Named(NamedColor::Black)),
                GradientStop::new(1.0, Color::Named(NamedColor::Green)),
            ],
        }
    }
}

// --- Blur ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlurConfig {
    /// Set to false to present the raw raster.
    pub enabled: bool,
    /// Requested kernel size; even sizes are rounded up to the next odd size.
    pub size: usize,
    /// Base of the exponential falloff. Higher is sharper.
    pub sharpness: f64,
}

impl Default for BlurConfig {
    fn default() -> Self {
        BlurConfig {
            enabled: true,
            size: 10,
            sharpness: 3.5,
        }
    }
}

// --- Selection ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Matrix index or language name. `None` selects the first matrix.
    pub matrix: Option<String>,
}
