// src/color.rs

//! Color types shared by the gradient, the rasterizer and the configuration.
//!
//! Pixels travel through the pipeline packed as `0x00RRGGBB` in a `u32`,
//! which is also the layout a 24-bit ZPixmap expects on little-endian X servers.

use serde::{Deserialize, Serialize};

/// Named colors accepted in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    White,
    Gray,
    DarkGray,
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    Orange,
    Pink,
}

impl NamedColor {
    /// Returns the RGB components of this named color.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            NamedColor::Black => (0, 0, 0),
            NamedColor::White => (255, 255, 255),
            NamedColor::Gray => (128, 128, 128),
            NamedColor::DarkGray => (64, 64, 64),
            NamedColor::Red => (255, 0, 0),
            NamedColor::Green => (0, 255, 0),
            NamedColor::Blue => (0, 0, 255),
            NamedColor::Yellow => (255, 255, 0),
            NamedColor::Cyan => (0, 255, 255),
            NamedColor::Magenta => (255, 0, 255),
            NamedColor::Orange => (255, 200, 0),
            NamedColor::Pink => (255, 175, 175),
        }
    }
}

/// A concrete color, either by name or by explicit components.
///
/// In JSON this is either a bare string (`"green"`) or `{ "rgb": [r, g, b] }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgb { rgb: [u8; 3] },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { rgb: [r, g, b] }
    }

    /// Returns the `(r, g, b)` components.
    pub fn components(&self) -> (u8, u8, u8) {
        match self {
            Color::Named(named) => named.rgb(),
            Color::Rgb { rgb } => (rgb[0], rgb[1], rgb[2]),
        }
    }

    /// Packs the color as `0x00RRGGBB`.
    pub fn packed(&self) -> u32 {
        let (r, g, b) = self.components();
        pack_rgb(r as u32, g as u32, b as u32)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Named(NamedColor::Black)
    }
}

/// Packs channel values into `0x00RRGGBB`. Each channel must already be `<= 255`.
#[inline]
pub fn pack_rgb(r: u32, g: u32, b: u32) -> u32 {
    (r << 16) | (g << 8) | b
}

/// Splits a packed pixel back into `(r, g, b)`.
#[inline]
pub fn unpack_rgb(pixel: u32) -> (u8, u8, u8) {
    (
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    )
}
