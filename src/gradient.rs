// src/gradient.rs

//! Maps normalized cell values to colors.
//!
//! A `Gradient` is an ordered list of stops in `[0, 1]` plus an emphasis
//! exponent. The exponent pushes low values toward the first stop so the
//! strongest similarities stand out.

use crate::color::{pack_rgb, Color};
use crate::config::GradientConfig;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// One anchor of the piecewise-linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

impl GradientStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<GradientStop>,
    exponent: f64,
}

impl Gradient {
    /// Builds a gradient, rejecting stops that are empty, outside `[0, 1]`
    /// or not in ascending order.
    pub fn new(stops: Vec<GradientStop>, exponent: f64) -> Result<Self> {
        if stops.is_empty() {
            bail!("gradient needs at least one color stop");
        }
        if !exponent.is_finite() || exponent <= 0.0 {
            bail!("gradient exponent must be a positive number, got {}", exponent);
        }
        for (i, stop) in stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&stop.position) {
                bail!(
                    "gradient stop {} has position {} outside [0, 1]",
                    i,
                    stop.position
                );
            }
        }
        if let Some(pair) = stops.windows(2).find(|w| w[1].position < w[0].position) {
            bail!(
                "gradient stops are out of order: {} comes after {}",
                pair[1].position,
                pair[0].position
            );
        }
        Ok(Self { stops, exponent })
    }

    pub fn from_config(config: &GradientConfig) -> Result<Self> {
        Self::new(config.stops.clone(), config.exponent)
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Returns the packed `0x00RRGGBB` color for `percent` (a cell value divided
    /// by the matrix maximum).
    pub fn color_of(&self, percent: f64) -> u32 {
        let curved = self.curve(percent);

        let first = &self.stops[0];
        if self.stops.len() == 1 || curved <= first.position {
            return first.color.packed();
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if curved > hi.position {
                continue;
            }
            let span = hi.position - lo.position;
            if span <= 0.0 {
                return hi.color.packed();
            }
            let w_lo = (hi.position - curved) / span;
            let w_hi = (curved - lo.position) / span;

            let (r0, g0, b0) = lo.color.components();
            let (r1, g1, b1) = hi.color.components();
            let mix = |a: u8, b: u8| -> u32 {
                // `as` truncates toward zero and saturates, the channel rule we want.
                (a as f64 * w_lo + b as f64 * w_hi).min(255.0) as u32
            };
            return pack_rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1));
        }

        // Past the last stop.
        self.stops[self.stops.len() - 1].color.packed()
    }

    /// Clamps into `[0, 1]` and applies the emphasis exponent. NaN lands on 0.
    fn curve(&self, percent: f64) -> f64 {
        let clamped = if percent > 1.0 {
            1.0
        } else if percent > 0.0 {
            percent
        } else {
            0.0
        };
        clamped.powf(self.exponent)
    }
}

impl Default for Gradient {
    fn default() -> Self {
        let config = GradientConfig::default();
        Self {
            stops: config.stops,
            exponent: config.exponent,
        }
    }
}
