// src/blur.rs

//! Diamond-shaped blur applied to the rasterized heatmap.
//!
//! Kernel weights decay exponentially with Manhattan distance from the center,
//! which softens cell edges without the round footprint of a Gaussian.

use crate::config::BlurConfig;
use crate::color::{pack_rgb, unpack_rgb};
use crate::raster::Framebuffer;
use anyhow::{bail, Result};
use log::trace;

/// Largest accepted kernel side. Wider kernels exceed any useful window size
/// and their weights stop fitting in memory.
pub const MAX_KERNEL_SIZE: usize = 1025;

/// A square convolution kernel of odd size whose weights sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Builds the kernel for a requested `size` (rounded up to odd) and
    /// `sharpness`, the base of the falloff.
    pub fn build(size: usize, sharpness: f64) -> Result<Self> {
        if size == 0 {
            bail!("blur kernel size must be at least 1");
        }
        if size > MAX_KERNEL_SIZE {
            bail!(
                "blur kernel size {} exceeds the maximum of {}",
                size,
                MAX_KERNEL_SIZE
            );
        }
        if !sharpness.is_finite() || sharpness <= 0.0 {
            bail!("blur sharpness must be a positive number, got {}", sharpness);
        }
        let size = if size % 2 == 0 { size + 1 } else { size };
        let radius = (size / 2) as i64;

        let mut raw = Vec::with_capacity(size * size);
        let mut total = 0.0f64;
        for y in 0..size as i64 {
            for x in 0..size as i64 {
                let manhattan = (radius - x).abs() + (radius - y).abs();
                let exponent = (radius + 1) - manhattan;
                let weight = sharpness.powi(exponent as i32);
                raw.push(weight);
                total += weight;
            }
        }

        if !total.is_finite() || total <= 0.0 {
            bail!(
                "blur kernel of size {} with sharpness {} has weights outside the f64 range",
                size,
                sharpness
            );
        }

        let weights = raw.into_iter().map(|w| (w / total) as f32).collect();
        Ok(Self { size, weights })
    }

    pub fn from_config(config: &BlurConfig) -> Result<Self> {
        Self::build(config.size, config.sharpness)
    }

    /// Side length; always odd.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn radius(&self) -> usize {
        self.size / 2
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn weight(&self, x: usize, y: usize) -> f32 {
        self.weights[y * self.size + x]
    }

    /// Convolves `src` with this kernel. Samples beyond the edge reuse the
    /// nearest edge pixel.
    pub fn convolve(&self, src: &Framebuffer) -> Framebuffer {
        let (width, height) = (src.width(), src.height());
        let mut dst = Framebuffer::new(width, height);
        if width == 0 || height == 0 {
            return dst;
        }
        trace!(
            "Convolving {}x{} frame with {}x{} kernel",
            width,
            height,
            self.size,
            self.size
        );

        let radius = self.radius() as isize;
        let clamp = |v: isize, len: usize| v.clamp(0, len as isize - 1) as usize;

        for y in 0..height {
            for x in 0..width {
                let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
                for ky in 0..self.size {
                    let sy = clamp(y as isize + ky as isize - radius, height);
                    for kx in 0..self.size {
                        let sx = clamp(x as isize + kx as isize - radius, width);
                        let w = self.weights[ky * self.size + kx];
                        let (pr, pg, pb) = unpack_rgb(src.pixel(sx, sy));
                        r += pr as f32 * w;
                        g += pg as f32 * w;
                        b += pb as f32 * w;
                    }
                }
                dst.set_pixel(x, y, pack_rgb(channel(r), channel(g), channel(b)));
            }
        }
        dst
    }
}

#[inline]
fn channel(v: f32) -> u32 {
    v.round().clamp(0.0, 255.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn even_size_is_rounded_up() {
        let kernel = Kernel::build(10, 3.5).unwrap();
        assert_eq!(kernel.size(), 11);
        assert_eq!(kernel.weights().len(), 121);
        assert_eq!(Kernel::build(5, 3.5).unwrap().size(), 5);
    }

    #[test_log::test]
    fn weights_sum_to_one() {
        for (size, sharpness) in [(1, 2.0), (3, 1.0), (4, 0.5), (10, 3.5), (15, 9.0)] {
            let kernel = Kernel::build(size, sharpness).unwrap();
            let sum: f64 = kernel.weights().iter().map(|&w| w as f64).sum();
            assert!(
                (sum - 1.0).abs() < 1e-5,
                "size {} sharpness {} sums to {}",
                size,
                sharpness,
                sum
            );
        }
    }

    #[test_log::test]
    fn weights_fall_off_with_manhattan_distance() {
        let kernel = Kernel::build(5, 3.5).unwrap();
        let center = kernel.weight(2, 2);
        let ratio = center / kernel.weight(2, 1);
        assert!((ratio - 3.5).abs() < 1e-4, "ratio {}", ratio);
        // Same Manhattan distance, same weight.
        assert_eq!(kernel.weight(1, 1), kernel.weight(2, 0));
        assert_eq!(kernel.weight(0, 0), kernel.weight(4, 4));
        assert!(kernel.weight(0, 0) < kernel.weight(1, 1));
    }

    #[test_log::test]
    fn invalid_parameters_are_rejected() {
        assert!(Kernel::build(0, 3.5).is_err());
        assert!(Kernel::build(3, 0.0).is_err());
        assert!(Kernel::build(3, f64::NAN).is_err());
    }

    #[test_log::test]
    fn oversized_kernels_are_rejected() {
        assert!(Kernel::build(1 << 33, 3.5).is_err());
        assert!(Kernel::build(usize::MAX, 3.5).is_err());
        assert!(Kernel::build(MAX_KERNEL_SIZE + 1, 3.5).is_err());
        // Largest accepted size is odd already and builds.
        assert_eq!(Kernel::build(MAX_KERNEL_SIZE, 1.0).unwrap().size(), MAX_KERNEL_SIZE);
    }

    #[test_log::test]
    fn overflowing_weights_are_rejected() {
        // 10^513 at the center does not fit in an f64.
        let err = Kernel::build(MAX_KERNEL_SIZE, 10.0).unwrap_err();
        assert!(err.to_string().contains("outside the f64 range"), "{}", err);
    }

    #[test_log::test]
    fn uniform_image_is_unchanged() {
        let kernel = Kernel::build(10, 3.5).unwrap();
        let mut frame = Framebuffer::new(6, 4);
        frame.fill_rect(0, 0, 6, 4, 0x336699);
        let blurred = kernel.convolve(&frame);
        assert!(blurred.pixels().iter().all(|&p| p == 0x336699));
    }

    #[test_log::test]
    fn single_bright_pixel_spreads_into_a_diamond() {
        let kernel = Kernel::build(3, 2.0).unwrap();
        let mut frame = Framebuffer::new(5, 5);
        frame.set_pixel(2, 2, 0x00FF00);
        let blurred = kernel.convolve(&frame);

        let green = |x, y| unpack_rgb(blurred.pixel(x, y)).1;
        assert!(green(2, 2) > green(2, 1));
        assert!(green(2, 1) > green(1, 1));
        assert_eq!(green(2, 1), green(1, 2));
        assert_eq!(green(0, 0), 0);
        assert_eq!(unpack_rgb(blurred.pixel(2, 2)).0, 0);
    }

    #[test_log::test]
    fn size_one_kernel_is_identity() {
        let kernel = Kernel::build(1, 3.5).unwrap();
        let mut frame = Framebuffer::new(3, 2);
        frame.set_pixel(1, 1, 0xABCDEF);
        assert_eq!(kernel.convolve(&frame), frame);
    }
}
