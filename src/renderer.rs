// src/renderer.rs

//! This module defines the `Renderer`.
//!
//! The `Renderer` turns one `NamedMatrix` into a finished frame: it rasterizes
//! the cells through its `Gradient` and then smooths the raster with its blur
//! `Kernel`. Both are built once from configuration when the renderer is
//! constructed. The renderer knows nothing about windows; the display shell
//! hands it a `DrawRegion` and presents whatever frame comes back.

use crate::blur::Kernel;
use crate::config::Config;
use crate::gradient::Gradient;
use crate::matrix::NamedMatrix;
use crate::raster::{rasterize, DrawRegion, Framebuffer};

use anyhow::{Context, Result};
use log::{debug, info};

/// Rasterizes and blurs matrices.
///
/// Holds no per-frame state, so every call renders from scratch.
#[derive(Debug, Clone)]
pub struct Renderer {
    gradient: Gradient,
    kernel: Option<Kernel>,
}

impl Renderer {
    /// Creates a renderer with an explicit gradient and optional blur kernel.
    pub fn new(gradient: Gradient, kernel: Option<Kernel>) -> Self {
        Self { gradient, kernel }
    }

    /// Builds the gradient and kernel described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let gradient =
            Gradient::from_config(&config.gradient).context("Invalid gradient configuration")?;
        let kernel = if config.blur.enabled {
            let kernel = Kernel::from_config(&config.blur).context("Invalid blur configuration")?;
            debug!(
                "Blur kernel built: {}x{} (requested {}), sharpness {}",
                kernel.size(),
                kernel.size(),
                config.blur.size,
                config.blur.sharpness
            );
            Some(kernel)
        } else {
            info!("Blur disabled by configuration.");
            None
        };
        Ok(Self::new(gradient, kernel))
    }

    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    pub fn kernel(&self) -> Option<&Kernel> {
        self.kernel.as_ref()
    }

    /// Renders `matrix` into a frame the size of `region`.
    pub fn render(&self, matrix: &NamedMatrix, region: DrawRegion) -> Framebuffer {
        info!("Rendering matrix for: {}", matrix.language());
        let raw = rasterize(matrix, region, &self.gradient);
        match &self.kernel {
            Some(kernel) => kernel.convolve(&raw),
            None => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NamedMatrix {
        NamedMatrix::build(
            "english",
            &["a=1\t0 1 0.2", "b=2\t1 0 0.4", "c=3\t0.2 0.4 0"],
        )
        .unwrap()
    }

    #[test_log::test]
    fn default_config_blurs() {
        let renderer = Renderer::from_config(&Config::default()).unwrap();
        assert_eq!(renderer.kernel().map(Kernel::size), Some(11));
        assert_eq!(renderer.gradient().exponent(), 2.5);
    }

    #[test_log::test]
    fn disabled_blur_returns_the_raw_raster() {
        let mut config = Config::default();
        config.blur.enabled = false;
        let renderer = Renderer::from_config(&config).unwrap();
        let region = DrawRegion::sized(30, 30);

        let frame = renderer.render(&sample(), region);
        assert_eq!(frame, rasterize(&sample(), region, renderer.gradient()));
    }

    #[test_log::test]
    fn blurred_frame_keeps_region_size_and_softens_edges() {
        let renderer = Renderer::from_config(&Config::default()).unwrap();
        let region = DrawRegion::sized(30, 30);
        let raw = rasterize(&sample(), region, renderer.gradient());
        let frame = renderer.render(&sample(), region);

        assert_eq!((frame.width(), frame.height()), (30, 30));
        assert_ne!(frame, raw);
        // Deep inside a diagonal (black) cell the blur still pulls in some green.
        assert_eq!(raw.pixel(4, 4), 0x000000);
        assert_ne!(frame.pixel(9, 9), 0x000000);
    }

    #[test_log::test]
    fn bad_config_is_reported() {
        let mut config = Config::default();
        config.blur.size = 0;
        let err = Renderer::from_config(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid blur configuration"));

        let mut config = Config::default();
        config.blur.size = 1 << 33;
        let err = Renderer::from_config(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("exceeds the maximum"));

        let mut config = Config::default();
        config.gradient.stops.clear();
        assert!(Renderer::from_config(&config).is_err());
    }
}
