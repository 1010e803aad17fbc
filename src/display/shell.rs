// src/display/shell.rs
//! DisplayShell - owns a driver and repaints one matrix on demand.

use crate::display::driver::DisplayDriver;
use crate::display::messages::DisplayEvent;
use crate::matrix::NamedMatrix;
use crate::raster::DrawRegion;
use crate::renderer::Renderer;
use anyhow::{Context, Result};
use log::{debug, info};

/// Paints a single matrix into the driver's window.
///
/// The draw region is captured once at construction. Every expose renders
/// the matrix from scratch; nothing is cached between paints.
pub struct DisplayShell<'a, D: DisplayDriver> {
    driver: D,
    renderer: Renderer,
    matrix: &'a NamedMatrix,
    region: DrawRegion,
    paints: usize,
}

impl<'a, D: DisplayDriver> DisplayShell<'a, D> {
    pub fn new(mut driver: D, renderer: Renderer, matrix: &'a NamedMatrix) -> Result<Self> {
        let region = driver.draw_region();
        info!(
            "DisplayShell: draw region {}x{} at ({}, {})",
            region.width, region.height, region.x, region.y
        );
        driver
            .set_title(&format!("langplot: {}", matrix.language()))
            .context("Failed to set window title")?;
        Ok(Self {
            driver,
            renderer,
            matrix,
            region,
            paints: 0,
        })
    }

    pub fn region(&self) -> DrawRegion {
        self.region
    }

    /// Number of frames presented so far.
    pub fn paints(&self) -> usize {
        self.paints
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Renders the matrix and presents it.
    pub fn paint(&mut self) -> Result<()> {
        let frame = self.renderer.render(self.matrix, self.region);
        self.driver
            .present(&frame)
            .context("Failed to present frame")?;
        self.paints += 1;
        Ok(())
    }

    /// Handles events until the window is closed.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.driver.next_event()? {
                DisplayEvent::Expose => self.paint()?,
                DisplayEvent::Resize {
                    width_px,
                    height_px,
                } => {
                    debug!(
                        "DisplayShell: window now {}x{}, keeping draw region {}x{}",
                        width_px, height_px, self.region.width, self.region.height
                    );
                }
                DisplayEvent::CloseRequested => {
                    info!("DisplayShell: close requested after {} paints", self.paints);
                    return Ok(());
                }
            }
        }
    }
}
