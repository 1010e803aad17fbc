// src/raster.rs

//! Rasterization of a matrix into a pixel buffer.
//!
//! Every cell becomes a filled rectangle. Cell sizes are fractional; each
//! rectangle starts at the floor of its origin and spans the ceiling of the
//! cell size, so neighbouring cells may overlap by a pixel but never leave a gap.

use crate::gradient::Gradient;
use crate::matrix::NamedMatrix;
use log::{debug, trace};

/// The pixel rectangle rendering is confined to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DrawRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A region covering a `width` x `height` surface from its origin.
    pub fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// Row-major buffer of `0x00RRGGBB` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    /// Creates a buffer filled with black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: u32) {
        self.pixels[y * self.width + x] = pixel;
    }

    /// Fills a rectangle, clipping whatever falls outside the buffer.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, pixel: u32) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }
        for row in y..y_end {
            let start = row * self.width;
            self.pixels[start + x..start + x_end].fill(pixel);
        }
    }
}

/// Draws `matrix` as a grid of colored cells into a buffer the size of `region`.
///
/// The cell origin is offset by `region.x` / `region.y` inside the buffer, the
/// same way a fill into a larger surface would be. Cells missing from short
/// rows stay black.
pub fn rasterize(matrix: &NamedMatrix, region: DrawRegion, gradient: &Gradient) -> Framebuffer {
    let mut frame = Framebuffer::new(region.width as usize, region.height as usize);
    let n = matrix.dimension();
    if n == 0 {
        debug!("Matrix '{}' is empty; nothing to rasterize", matrix.language());
        return frame;
    }

    let cell_w = region.width as f64 / n as f64;
    let cell_h = region.height as f64 / n as f64;
    let rect_w = cell_w.ceil() as usize;
    let rect_h = cell_h.ceil() as usize;
    let max_value = matrix.max_value();
    trace!(
        "Rasterizing '{}': {}x{} cells of {:.2}x{:.2}px",
        matrix.language(),
        n,
        n,
        cell_w,
        cell_h
    );

    let mut missing = 0usize;
    for x in 0..n {
        for y in 0..n {
            let Some(value) = matrix.value(y, x) else {
                missing += 1;
                continue;
            };
            let pixel = gradient.color_of(value / max_value);
            let px = region.x as usize + (x as f64 * cell_w).floor() as usize;
            let py = region.y as usize + (y as f64 * cell_h).floor() as usize;
            frame.fill_rect(px, py, rect_w, rect_h, pixel);
        }
    }
    if missing > 0 {
        debug!(
            "Matrix '{}' is not square; {} cells left unpainted",
            matrix.language(),
            missing
        );
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(lines: &[&str]) -> NamedMatrix {
        NamedMatrix::build("test", lines).unwrap()
    }

    #[test_log::test]
    fn output_matches_region_for_any_size() {
        let gradient = Gradient::default();
        let region = DrawRegion::sized(37, 53);
        for lines in [
            vec![],
            vec!["a=1\t0"],
            vec!["a=1\t0 1", "b=2\t1 0"],
            vec!["a=1\t0 1 2", "b=2\t1 0 2", "c=3\t2 1 0"],
        ] {
            let frame = rasterize(&matrix(&lines), region, &gradient);
            assert_eq!((frame.width(), frame.height()), (37, 53));
            assert_eq!(frame.pixels().len(), 37 * 53);
        }
    }

    #[test_log::test]
    fn cells_are_colored_by_value_over_max() {
        let gradient = Gradient::default();
        let m = matrix(&["a=1\t0 1", "b=2\t1 0"]);
        let frame = rasterize(&m, DrawRegion::sized(4, 4), &gradient);

        // Off-diagonal cells hold the maximum, diagonal cells hold zero.
        assert_eq!(frame.pixel(0, 0), 0x000000);
        assert_eq!(frame.pixel(3, 0), 0x00FF00);
        assert_eq!(frame.pixel(0, 3), 0x00FF00);
        assert_eq!(frame.pixel(3, 3), 0x000000);
    }

    #[test_log::test]
    fn column_index_reads_x_and_row_index_reads_y() {
        let gradient = Gradient::new(Gradient::default().stops().to_vec(), 1.0).unwrap();
        let m = matrix(&["a=1\t0 1", "b=2\t0.5 0"]);
        let frame = rasterize(&m, DrawRegion::sized(2, 2), &gradient);
        assert_eq!(frame.pixel(1, 0), 0x00FF00);
        assert_eq!(frame.pixel(0, 1), 0x007F00);
    }

    #[test_log::test]
    fn fractional_cells_leave_no_gaps() {
        let gradient = Gradient::default();
        let m = matrix(&["a=1\t1 1 1", "b=2\t1 1 1", "c=3\t1 1 1"]);
        let frame = rasterize(&m, DrawRegion::sized(10, 10), &gradient);
        assert!(frame.pixels().iter().all(|&p| p == 0x00FF00));
    }

    #[test_log::test]
    fn region_offset_shifts_cells_inside_the_buffer() {
        let gradient = Gradient::default();
        let m = matrix(&["a=1\t1"]);
        let frame = rasterize(&m, DrawRegion::new(2, 1, 4, 4), &gradient);
        assert_eq!(frame.pixel(0, 0), 0x000000);
        assert_eq!(frame.pixel(1, 3), 0x000000);
        assert_eq!(frame.pixel(2, 1), 0x00FF00);
        assert_eq!(frame.pixel(3, 3), 0x00FF00);
    }

    #[test_log::test]
    fn short_rows_leave_cells_black() {
        let gradient = Gradient::default();
        let m = matrix(&["a=1\t0 1", "b=2\t1"]);
        let frame = rasterize(&m, DrawRegion::sized(2, 2), &gradient);
        assert_eq!(frame.pixel(0, 1), 0x00FF00);
        assert_eq!(frame.pixel(1, 1), 0x000000);
    }

    #[test_log::test]
    fn fill_rect_clips() {
        let mut frame = Framebuffer::new(3, 3);
        frame.fill_rect(2, 2, 5, 5, 7);
        frame.fill_rect(9, 0, 1, 1, 9);
        assert_eq!(frame.pixels().iter().filter(|&&p| p == 7).count(), 1);
        assert!(frame.pixels().iter().all(|&p| p != 9));
    }
}
