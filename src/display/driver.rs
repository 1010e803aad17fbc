// src/display/driver.rs
//! DisplayDriver trait - the few platform primitives the display shell needs.
//!
//! ## Lifecycle
//! 1. Construction - connect, create and map the window, discover its client area
//! 2. `set_title` / `next_event` / `present` - driven by `DisplayShell`
//! 3. `Drop` - release window and connection (no explicit shutdown call)

use crate::display::messages::DisplayEvent;
use crate::raster::{DrawRegion, Framebuffer};
use anyhow::Result;

/// Minimal platform-specific display interface.
///
/// Implementations stay RISC-style: all rendering happens before `present`,
/// drivers only move finished pixels to the screen and report events.
pub trait DisplayDriver {
    /// Pixel area available for rendering, from the window's client area.
    fn draw_region(&self) -> DrawRegion;

    /// Sets the window title.
    fn set_title(&mut self, title: &str) -> Result<()>;

    /// Blocks until the next event the shell cares about.
    fn next_event(&mut self) -> Result<DisplayEvent>;

    /// Copies `frame` to the window, top-left aligned.
    fn present(&mut self, frame: &Framebuffer) -> Result<()>;
}
