// src/display/drivers/x11.rs
#![allow(non_snake_case)] // Allow non-snake case for X11 types

//! X11 DisplayDriver built directly on Xlib.
//!
//! Features:
//! - One window of the configured preferred size and background
//! - WM_DELETE_WINDOW handling for clean shutdown
//! - Frame presentation via XPutImage from a ZPixmap XImage

use crate::config::WindowConfig;
use crate::display::driver::DisplayDriver;
use crate::display::messages::DisplayEvent;
use crate::raster::{DrawRegion, Framebuffer};
use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, trace, warn};
use std::ffi::CString;
use std::{mem, ptr};

// X11 library imports
use libc::{c_char, c_int, c_uint, c_ulong};
use x11::xlib;

/// Bits per pixel of the 24-bit ZPixmap layout our `0x00RRGGBB` pixels match.
const BITMAP_PAD: c_int = 32;

pub struct X11DisplayDriver {
    display: *mut xlib::Display,
    window: xlib::Window,
    gc: xlib::GC,
    visual: *mut xlib::Visual,
    depth: c_int,
    wm_delete_window: xlib::Atom,
    region: DrawRegion,
    // Set when an Expose arrives while waiting for the window to map.
    pending_expose: bool,
}

impl X11DisplayDriver {
    /// Connects to the X server named by `DISPLAY`, creates and maps the
    /// window, and reads its client area.
    pub fn new(config: &WindowConfig) -> Result<Self> {
        info!(
            "X11DisplayDriver::new() - Creating {}x{} window",
            config.width, config.height
        );

        // SAFETY: Xlib FFI. Every handle used below is checked before use and
        // owned by the returned driver, whose Drop releases it.
        unsafe {
            let display = xlib::XOpenDisplay(ptr::null());
            if display.is_null() {
                bail!("Failed to open X11 display. Is DISPLAY set?");
            }

            let screen = xlib::XDefaultScreen(display);
            let root = xlib::XRootWindow(display, screen);
            let visual = xlib::XDefaultVisual(display, screen);
            let depth = xlib::XDefaultDepth(display, screen);
            if depth < 24 {
                xlib::XCloseDisplay(display);
                bail!("Unsupported X11 visual depth {} (need 24 or 32 bit)", depth);
            }

            // On TrueColor visuals of depth 24 a pixel value is 0xRRGGBB.
            let window = xlib::XCreateSimpleWindow(
                display,
                root,
                0,
                0,
                config.width.max(1) as c_uint,
                config.height.max(1) as c_uint,
                0,
                xlib::XBlackPixel(display, screen),
                config.background.packed() as c_ulong,
            );
            if window == 0 {
                xlib::XCloseDisplay(display);
                bail!("Failed to create X11 window");
            }

            xlib::XSelectInput(
                display,
                window,
                xlib::ExposureMask | xlib::StructureNotifyMask,
            );

            let gc = xlib::XCreateGC(display, window, 0, ptr::null_mut());

            let mut driver = Self {
                display,
                window,
                gc,
                visual,
                depth,
                wm_delete_window: 0,
                region: DrawRegion::sized(config.width, config.height),
                pending_expose: false,
            };
            if gc.is_null() {
                bail!("Failed to create X11 graphics context");
            }

            driver.wm_delete_window = xlib::XInternAtom(
                display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const c_char,
                xlib::False,
            );
            if driver.wm_delete_window != 0 {
                let mut protocols = [driver.wm_delete_window];
                xlib::XSetWMProtocols(display, window, protocols.as_mut_ptr(), 1);
                debug!("WM_PROTOCOLS (WM_DELETE_WINDOW) registered.");
            } else {
                warn!("Failed to get WM_DELETE_WINDOW atom. Window close events might not be received.");
            }

            driver.set_title("langplot")?;
            driver.map_and_measure()?;
            Ok(driver)
        }
    }

    /// Maps the window, waits for the server to confirm, then records the
    /// client area as the draw region.
    fn map_and_measure(&mut self) -> Result<()> {
        // SAFETY: display and window are valid for the lifetime of self.
        unsafe {
            xlib::XMapWindow(self.display, self.window);
            loop {
                let mut event: xlib::XEvent = mem::zeroed();
                xlib::XNextEvent(self.display, &mut event);
                match event.get_type() {
                    xlib::MapNotify => break,
                    xlib::Expose => self.pending_expose = true,
                    other => trace!("Ignoring event type {} while mapping", other),
                }
            }

            let mut attributes: xlib::XWindowAttributes = mem::zeroed();
            if xlib::XGetWindowAttributes(self.display, self.window, &mut attributes) == 0 {
                bail!("XGetWindowAttributes failed for window {}", self.window);
            }
            self.region = DrawRegion::sized(attributes.width as u32, attributes.height as u32);
        }
        info!(
            "X11DisplayDriver: window {} mapped, draw region {}x{}",
            self.window, self.region.width, self.region.height
        );
        Ok(())
    }

    fn convert_event(&mut self, event: &xlib::XEvent) -> Option<DisplayEvent> {
        // SAFETY: each union field is read only for its matching event type.
        unsafe {
            match event.get_type() {
                xlib::Expose => {
                    // Only the last Expose of a batch triggers a repaint.
                    if event.expose.count == 0 {
                        Some(DisplayEvent::Expose)
                    } else {
                        None
                    }
                }
                xlib::ConfigureNotify => Some(DisplayEvent::Resize {
                    width_px: event.configure.width.max(0) as u32,
                    height_px: event.configure.height.max(0) as u32,
                }),
                xlib::ClientMessage => {
                    let atom = event.client_message.data.get_long(0) as xlib::Atom;
                    if atom == self.wm_delete_window {
                        Some(DisplayEvent::CloseRequested)
                    } else {
                        trace!("Ignoring client message with atom {}", atom);
                        None
                    }
                }
                xlib::DestroyNotify if event.destroy_window.window == self.window => {
                    // The server already destroyed it; Drop must not do so again.
                    debug!("X11DisplayDriver: window {} destroyed externally", self.window);
                    self.window = 0;
                    Some(DisplayEvent::CloseRequested)
                }
                _ => None,
            }
        }
    }
}

impl DisplayDriver for X11DisplayDriver {
    fn draw_region(&self) -> DrawRegion {
        self.region
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        let c_title = CString::new(title).context("Window title contains a NUL byte")?;
        // SAFETY: display and window are valid; Xlib copies the string.
        unsafe {
            xlib::XStoreName(self.display, self.window, c_title.as_ptr());
            xlib::XFlush(self.display);
        }
        debug!("X11DisplayDriver: title set to '{}'", title);
        Ok(())
    }

    fn next_event(&mut self) -> Result<DisplayEvent> {
        if mem::take(&mut self.pending_expose) {
            return Ok(DisplayEvent::Expose);
        }
        loop {
            // SAFETY: XNextEvent blocks until it fills `event`.
            let event = unsafe {
                let mut event: xlib::XEvent = mem::zeroed();
                xlib::XNextEvent(self.display, &mut event);
                event
            };
            if let Some(display_event) = self.convert_event(&event) {
                trace!("X11DisplayDriver: event {:?}", display_event);
                return Ok(display_event);
            }
        }
    }

    fn present(&mut self, frame: &Framebuffer) -> Result<()> {
        if frame.width() == 0 || frame.height() == 0 {
            debug!("X11DisplayDriver: empty frame, nothing to present");
            return Ok(());
        }
        trace!(
            "X11DisplayDriver: presenting {}x{} frame",
            frame.width(),
            frame.height()
        );

        // SAFETY: the XImage borrows the frame's pixels only until
        // XDestroyImage below, and its data pointer is cleared first so Xlib
        // never frees memory it does not own. XPutImage only reads the data.
        unsafe {
            let image = xlib::XCreateImage(
                self.display,
                self.visual,
                self.depth as c_uint,
                xlib::ZPixmap,
                0,
                frame.pixels().as_ptr() as *mut c_char,
                frame.width() as c_uint,
                frame.height() as c_uint,
                BITMAP_PAD,
                0, // bytes_per_line (auto-calculate)
            );
            if image.is_null() {
                return Err(anyhow!("Failed to create XImage"));
            }
            // Pixels are native-endian u32s; Xlib swaps if the server differs.
            (*image).byte_order = if cfg!(target_endian = "little") {
                xlib::LSBFirst
            } else {
                xlib::MSBFirst
            };

            xlib::XPutImage(
                self.display,
                self.window,
                self.gc,
                image,
                0,
                0,
                0,
                0,
                frame.width() as c_uint,
                frame.height() as c_uint,
            );

            (*image).data = ptr::null_mut();
            xlib::XDestroyImage(image);

            xlib::XFlush(self.display);
        }
        Ok(())
    }
}

impl Drop for X11DisplayDriver {
    fn drop(&mut self) {
        info!("X11DisplayDriver::drop() - Cleaning up");
        // SAFETY: handles were created in `new` and are released exactly once.
        unsafe {
            if !self.gc.is_null() {
                xlib::XFreeGC(self.display, self.gc);
            }
            if self.window != 0 {
                xlib::XDestroyWindow(self.display, self.window);
            }
            if !self.display.is_null() {
                let status = xlib::XCloseDisplay(self.display);
                if status != 0 {
                    warn!("XCloseDisplay returned non-zero status: {}", status);
                }
            }
        }
        info!("X11DisplayDriver::drop() - Cleanup complete");
    }
}
