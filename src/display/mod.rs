// src/display/mod.rs
//! Window output for rendered heatmaps.
//!
//! - DisplayDriver: platform-specific primitives (X11)
//! - DisplayShell: paint loop that asks the renderer for a frame on every expose
//! - Messages: events a driver reports back to the shell

pub mod driver;
pub mod drivers;
pub mod messages;
pub mod shell;

pub use driver::DisplayDriver;
pub use drivers::X11DisplayDriver;
pub use messages::DisplayEvent;
pub use shell::DisplayShell;
