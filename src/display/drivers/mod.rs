// src/display/drivers/mod.rs
//! Platform-specific display driver implementations.

#[cfg(test)]
pub mod mock;
pub mod x11;

#[cfg(test)]
pub use mock::MockDisplayDriver;
pub use x11::X11DisplayDriver;
