// src/display/messages.rs
//! Platform-agnostic display events.

/// Events a `DisplayDriver` reports to the `DisplayShell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    /// (Part of) the window must be repainted.
    Expose,

    /// The window changed size.
    Resize { width_px: u32, height_px: u32 },

    /// User requested window close.
    CloseRequested,
}
