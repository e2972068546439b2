// src/chrome.rs
//
// Host window chrome: the pointer cursor and the status line. Both are
// window-group-wide resources owned by the host; the surface only drives them.

use crate::geometry::Point;
use log::trace;
use serde::{Deserialize, Serialize};

/// Pointer shapes the surface asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorShape {
    #[default]
    Arrow,
    PointingHand,
}

/// Cursor and status-line services of the host window group.
pub trait HostChrome {
    /// Sets the pointer shape while it is over the surface.
    fn set_cursor(&mut self, shape: CursorShape);

    /// Restores the surface's default pointer shape.
    fn reset_cursor(&mut self);

    fn show_status_message(&mut self, text: &str);

    fn clear_status_message(&mut self);

    /// Pauses (`false`) or resumes (`true`) repainting of the status line.
    /// Use `StatusBatch` rather than calling this directly.
    fn set_status_updates_enabled(&mut self, enabled: bool);

    /// Current pointer position mapped into surface-local coordinates, or
    /// `None` if the host cannot tell.
    fn pointer_position(&self) -> Option<Point>;
}

/// Scoped status-line update.
///
/// Repainting of the status line is paused while the batch lives and resumed
/// when it is dropped, so a compound change never shows an intermediate frame.
pub struct StatusBatch<'a> {
    chrome: &'a mut dyn HostChrome,
}

impl<'a> StatusBatch<'a> {
    pub fn begin(chrome: &'a mut dyn HostChrome) -> Self {
        chrome.set_status_updates_enabled(false);
        Self { chrome }
    }

    pub fn show(&mut self, text: &str) {
        trace!("status: '{}'", text);
        self.chrome.show_status_message(text);
    }

    pub fn clear(&mut self) {
        trace!("status: cleared");
        self.chrome.clear_status_message();
    }
}

impl Drop for StatusBatch<'_> {
    fn drop(&mut self) {
        self.chrome.set_status_updates_enabled(true);
    }
}

/// Replaces the status line with `text` in one batch.
pub fn show_status(chrome: &mut dyn HostChrome, text: &str) {
    StatusBatch::begin(chrome).show(text);
}

/// Clears the status line in one batch.
pub fn clear_status(chrome: &mut dyn HostChrome) {
    StatusBatch::begin(chrome).clear();
}
