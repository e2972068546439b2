// src/surface/event.rs

//! Input delivered to the surface by the host toolkit.
//!
//! Each native event is translated into one immutable `SurfaceEvent` value
//! and handed to `DisplaySurface::handle_event` in delivery order.

use crate::geometry::{Point, Rect};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Mouse buttons held down when an event was generated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

impl MouseButtons {
    pub fn left_down(&self) -> bool {
        self.contains(MouseButtons::LEFT)
    }
}

/// One input or paint notification for the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// Part of the surface needs painting.
    Repaint { area: Rect },
    /// Pointer moved within the surface.
    MouseMove {
        pos: Point,
        #[serde(default)]
        buttons: MouseButtons,
    },
    /// A button went down. `buttons` includes the pressed one.
    MousePress {
        pos: Point,
        #[serde(default)]
        buttons: MouseButtons,
    },
    /// A button went up.
    MouseRelease {
        pos: Point,
        #[serde(default)]
        buttons: MouseButtons,
    },
    /// Pointer left the surface.
    MouseLeave,
    /// Re-run hit testing, at `pos` or at the host's current pointer position.
    RefreshLinks {
        #[serde(default)]
        pos: Option<Point>,
    },
    /// The formatter rebuilt its display tree.
    TreeRebuilt,
}
