// src/display/formatter.rs
//! Formatter trait - the interface the surface drives for layout queries and painting.
//!
//! The formatter owns the display tree. Everything the surface keeps about
//! that tree is a plain handle (`ObjectId`, `LinkId`) that is only meaningful
//! for the tree version it was obtained from.
//!
//! ## Lifecycle
//! 1. The formatter lays out game output and publishes a `TreeVersion`
//! 2. The surface hit-tests and records handles
//! 3. On reflow the formatter rebuilds its tree and bumps the version
//! 4. The surface sees the new version before its next event and forgets
//!    every handle it held, without dereferencing any of them

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle to a display object in the formatter's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Handle to a link in the formatter's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(pub u32);

/// Character offset into the formatter's text stream.
pub type TextOffset = u64;

/// Monotonic counter identifying one build of the display tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TreeVersion(pub u64);

impl TreeVersion {
    pub fn next(self) -> Self {
        TreeVersion(self.0.wrapping_add(1))
    }
}

/// Visual state of a link's display items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    #[default]
    None,
    Hover,
    Clicked,
}

/// Read-only view of a link the formatter owns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayLink {
    /// The game command the link runs when followed.
    pub href: String,
    /// Append the command to the current input line instead of replacing it.
    pub append: bool,
    /// Leave the command in the input line for the player to confirm.
    pub no_enter: bool,
    /// Links can be decorative only (e.g. `<a>` without an href target).
    #[serde(default = "default_clickable")]
    pub clickable: bool,
}

fn default_clickable() -> bool {
    true
}

impl DisplayLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            append: false,
            no_enter: false,
            clickable: true,
        }
    }

    pub fn is_clickable_link(&self) -> bool {
        self.clickable
    }
}

/// The layout engine interface consumed by `DisplaySurface`.
///
/// Implementations are expected to validate their own inputs; every query
/// that can miss returns an `Option` and the surface treats a miss as a
/// normal outcome.
pub trait Formatter {
    /// Paints the given area. With `background_only` set only the background
    /// is drawn. `clip` restricts painting to a single object when present.
    fn draw(&mut self, area: &Rect, background_only: bool, clip: Option<ObjectId>);

    /// Text offset of the character nearest to `pos`.
    fn find_text_offset_by_position(&self, pos: Point) -> TextOffset;

    /// Sets the active selection. `start` and `end` may arrive in either order.
    fn set_selection_range(&mut self, start: TextOffset, end: TextOffset);

    /// One past the last valid text offset.
    fn max_text_offset(&self) -> TextOffset;

    /// Display object at `pos`. With `nearest` set, a point in the padding
    /// between objects resolves to the closest object instead of `None`.
    fn find_display_object_at(&self, pos: Point, nearest: bool) -> Option<ObjectId>;

    /// Link covering the exact point within `object`, if any.
    fn link_at(&self, object: ObjectId, pos: Point) -> Option<LinkId>;

    /// Describing text attached to `object` (e.g. an image's ALT attribute).
    fn alt_text(&self, object: ObjectId) -> Option<&str>;

    fn link(&self, link: LinkId) -> Option<&DisplayLink>;

    /// Switches the visual mode of every display item belonging to `link`
    /// and schedules a redraw of them.
    fn set_link_mode(&mut self, link: LinkId, mode: LinkMode);

    /// Current build of the display tree.
    fn tree_version(&self) -> TreeVersion;
}
