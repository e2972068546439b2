// src/display/mod.rs
//! The formatter side of the display.
//!
//! - Formatter: owns the display tree, maps pixels to text offsets, paints
//! - Handles: opaque `ObjectId`/`LinkId` references into the tree
//! - Drivers: concrete formatters (currently the in-memory headless one)

pub mod drivers;
pub mod formatter;

pub use drivers::HeadlessFormatter;
pub use formatter::{
    DisplayLink, Formatter, LinkId, LinkMode, ObjectId, TextOffset, TreeVersion,
};
