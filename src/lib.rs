// src/lib.rs

//! Hypertext display surface for a TADS game player.
//!
//! The surface turns pointer input into link hover/click tracking, drag
//! selection, cursor shapes, status-line hints and game commands, on top of
//! an external formatter that owns the laid-out display tree.

pub mod chrome;
pub mod command;
pub mod config;
pub mod display;
pub mod geometry;
pub mod mock;
pub mod orchestrator;
pub mod script;
pub mod surface;

pub use surface::{DisplaySurface, SurfaceContext, SurfaceEvent, TrackingState};
