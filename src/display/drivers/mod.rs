// src/display/drivers/mod.rs
//! Concrete formatter implementations.

pub mod headless;

pub use headless::{HeadlessFormatter, ItemSpec, LinkSpec, PageSpec};
