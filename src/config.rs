// src/config.rs

//! Defines the configuration structures for the display surface.
//!
//! The structs deserialize from a JSON file. Every field has a default, so a
//! partial file (or no file at all) is valid. The surface itself never reads
//! the global `CONFIG`; callers take a `LinkSettings` snapshot per event.

use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Process-wide default configuration.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::default);

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration of the display surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Hyperlink behavior.
    pub links: LinkConfig,
    /// Status line behavior.
    pub status: StatusConfig,
}

impl Config {
    /// Reads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Reads `path` if given, falling back to the defaults when it is absent
    /// or unreadable.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                warn!("{:#}; using default configuration", e);
                CONFIG.clone()
            }),
            None => {
                info!("No config file given; using default configuration");
                CONFIG.clone()
            }
        }
    }

    /// The per-event settings snapshot handed to the surface.
    pub fn link_settings(&self) -> LinkSettings {
        LinkSettings {
            links_enabled: self.links.enable_links,
            highlight_links: self.links.highlight_links,
            show_alt_text: self.status.show_alt_text,
        }
    }
}

// --- Link Configuration ---

/// Defines how hyperlinks in game output behave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Follow links on click. When off, links are plain text: no hand
    /// cursor, no status hint, no command dispatch.
    pub enable_links: bool,
    /// Draw links in their hover/clicked colors while tracked.
    pub highlight_links: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            enable_links: true,
            highlight_links: true,
        }
    }
}

// --- Status Line Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Show an object's ALT text in the status line while hovering it.
    pub show_alt_text: bool,
}

impl Default for StatusConfig {
    fn default() -> Self {
        StatusConfig {
            show_alt_text: true,
        }
    }
}

/// Read-only snapshot of the settings the surface consults while handling
/// one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSettings {
    pub links_enabled: bool,
    pub highlight_links: bool,
    pub show_alt_text: bool,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Config::default().link_settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn defaults_enable_links_and_highlighting() {
        let settings = LinkSettings::default();
        assert!(settings.links_enabled);
        assert!(settings.highlight_links);
        assert!(settings.show_alt_text);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "links": { "highlight_links": false } }"#).unwrap();
        assert!(config.links.enable_links);
        assert!(!config.links.highlight_links);
        assert!(config.status.show_alt_text);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(Some(Path::new("/nonexistent/tads-display.json")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = std::env::temp_dir().join(format!("tads-display-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        fs::write(&path, "{ links: ").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
        let _ = fs::remove_dir_all(&dir);
    }
}
