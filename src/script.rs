// src/script.rs

//! Replay scripts for the headless driver.
//!
//! A script is a JSON document holding the initial page and a list of steps.
//! Most steps are plain `SurfaceEvent`s; the rest simulate what the game and
//! the host do around the surface (reflowing the page, changing settings,
//! typing a command).
//!
//! ```json
//! {
//!   "page": { "links": [...], "items": [...] },
//!   "steps": [
//!     { "kind": "mouse_move", "pos": { "x": 60, "y": 5 } },
//!     { "configure": { "links": { "highlight_links": false } } },
//!     { "reflow": { "links": [], "items": [] } }
//!   ]
//! }
//! ```

use crate::config::Config;
use crate::display::drivers::PageSpec;
use crate::surface::SurfaceEvent;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub page: PageSpec,
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// The game produced new output and the formatter rebuilt its tree.
    Reflow { reflow: PageSpec },
    /// The player changed preferences.
    Configure { configure: Config },
    /// The player typed a command at the prompt.
    Input { input: String },
    Event(SurfaceEvent),
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse script {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::surface::MouseButtons;
    use test_log::test;

    #[test]
    fn steps_distinguish_events_from_host_actions() {
        let script = Script::parse(
            r#"{
                "steps": [
                    { "kind": "mouse_press", "pos": { "x": 3, "y": 4 }, "buttons": "LEFT" },
                    { "kind": "mouse_leave" },
                    { "reflow": { "items": [] } },
                    { "configure": { "links": { "enable_links": false } } },
                    { "input": "look" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            script.steps[0],
            ScriptStep::Event(SurfaceEvent::MousePress {
                pos: Point::new(3, 4),
                buttons: MouseButtons::LEFT,
            })
        );
        assert_eq!(script.steps[1], ScriptStep::Event(SurfaceEvent::MouseLeave));
        assert!(matches!(script.steps[2], ScriptStep::Reflow { .. }));
        match &script.steps[3] {
            ScriptStep::Configure { configure } => assert!(!configure.links.enable_links),
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(
            script.steps[4],
            ScriptStep::Input {
                input: "look".to_string()
            }
        );
    }

    #[test]
    fn unknown_event_kind_is_rejected() {
        assert!(Script::parse(r#"{ "steps": [ { "kind": "wiggle" } ] }"#).is_err());
    }
}
