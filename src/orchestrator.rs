// src/orchestrator.rs
//! Drives a `DisplaySurface` from a replay script, standing in for the host
//! toolkit's event loop. Owns the headless formatter and the recording chrome
//! and dispatcher, and turns what they record into a readable transcript.

use crate::{
    command::{CommandDispatcher, CommandOrigin},
    config::Config,
    display::drivers::HeadlessFormatter,
    display::Formatter,
    mock::{ChromeCall, RecordingChrome, RecordingDispatcher},
    script::{Script, ScriptStep},
    surface::{DisplaySurface, SurfaceContext},
};
use log::{debug, info};

/// Represents the status of the orchestrator after processing a step.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OrchestratorStatus {
    /// More steps remain.
    Running,
    /// The script is exhausted.
    Finished,
}

pub struct ScriptOrchestrator {
    steps: std::vec::IntoIter<ScriptStep>,
    config: Config,
    surface: DisplaySurface,
    formatter: HeadlessFormatter,
    chrome: RecordingChrome,
    dispatcher: RecordingDispatcher,
    transcript: Vec<String>,
}

impl ScriptOrchestrator {
    pub fn new(script: Script, config: Config) -> Self {
        info!("ScriptOrchestrator: {} steps", script.steps.len());
        Self {
            formatter: HeadlessFormatter::new(&script.page),
            steps: script.steps.into_iter(),
            config,
            surface: DisplaySurface::new(),
            chrome: RecordingChrome::new(),
            dispatcher: RecordingDispatcher::new(),
            transcript: Vec::new(),
        }
    }

    /// Processes the next step of the script.
    pub fn process_step(&mut self) -> OrchestratorStatus {
        let Some(step) = self.steps.next() else {
            return OrchestratorStatus::Finished;
        };
        let commands_before = self.dispatcher.commands().len();

        match step {
            ScriptStep::Reflow { reflow } => {
                self.formatter.rebuild(&reflow);
                self.transcript
                    .push(format!("reflow: {:?}", self.formatter.tree_version()));
            }
            ScriptStep::Configure { configure } => {
                debug!("settings now {:?}", configure);
                self.config = configure;
            }
            ScriptStep::Input { input } => {
                self.dispatcher
                    .process_command(&input, false, true, CommandOrigin::Keyboard);
            }
            ScriptStep::Event(event) => {
                let mut ctx = SurfaceContext::new(
                    &mut self.formatter,
                    &mut self.chrome,
                    &mut self.dispatcher,
                    self.config.link_settings(),
                );
                self.surface.handle_event(&mut ctx, &event);
            }
        }

        for call in self.chrome.take_calls() {
            match call {
                ChromeCall::SetCursor(shape) => self.transcript.push(format!("cursor: {:?}", shape)),
                ChromeCall::ResetCursor => self.transcript.push("cursor: default".to_string()),
                ChromeCall::ShowStatus(text) => self.transcript.push(format!("status: {}", text)),
                ChromeCall::ClearStatus => self.transcript.push("status: (cleared)".to_string()),
                // Batch brackets are invisible to the player.
                ChromeCall::StatusUpdates(_) => {}
            }
        }
        for cmd in &self.dispatcher.commands()[commands_before..] {
            self.transcript.push(format!(
                "command: '{}' append={} auto_enter={} ({:?})",
                cmd.text, cmd.append, cmd.auto_enter, cmd.origin
            ));
        }

        OrchestratorStatus::Running
    }

    /// Runs every remaining step.
    pub fn run(&mut self) {
        while self.process_step() == OrchestratorStatus::Running {}
        let (start, end) = self.formatter.selection();
        if start != end {
            self.transcript.push(format!("selection: {}..{}", start, end));
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn dispatcher(&self) -> &RecordingDispatcher {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::DispatchedCommand;
    use test_log::test;

    const SCRIPT: &str = r#"{
        "page": {
            "links": [ { "id": 1, "href": "open door" } ],
            "items": [
                { "rect": { "left": 0, "top": 0, "right": 40, "bottom": 10 }, "text": "A " },
                { "rect": { "left": 40, "top": 0, "right": 80, "bottom": 10 }, "text": "door", "link": 1 }
            ]
        },
        "steps": [
            { "kind": "mouse_move", "pos": { "x": 50, "y": 5 } },
            { "kind": "mouse_press", "pos": { "x": 50, "y": 5 }, "buttons": "LEFT" },
            { "kind": "mouse_release", "pos": { "x": 50, "y": 5 } },
            { "input": "wait" },
            { "reflow": { "items": [] } },
            { "kind": "mouse_move", "pos": { "x": 50, "y": 5 } },
            { "kind": "mouse_leave" }
        ]
    }"#;

    #[test]
    fn replay_follows_link_and_records_transcript() {
        let script = Script::parse(SCRIPT).unwrap();
        let mut orchestrator = ScriptOrchestrator::new(script, Config::default());
        orchestrator.run();

        assert_eq!(
            orchestrator.dispatcher().commands(),
            &[
                DispatchedCommand {
                    text: "open door".to_string(),
                    append: false,
                    auto_enter: true,
                    origin: CommandOrigin::Link,
                },
                DispatchedCommand {
                    text: "wait".to_string(),
                    append: false,
                    auto_enter: true,
                    origin: CommandOrigin::Keyboard,
                },
            ]
        );
        let transcript = orchestrator.transcript();
        assert_eq!(transcript[0], "cursor: PointingHand");
        assert_eq!(transcript[1], "status: open door");
        assert!(transcript.iter().any(|l| l.starts_with("reflow:")));
        assert_eq!(transcript.last().map(String::as_str), Some("status: (cleared)"));
    }

    #[test]
    fn disabled_links_never_dispatch() {
        let script = Script::parse(SCRIPT).unwrap();
        let mut config = Config::default();
        config.links.enable_links = false;
        let mut orchestrator = ScriptOrchestrator::new(script, config);
        orchestrator.run();

        assert_eq!(orchestrator.dispatcher().commands().len(), 1);
        assert!(!orchestrator.transcript().iter().any(|l| l.starts_with("cursor: Pointing")));
    }
}
