// src/mock.rs

//! Recording host collaborators.
//!
//! `RecordingChrome` and `RecordingDispatcher` keep every call they receive so
//! tests can assert on exact call sequences, and so the headless driver can
//! print a transcript of what a real host would have shown.

use crate::chrome::{CursorShape, HostChrome};
use crate::command::{CommandDispatcher, CommandOrigin};
use crate::geometry::Point;
use log::info;

/// One call received by `RecordingChrome`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromeCall {
    SetCursor(CursorShape),
    ResetCursor,
    ShowStatus(String),
    ClearStatus,
    StatusUpdates(bool),
}

#[derive(Debug, Default)]
pub struct RecordingChrome {
    calls: Vec<ChromeCall>,
    cursor: CursorShape,
    status: Option<String>,
    updates_enabled: bool,
    /// Returned from `pointer_position`.
    pub pointer: Option<Point>,
}

impl RecordingChrome {
    pub fn new() -> Self {
        Self {
            updates_enabled: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[ChromeCall] {
        &self.calls
    }

    /// Drains the call log, keeping the current state.
    pub fn take_calls(&mut self) -> Vec<ChromeCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn updates_enabled(&self) -> bool {
        self.updates_enabled
    }
}

impl HostChrome for RecordingChrome {
    fn set_cursor(&mut self, shape: CursorShape) {
        self.cursor = shape;
        self.calls.push(ChromeCall::SetCursor(shape));
    }

    fn reset_cursor(&mut self) {
        self.cursor = CursorShape::default();
        self.calls.push(ChromeCall::ResetCursor);
    }

    fn show_status_message(&mut self, text: &str) {
        self.status = Some(text.to_string());
        self.calls.push(ChromeCall::ShowStatus(text.to_string()));
    }

    fn clear_status_message(&mut self) {
        self.status = None;
        self.calls.push(ChromeCall::ClearStatus);
    }

    fn set_status_updates_enabled(&mut self, enabled: bool) {
        self.updates_enabled = enabled;
        self.calls.push(ChromeCall::StatusUpdates(enabled));
    }

    fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }
}

/// A command received by `RecordingDispatcher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedCommand {
    pub text: String,
    pub append: bool,
    pub auto_enter: bool,
    pub origin: CommandOrigin,
}

#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    commands: Vec<DispatchedCommand>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DispatchedCommand] {
        &self.commands
    }
}

impl CommandDispatcher for RecordingDispatcher {
    fn process_command(&mut self, text: &str, append: bool, auto_enter: bool, origin: CommandOrigin) {
        info!(
            "command '{}' (append={}, auto_enter={}, origin={:?})",
            text, append, auto_enter, origin
        );
        self.commands.push(DispatchedCommand {
            text: text.to_string(),
            append,
            auto_enter,
            origin,
        });
    }
}
