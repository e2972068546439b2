// src/command.rs
//
// Defines the command sink the surface hands followed links to.

use serde::{Deserialize, Serialize};

/// Where a command submitted to the game came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandOrigin {
    /// A followed hyperlink.
    Link,
    /// A line typed by the player.
    Keyboard,
}

/// Receives game commands, typically the game window's input line.
pub trait CommandDispatcher {
    /// Submits `text`. With `append` set it is added to the current input
    /// instead of replacing it; with `auto_enter` unset it is left for the
    /// player to edit and confirm.
    fn process_command(&mut self, text: &str, append: bool, auto_enter: bool, origin: CommandOrigin);
}
