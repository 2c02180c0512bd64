//! Notification contract produced by the playback state machine.
//!
//! Every notification carries a full snapshot so a subscriber never has to
//! query the player back, plus the cause that produced it.

use serde::{Deserialize, Serialize};

use crate::commands::{Command, CommandOutcome};
use crate::frame_range::FrameRange;
use crate::state::{Direction, PlaybackState};

/// Observable player state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub state: PlaybackState,
    pub total_frames: f32,
    pub direction: Direction,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub current_frame: f32,
    /// Segment bounding autonomous playback, if one was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<FrameRange>,
}

/// Why a notification was sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cause {
    /// A command was attempted. Rejected commands are reported too so the UI
    /// can reflect the intent.
    Command {
        command: Command,
        outcome: CommandOutcome,
    },
    Loading,
    Ready,
    Failed {
        reason: String,
    },
    EnterFrame,
    Complete,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub snapshot: PlayerSnapshot,
    pub cause: Cause,
}

impl Notification {
    /// The attempted command, if this notification was caused by one.
    pub fn command(&self) -> Option<(&Command, CommandOutcome)> {
        match &self.cause {
            Cause::Command { command, outcome } => Some((command, *outcome)),
            _ => None,
        }
    }
}
