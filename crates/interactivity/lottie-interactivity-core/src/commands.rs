//! Command contract for the playback state machine.
//!
//! Both the imperative control surface and the interactivity engine speak
//! this type; the player applies it through one total entry point.

use serde::{Deserialize, Serialize};

use crate::frame_range::FrameRange;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Play,
    Pause,
    Stop,
    Seek {
        frame: f32,
    },
    SeekRange {
        range: FrameRange,
        continue_playing: bool,
    },
    ToggleLoop,
    SetLoop {
        looping: bool,
    },
    ChangeDirection,
}

impl Command {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Seek { .. } => "seek",
            Self::SeekRange { .. } => "seek_range",
            Self::ToggleLoop => "toggle_loop",
            Self::SetLoop { .. } => "set_loop",
            Self::ChangeDirection => "change_direction",
        }
    }
}

/// What happened to a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandOutcome {
    /// State and/or renderer were updated.
    Applied,
    /// Valid, but already in effect; the renderer was not called.
    Suppressed,
    /// The player is `Loading` or `Failure`.
    Rejected,
}
