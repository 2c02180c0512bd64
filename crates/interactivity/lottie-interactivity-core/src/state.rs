//! Playback lifecycle state and the transition table.

use serde::{Deserialize, Serialize};

use crate::commands::Command;

/// Lifecycle state of one animation player. `Loading` is always initial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Animation data requested, renderer not ready yet
    Loading,
    /// Renderer is advancing frames
    Playing,
    /// Holding the current frame
    Paused,
    /// Halted at the start of the active segment
    Stopped,
    /// Renderer failed to load or render; only a reload leaves this state
    Failure,
}

impl PlaybackState {
    /// Get the name of this playback state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Failure => "failure",
        }
    }

    /// Commands are only executed once the renderer is ready and healthy.
    #[inline]
    pub fn accepts_commands(&self) -> bool {
        !matches!(self, Self::Loading | Self::Failure)
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Playback direction as understood by the renderer (`1` or `-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "i8", into = "i8")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    #[inline]
    pub fn sign(&self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }

    #[inline]
    pub fn flipped(&self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Self::Forward),
            -1 => Ok(Self::Reverse),
            other => Err(format!("direction must be 1 or -1, got {other}")),
        }
    }
}

impl From<Direction> for i8 {
    fn from(d: Direction) -> Self {
        d.sign()
    }
}

/// Next state for every (state, command) pair.
///
/// `Loading` and `Failure` absorb all commands; lifecycle hooks (ready,
/// failure, reload) are not commands and are handled by the player directly.
pub fn next_state(state: PlaybackState, command: &Command) -> PlaybackState {
    use PlaybackState::*;
    if !state.accepts_commands() {
        return state;
    }
    match command {
        Command::Play => Playing,
        Command::Pause => match state {
            Playing => Paused,
            other => other,
        },
        Command::Stop => Stopped,
        Command::Seek { .. } => Paused,
        Command::SeekRange {
            continue_playing, ..
        } => {
            if *continue_playing {
                Playing
            } else {
                Paused
            }
        }
        Command::ToggleLoop | Command::SetLoop { .. } | Command::ChangeDirection => state,
    }
}
