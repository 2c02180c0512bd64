//! Control-surface logic: the progress scrubber and overlay/control
//! visibility. Rendering those controls is the host's job.

use serde::{Deserialize, Serialize};

use crate::commands::CommandOutcome;
use crate::player::PlaybackStateMachine;
use crate::state::PlaybackState;

/// A seek request coming from the scrubber.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrubEvent {
    pub frame: f32,
    /// `false` for live preview while dragging, `true` once the drag is
    /// committed.
    pub drag_ended: bool,
}

/// Progress bar state over `[0, total_frames]` in whole-frame steps.
#[derive(Clone, Debug, Default)]
pub struct Scrubber {
    selected: Option<f32>,
}

impl Scrubber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame currently held by an in-progress drag.
    #[inline]
    pub fn selected(&self) -> Option<f32> {
        self.selected
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.selected.is_some()
    }

    /// Slider value changed.
    pub fn on_input(&mut self, frame: f32) -> ScrubEvent {
        let frame = frame.round();
        self.selected = Some(frame);
        ScrubEvent {
            frame,
            drag_ended: false,
        }
    }

    /// Pointer released. Emits the committed frame once, then clears.
    pub fn on_release(&mut self) -> Option<ScrubEvent> {
        self.selected.take().map(|frame| ScrubEvent {
            frame,
            drag_ended: true,
        })
    }

    /// Forward a scrub event to the player.
    pub fn apply(event: &ScrubEvent, player: &mut PlaybackStateMachine) -> CommandOutcome {
        player.seek(event.frame)
    }

    /// Slider value to display: the drag position while dragging, otherwise
    /// the player's frame.
    pub fn display_frame(&self, current_frame: f32) -> f32 {
        self.selected.unwrap_or(current_frame)
    }
}

/// Built-in control elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlElement {
    PlayPause,
    Stop,
    Progress,
    Loop,
    Direction,
}

impl ControlElement {
    pub const ALL: [ControlElement; 5] = [
        ControlElement::PlayPause,
        ControlElement::Stop,
        ControlElement::Progress,
        ControlElement::Loop,
        ControlElement::Direction,
    ];
}

/// `controls` prop: off, every default element, or an explicit list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Controls {
    Enabled(bool),
    Elements(Vec<ControlElement>),
}

impl Default for Controls {
    fn default() -> Self {
        Controls::Enabled(false)
    }
}

impl Controls {
    fn elements(&self) -> Vec<ControlElement> {
        match self {
            Controls::Enabled(true) => ControlElement::ALL.to_vec(),
            Controls::Elements(list) => list.clone(),
            Controls::Enabled(false) => Vec::new(),
        }
    }
}

/// What the host should mount for the current state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromeLayout {
    pub loading_overlay: bool,
    pub failure_overlay: bool,
    pub controls: Vec<ControlElement>,
}

pub struct Chrome;

impl Chrome {
    pub fn layout(state: PlaybackState, controls: &Controls) -> ChromeLayout {
        ChromeLayout {
            loading_overlay: state == PlaybackState::Loading,
            failure_overlay: state == PlaybackState::Failure,
            controls: if state.accepts_commands() {
                controls.elements()
            } else {
                Vec::new()
            },
        }
    }
}
