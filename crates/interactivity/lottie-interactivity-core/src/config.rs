//! Declarative configuration: player options and interactivity engine config.

use serde::{Deserialize, Serialize};

use crate::actions::{self, Action, RawAction};
use crate::error::ConfigError;
use crate::frame_range::FrameRange;
use crate::state::Direction;

/// Options applied when the renderer reports ready.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerOptions {
    /// Start playing as soon as the animation is ready.
    pub autoplay: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub direction: Direction,
    /// Segment to play instead of the whole timeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_segment: Option<FrameRange>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            looping: true,
            direction: Direction::Forward,
            initial_segment: None,
        }
    }
}

impl PlayerOptions {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Which ambient signal drives the animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    Scroll,
    Cursor,
    Hover,
    Click,
}

impl InteractionMode {
    /// Spatial modes produce a continuous position matched against
    /// visibility intervals.
    #[inline]
    pub fn is_spatial(&self) -> bool {
        matches!(self, Self::Scroll | Self::Cursor)
    }

    /// Event-counted modes fire once per discrete event.
    #[inline]
    pub fn is_event_counted(&self) -> bool {
        !self.is_spatial()
    }
}

/// Cursor projection: one axis as a scalar, or both as a pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CursorAxis {
    X,
    Y,
    #[default]
    Both,
}

/// What a click beyond the last configured action does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClickOverflow {
    /// Start over from the first action.
    #[default]
    Wrap,
    /// Keep re-triggering the last action.
    Clamp,
    /// Do nothing.
    Ignore,
}

/// Interactivity configuration owned by one engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEngineConfig")]
pub struct EngineConfig {
    pub mode: InteractionMode,
    pub actions: Vec<Action>,
    /// Host reference to a custom scroll container; the core only carries it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// Scroll reference line, as a fraction of the viewport height above its
    /// bottom edge.
    pub offset: f32,
    pub axis: CursorAxis,
    pub click_overflow: ClickOverflow,
}

impl EngineConfig {
    pub fn new(mode: InteractionMode, actions: Vec<Action>) -> Self {
        Self {
            mode,
            actions,
            container: None,
            offset: 0.0,
            axis: CursorAxis::default(),
            click_overflow: ClickOverflow::default(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawEngineConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::try_from(raw)
    }

    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_axis(mut self, axis: CursorAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_click_overflow(mut self, policy: ClickOverflow) -> Self {
        self.click_overflow = policy;
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    /// Check every invariant of the action list and mode settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.offset) {
            return Err(ConfigError::InvalidOffset(self.offset));
        }
        actions::validate(self.mode, &self.actions)
    }
}

/// Wire shape of [`EngineConfig`]; action kinds stay strings until validated
/// so unknown kinds can be reported with their index.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEngineConfig {
    pub mode: InteractionMode,
    #[serde(default)]
    pub actions: Vec<RawAction>,
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default)]
    pub offset: f32,
    #[serde(default)]
    pub axis: CursorAxis,
    #[serde(default)]
    pub click_overflow: ClickOverflow,
}

impl TryFrom<RawEngineConfig> for EngineConfig {
    type Error = ConfigError;

    fn try_from(raw: RawEngineConfig) -> Result<Self, Self::Error> {
        let actions = raw
            .actions
            .into_iter()
            .enumerate()
            .map(|(index, a)| Action::from_raw(index, a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            mode: raw.mode,
            actions,
            container: raw.container,
            offset: raw.offset,
            axis: raw.axis,
            click_overflow: raw.click_overflow,
        })
    }
}
