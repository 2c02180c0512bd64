//! Action resolution: position + ordered action table → playback command.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionKind};
use crate::commands::Command;
use crate::config::{ClickOverflow, EngineConfig, InteractionMode};
use crate::error::ConfigError;
use crate::frame_range::FrameRange;
use crate::position::{HoverEvent, Position};

/// Result of resolving one position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedCommand {
    /// Keep whatever is on screen.
    Hold,
    /// Scrub to a frame without starting playback.
    SeekTo { frame: f32 },
    /// Halt on a frame.
    StopAt { frame: f32 },
    /// Replay a segment continuously.
    Loop { range: FrameRange },
    /// Play a segment once, then hold.
    PlayOnce { range: FrameRange },
}

impl ResolvedCommand {
    #[inline]
    pub fn is_hold(&self) -> bool {
        matches!(self, Self::Hold)
    }

    /// Player commands implementing this resolution, in application order.
    pub fn to_commands(&self) -> Vec<Command> {
        match *self {
            Self::Hold => Vec::new(),
            Self::SeekTo { frame } | Self::StopAt { frame } => vec![Command::Seek { frame }],
            Self::Loop { range } => vec![
                Command::SetLoop { looping: true },
                Command::SeekRange {
                    range,
                    continue_playing: true,
                },
            ],
            Self::PlayOnce { range } => vec![
                Command::SetLoop { looping: false },
                Command::SeekRange {
                    range,
                    continue_playing: true,
                },
            ],
        }
    }
}

/// Linear map of `position` inside `visibility` onto `frames`, rounded to a
/// whole frame. A zero-width interval jumps straight to `frames[0]`.
pub fn interpolate_frame(position: f32, visibility: [f32; 2], frames: FrameRange) -> f32 {
    let width = visibility[1] - visibility[0];
    if width <= 0.0 {
        return frames.start();
    }
    let t = ((position - visibility[0]) / width).clamp(0.0, 1.0);
    (frames.start() + t * (frames.end() - frames.start())).round()
}

fn in_interval(p: f32, v: [f32; 2], closed: bool) -> bool {
    p >= v[0] && (p < v[1] || (closed && p <= v[1]))
}

/// Command for an action matched at a continuous position `t`, where `t`
/// is the fraction of the way through the matched window.
fn command_for(action: &Action, t: f32) -> ResolvedCommand {
    match action.kind {
        ActionKind::None => ResolvedCommand::Hold,
        ActionKind::Stop => ResolvedCommand::StopAt {
            frame: action.first_frame(),
        },
        ActionKind::Seek => match action.range() {
            Some(range) => ResolvedCommand::SeekTo {
                frame: interpolate_frame(t, [0.0, 1.0], range),
            },
            None => ResolvedCommand::Hold,
        },
        ActionKind::Loop => action
            .range()
            .map_or(ResolvedCommand::Hold, |range| ResolvedCommand::Loop { range }),
        ActionKind::Play => action
            .range()
            .map_or(ResolvedCommand::Hold, |range| ResolvedCommand::PlayOnce { range }),
    }
}

/// Stateless scan of `actions` for a scalar position.
///
/// Picks the first action whose visibility interval contains `position`
/// (half-open, the last action closed). Non-finite positions hold; finite
/// ones are clamped into [0, 1].
pub fn resolve_progress(position: f32, actions: &[Action]) -> ResolvedCommand {
    match select_interval(position, actions) {
        Some(index) => resolve_at(position, &actions[index]),
        None => ResolvedCommand::Hold,
    }
}

fn select_interval(position: f32, actions: &[Action]) -> Option<usize> {
    if !position.is_finite() {
        return None;
    }
    let p = position.clamp(0.0, 1.0);
    let last = actions.iter().rposition(|a| a.visibility.is_some())?;
    actions.iter().enumerate().find_map(|(i, a)| {
        let v = a.visibility?;
        in_interval(p, v, i == last).then_some(i)
    })
}

fn resolve_at(position: f32, action: &Action) -> ResolvedCommand {
    let p = position.clamp(0.0, 1.0);
    let Some(v) = action.visibility else {
        return ResolvedCommand::Hold;
    };
    if let Some(th) = action.threshold {
        if p < th[0] || p > th[1] {
            return ResolvedCommand::Hold;
        }
    }
    let width = v[1] - v[0];
    let t = if width > 0.0 { (p - v[0]) / width } else { 0.0 };
    command_for(action, t)
}

/// Validated action table for one engine.
#[derive(Clone, Debug)]
pub struct ActionResolver {
    mode: InteractionMode,
    overflow: ClickOverflow,
    actions: Vec<Action>,
}

impl ActionResolver {
    pub fn new(mode: InteractionMode, actions: Vec<Action>) -> Result<Self, ConfigError> {
        crate::actions::validate(mode, &actions)?;
        Ok(Self {
            mode,
            overflow: ClickOverflow::default(),
            actions,
        })
    }

    pub fn from_config(cfg: &EngineConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            mode: cfg.mode,
            overflow: cfg.click_overflow,
            actions: cfg.actions.clone(),
        })
    }

    pub fn with_click_overflow(mut self, overflow: ClickOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    #[inline]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Index of the action selected for `position`, if any.
    pub fn select(&self, position: &Position) -> Option<usize> {
        match *position {
            Position::Pointer { x, y } if x.is_finite() && y.is_finite() => {
                let region = self
                    .actions
                    .iter()
                    .position(|a| a.position.is_some_and(|r| r.contains(x, y)));
                region.or_else(|| {
                    position
                        .scalar()
                        .and_then(|mean| select_interval(mean, &self.actions))
                })
            }
            Position::Progress { value } => select_interval(value, &self.actions),
            Position::Hover { event } => {
                let index = match event {
                    HoverEvent::Enter => 0,
                    HoverEvent::Leave => 1,
                };
                (index < self.actions.len()).then_some(index)
            }
            Position::Clicks { count } => self.click_index(count),
            _ => None,
        }
    }

    fn click_index(&self, count: u32) -> Option<usize> {
        let len = self.actions.len();
        if count == 0 || len == 0 {
            return None;
        }
        let n = (count - 1) as usize;
        match self.overflow {
            ClickOverflow::Wrap => Some(n % len),
            ClickOverflow::Clamp => Some(n.min(len - 1)),
            ClickOverflow::Ignore => (n < len).then_some(n),
        }
    }

    pub fn resolve(&self, position: &Position) -> ResolvedCommand {
        let Some(index) = self.select(position) else {
            debug!("resolve: no action for {position:?}");
            return ResolvedCommand::Hold;
        };
        let action = &self.actions[index];
        match *position {
            Position::Pointer { x, y } => match action.position {
                Some(r) if r.contains(x, y) => {
                    let tx = axis_fraction(x, r.x);
                    let ty = axis_fraction(y, r.y);
                    command_for(action, (tx + ty) * 0.5)
                }
                _ => position
                    .scalar()
                    .map_or(ResolvedCommand::Hold, |mean| resolve_at(mean, action)),
            },
            Position::Progress { value } => resolve_at(value, action),
            // Event-counted: no continuous position, fire the action as-is.
            _ => command_for(action, 0.0),
        }
    }
}

fn axis_fraction(v: f32, bounds: [f32; 2]) -> f32 {
    let w = bounds[1] - bounds[0];
    if w > 0.0 {
        ((v - bounds[0]) / w).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
