//! Declarative interactivity actions and their validation.
//!
//! An action list is validated once, when an engine is built. After that the
//! resolver treats it as an ordered interval table and never re-checks it.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::InteractionMode;
use crate::error::ConfigError;
use crate::frame_range::FrameRange;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Halt on `frames[0]`.
    Stop,
    /// Scrub through `frames` following the position inside the interval.
    Seek,
    /// Replay `frames` as a cycle.
    Loop,
    /// Play `frames` once, then hold.
    Play,
    /// Dead zone.
    None,
}

impl ActionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stop" => Some(Self::Stop),
            "seek" => Some(Self::Seek),
            "loop" => Some(Self::Loop),
            "play" => Some(Self::Play),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Rectangular pointer region, in element-normalized coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerRegion {
    pub x: [f32; 2],
    pub y: [f32; 2],
}

impl PointerRegion {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x[0] && x <= self.x[1] && y >= self.y[0] && y <= self.y[1]
    }

    fn overlaps(&self, other: &PointerRegion) -> bool {
        self.x[0] < other.x[1]
            && other.x[0] < self.x[1]
            && self.y[0] < other.y[1]
            && other.y[0] < self.y[1]
    }

    fn is_valid(&self) -> bool {
        valid_interval(self.x) && valid_interval(self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Window of the position signal in which this action is eligible.
    pub visibility: Option<[f32; 2]>,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub frames: Option<Vec<f32>>,
    /// Narrower window inside `visibility` where the action actually fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<[f32; 2]>,
    /// Cursor mode only: 2-D region matched against both pointer axes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PointerRegion>,
}

impl Action {
    pub fn new(kind: ActionKind, visibility: Option<[f32; 2]>, frames: &[f32]) -> Self {
        Self {
            visibility,
            kind,
            frames: if frames.is_empty() {
                None
            } else {
                Some(frames.to_vec())
            },
            threshold: None,
            position: None,
        }
    }

    /// Action eligible over `visibility`.
    pub fn spatial(kind: ActionKind, visibility: [f32; 2], frames: &[f32]) -> Self {
        Self::new(kind, Some(visibility), frames)
    }

    /// Action for hover/click modes.
    pub fn event(kind: ActionKind, frames: &[f32]) -> Self {
        Self::new(kind, None, frames)
    }

    /// Cursor action eligible inside a pointer region.
    pub fn region(kind: ActionKind, region: PointerRegion, frames: &[f32]) -> Self {
        let mut a = Self::new(kind, None, frames);
        a.position = Some(region);
        a
    }

    pub fn with_threshold(mut self, threshold: [f32; 2]) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// First configured frame. Validation guarantees it exists for every
    /// kind except `none`.
    pub fn first_frame(&self) -> f32 {
        self.frames
            .as_deref()
            .and_then(|f| f.first().copied())
            .unwrap_or(0.0)
    }

    /// Two-endpoint range, if two frames are configured.
    pub fn range(&self) -> Option<FrameRange> {
        match self.frames.as_deref() {
            Some([a, b]) => Some(FrameRange::new(*a, *b)),
            _ => None,
        }
    }

    pub(crate) fn from_raw(index: usize, raw: RawAction) -> Result<Self, ConfigError> {
        let kind = ActionKind::parse(&raw.kind).ok_or_else(|| ConfigError::UnknownActionKind {
            index,
            kind: raw.kind.clone(),
        })?;
        Ok(Self {
            visibility: raw.visibility,
            kind,
            frames: raw.frames,
            threshold: raw.threshold,
            position: raw.position,
        })
    }
}

/// Wire shape of an [`Action`] with the kind left as a string.
#[derive(Clone, Debug, Deserialize)]
pub struct RawAction {
    #[serde(default)]
    pub visibility: Option<[f32; 2]>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub frames: Option<Vec<f32>>,
    #[serde(default)]
    pub threshold: Option<[f32; 2]>,
    #[serde(default)]
    pub position: Option<PointerRegion>,
}

fn valid_interval(v: [f32; 2]) -> bool {
    v[0].is_finite() && v[1].is_finite() && 0.0 <= v[0] && v[0] <= v[1] && v[1] <= 1.0
}

fn check_frames(index: usize, mode: InteractionMode, action: &Action) -> Result<(), ConfigError> {
    let frames = action.frames.as_deref().unwrap_or(&[]);
    let (ok, expected) = match action.kind {
        ActionKind::None => return Ok(()),
        ActionKind::Seek if mode.is_event_counted() => {
            return Err(ConfigError::UnsupportedKind {
                index,
                kind: action.kind,
                mode,
            })
        }
        ActionKind::Seek | ActionKind::Loop | ActionKind::Play => (frames.len() == 2, "exactly 2"),
        ActionKind::Stop => ((1..=2).contains(&frames.len()), "1 or 2"),
    };
    if !ok {
        return Err(ConfigError::FrameCount {
            index,
            kind: action.kind,
            expected: expected.to_string(),
            actual: frames.len(),
        });
    }
    if frames.iter().any(|f| !f.is_finite()) {
        return Err(ConfigError::InvalidFrames { index });
    }
    Ok(())
}

/// Validate an action list for `mode`.
///
/// Spatial intervals must be well-formed, ordered by lower bound, and
/// non-overlapping as half-open intervals (`next.lo >= prev.hi`). Cursor
/// regions must not overlap each other.
pub fn validate(mode: InteractionMode, actions: &[Action]) -> Result<(), ConfigError> {
    let mut prev: Option<[f32; 2]> = None;
    let mut regions: Vec<(usize, PointerRegion)> = Vec::new();

    for (index, action) in actions.iter().enumerate() {
        check_frames(index, mode, action)?;

        if mode.is_event_counted() {
            if action.visibility.is_some() {
                warn!("action {index}: visibility is ignored in {mode:?} mode");
            }
            continue;
        }

        if let Some(region) = action.position {
            if mode != InteractionMode::Cursor {
                warn!("action {index}: pointer region is ignored in {mode:?} mode");
            } else {
                if !region.is_valid() {
                    return Err(ConfigError::InvalidInterval {
                        index,
                        lo: region.x[0].min(region.y[0]),
                        hi: region.x[1].max(region.y[1]),
                    });
                }
                if let Some((other, _)) = regions.iter().find(|(_, r)| r.overlaps(&region)) {
                    return Err(ConfigError::OverlappingRegion {
                        index,
                        other: *other,
                    });
                }
                regions.push((index, region));
                if action.visibility.is_none() {
                    continue;
                }
            }
        }

        let vis = action
            .visibility
            .ok_or(ConfigError::MissingVisibility { index, mode })?;
        if !valid_interval(vis) {
            return Err(ConfigError::InvalidInterval {
                index,
                lo: vis[0],
                hi: vis[1],
            });
        }
        if let Some(p) = prev {
            if vis[0] < p[0] {
                return Err(ConfigError::OutOfOrder {
                    index,
                    lo: vis[0],
                    prev_lo: p[0],
                });
            }
            if vis[0] < p[1] {
                return Err(ConfigError::Overlapping {
                    index,
                    lo: vis[0],
                    prev_hi: p[1],
                });
            }
        }
        if let Some(t) = action.threshold {
            if !valid_interval(t) || t[0] < vis[0] || t[1] > vis[1] {
                return Err(ConfigError::ThresholdOutsideVisibility {
                    index,
                    lo: t[0],
                    hi: t[1],
                });
            }
        }
        prev = Some(vis);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll_example() -> Vec<Action> {
        vec![
            Action::spatial(ActionKind::Stop, [0.0, 0.45], &[0.0]),
            Action::spatial(ActionKind::Seek, [0.45, 1.0], &[0.0, 38.0]),
        ]
    }

    #[test]
    fn contiguous_list_is_valid() {
        assert_eq!(validate(InteractionMode::Scroll, &scroll_example()), Ok(()));
    }

    #[test]
    fn overlap_is_rejected() {
        let actions = vec![
            Action::spatial(ActionKind::Stop, [0.0, 0.5], &[0.0]),
            Action::spatial(ActionKind::Seek, [0.4, 1.0], &[0.0, 38.0]),
        ];
        assert!(matches!(
            validate(InteractionMode::Scroll, &actions),
            Err(ConfigError::Overlapping { index: 1, .. })
        ));
    }

    #[test]
    fn out_of_order_is_rejected() {
        let actions = vec![
            Action::spatial(ActionKind::Seek, [0.45, 1.0], &[0.0, 38.0]),
            Action::spatial(ActionKind::Stop, [0.0, 0.45], &[0.0]),
        ];
        assert!(matches!(
            validate(InteractionMode::Scroll, &actions),
            Err(ConfigError::OutOfOrder { index: 1, .. })
        ));
    }

    #[test]
    fn frame_arity_is_checked() {
        let actions = vec![Action::spatial(ActionKind::Seek, [0.0, 1.0], &[5.0])];
        assert!(matches!(
            validate(InteractionMode::Scroll, &actions),
            Err(ConfigError::FrameCount { actual: 1, .. })
        ));
        let actions = vec![Action::spatial(ActionKind::Stop, [0.0, 1.0], &[])];
        assert!(matches!(
            validate(InteractionMode::Scroll, &actions),
            Err(ConfigError::FrameCount { actual: 0, .. })
        ));
    }

    #[test]
    fn seek_not_allowed_on_click() {
        let actions = vec![Action::event(ActionKind::Seek, &[0.0, 10.0])];
        assert!(matches!(
            validate(InteractionMode::Click, &actions),
            Err(ConfigError::UnsupportedKind { .. })
        ));
    }

    #[test]
    fn missing_visibility_in_scroll() {
        let actions = vec![Action::event(ActionKind::Stop, &[0.0])];
        assert!(matches!(
            validate(InteractionMode::Scroll, &actions),
            Err(ConfigError::MissingVisibility { index: 0, .. })
        ));
    }

    #[test]
    fn threshold_must_sit_inside_visibility() {
        let actions =
            vec![Action::spatial(ActionKind::Play, [0.2, 0.6], &[0.0, 10.0]).with_threshold([0.1, 0.5])];
        assert!(matches!(
            validate(InteractionMode::Scroll, &actions),
            Err(ConfigError::ThresholdOutsideVisibility { .. })
        ));
    }

    #[test]
    fn overlapping_regions_rejected() {
        let a = PointerRegion {
            x: [0.0, 0.6],
            y: [0.0, 1.0],
        };
        let b = PointerRegion {
            x: [0.5, 1.0],
            y: [0.0, 1.0],
        };
        let actions = vec![
            Action::region(ActionKind::Stop, a, &[0.0]),
            Action::region(ActionKind::Stop, b, &[10.0]),
        ];
        assert_eq!(
            validate(InteractionMode::Cursor, &actions),
            Err(ConfigError::OverlappingRegion { index: 1, other: 0 })
        );
    }

    #[test]
    fn unknown_kind_from_raw() {
        let raw: RawAction =
            serde_json::from_str(r#"{ "visibility": [0, 1], "type": "bounce", "frames": [0] }"#)
                .unwrap();
        assert_eq!(
            Action::from_raw(3, raw),
            Err(ConfigError::UnknownActionKind {
                index: 3,
                kind: "bounce".into()
            })
        );
    }
}
