//! Error types. Only setup-time configuration and renderer loading can fail;
//! commands never return errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actions::ActionKind;
use crate::config::InteractionMode;

/// Problems detected while validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config json parse error: {0}")]
    Parse(String),

    #[error("action {index}: unknown action type '{kind}'")]
    UnknownActionKind { index: usize, kind: String },

    #[error("action {index}: '{kind:?}' is not supported in {mode:?} mode")]
    UnsupportedKind {
        index: usize,
        kind: ActionKind,
        mode: InteractionMode,
    },

    #[error("action {index}: '{kind:?}' needs {expected} frame(s), got {actual}")]
    FrameCount {
        index: usize,
        kind: ActionKind,
        expected: String,
        actual: usize,
    },

    #[error("action {index}: frame values must be finite")]
    InvalidFrames { index: usize },

    #[error("action {index}: visibility is required in {mode:?} mode")]
    MissingVisibility { index: usize, mode: InteractionMode },

    #[error("action {index}: interval [{lo}, {hi}] must satisfy 0 <= lo <= hi <= 1")]
    InvalidInterval { index: usize, lo: f32, hi: f32 },

    #[error("action {index}: interval starts at {lo}, before the previous action's start {prev_lo}")]
    OutOfOrder { index: usize, lo: f32, prev_lo: f32 },

    #[error("action {index}: interval starts at {lo}, inside the previous action ending at {prev_hi}")]
    Overlapping { index: usize, lo: f32, prev_hi: f32 },

    #[error("action {index}: pointer region overlaps action {other}")]
    OverlappingRegion { index: usize, other: usize },

    #[error("action {index}: threshold [{lo}, {hi}] lies outside the visibility interval")]
    ThresholdOutsideVisibility { index: usize, lo: f32, hi: f32 },

    #[error("source delivers {source_mode:?} positions but the config expects {config_mode:?}")]
    ModeMismatch {
        config_mode: InteractionMode,
        source_mode: InteractionMode,
    },

    #[error("scroll offset {0} must be in [0, 1)")]
    InvalidOffset(f32),
}

/// Failures reported by a [`Renderer`](crate::Renderer).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RendererError {
    #[error("animation load failed: {reason}")]
    LoadFailed { reason: String },
    #[error("animation data failed: {reason}")]
    DataFailed { reason: String },
}

impl RendererError {
    pub fn load_failed(reason: impl Into<String>) -> Self {
        Self::LoadFailed {
            reason: reason.into(),
        }
    }

    pub fn data_failed(reason: impl Into<String>) -> Self {
        Self::DataFailed {
            reason: reason.into(),
        }
    }
}
