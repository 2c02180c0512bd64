//! Renderer contract consumed by the playback state machine.
//!
//! The renderer decodes and draws frames; this crate never looks inside the
//! animation description. Readiness and data failures come back through the
//! player's lifecycle hooks (`on_ready`, `on_data_failed`, ...), mirroring the
//! renderer's event callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::RendererError;
use crate::frame_range::FrameRange;
use crate::state::Direction;

/// What to load: inline animation JSON or a path/URL the renderer fetches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationSource {
    Data(serde_json::Value),
    Path(String),
}

pub trait Renderer {
    /// Start loading. An `Err` means the renderer rejected the source outright;
    /// asynchronous failures arrive later via `on_data_failed`.
    fn load_animation(&mut self, source: &AnimationSource) -> Result<(), RendererError>;
    /// Jump to a frame and hold it.
    fn go_to_and_stop(&mut self, frame: f32);
    /// Replace the active segment; `force` jumps immediately instead of
    /// waiting for the current segment to finish.
    fn play_segments(&mut self, range: FrameRange, force: bool);
    /// Drop the active segment so frames address the whole timeline again.
    fn reset_segments(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn set_direction(&mut self, direction: Direction);
    fn set_loop(&mut self, looping: bool);
    /// Total frame count of the loaded animation.
    fn total_frames(&self) -> f32;
}

/// One call received by a [`HeadlessRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum RendererCall {
    Load(AnimationSource),
    GoToAndStop(f32),
    PlaySegments(FrameRange, bool),
    ResetSegments,
    Play,
    Pause,
    Stop,
    SetDirection(Direction),
    SetLoop(bool),
}

/// Renderer without output: records every call into a shared log.
///
/// Useful for server-side hosts that only need the playback bookkeeping and
/// for observing the command stream in tests.
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    total_frames: f32,
    fail_load: Option<String>,
    calls: Rc<RefCell<Vec<RendererCall>>>,
}

impl HeadlessRenderer {
    pub fn new(total_frames: f32) -> Self {
        Self {
            total_frames,
            fail_load: None,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Make every `load_animation` call fail with `reason`.
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.fail_load = Some(reason.into());
        self
    }

    /// Shared handle to the call log; stays valid after the renderer is boxed.
    pub fn calls(&self) -> Rc<RefCell<Vec<RendererCall>>> {
        self.calls.clone()
    }

    fn record(&self, call: RendererCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Renderer for HeadlessRenderer {
    fn load_animation(&mut self, source: &AnimationSource) -> Result<(), RendererError> {
        self.record(RendererCall::Load(source.clone()));
        match &self.fail_load {
            Some(reason) => Err(RendererError::load_failed(reason.clone())),
            None => Ok(()),
        }
    }

    fn go_to_and_stop(&mut self, frame: f32) {
        self.record(RendererCall::GoToAndStop(frame));
    }

    fn play_segments(&mut self, range: FrameRange, force: bool) {
        self.record(RendererCall::PlaySegments(range, force));
    }

    fn reset_segments(&mut self) {
        self.record(RendererCall::ResetSegments);
    }

    fn play(&mut self) {
        self.record(RendererCall::Play);
    }

    fn pause(&mut self) {
        self.record(RendererCall::Pause);
    }

    fn stop(&mut self) {
        self.record(RendererCall::Stop);
    }

    fn set_direction(&mut self, direction: Direction) {
        self.record(RendererCall::SetDirection(direction));
    }

    fn set_loop(&mut self, looping: bool) {
        self.record(RendererCall::SetLoop(looping));
    }

    fn total_frames(&self) -> f32 {
        self.total_frames
    }
}
