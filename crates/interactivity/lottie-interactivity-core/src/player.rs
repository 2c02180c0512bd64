//! PlaybackStateMachine: lifecycle state, renderer commands, notifications.
//!
//! Methods:
//! - imperative API: play, pause, stop, seek, seek_range, toggle_loop, set_loop, change_direction
//! - single entry point: apply (total over every state × command pair)
//! - renderer hooks: load/reload, on_ready, on_data_failed, on_enter_frame, on_complete
//! - subscribe/unsubscribe; notifications are delivered before each call returns

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, error, warn};

use crate::commands::{Command, CommandOutcome};
use crate::config::PlayerOptions;
use crate::frame_range::{clamp_frame, FrameRange};
use crate::ids::ListenerId;
use crate::listeners::Listeners;
use crate::outputs::{Cause, Notification, PlayerSnapshot};
use crate::error::RendererError;
use crate::renderer::{AnimationSource, Renderer};
use crate::state::{next_state, Direction, PlaybackState};

/// The player shared by the imperative control surface and the engine.
pub type SharedPlayer = Rc<RefCell<PlaybackStateMachine>>;

pub struct PlaybackStateMachine {
    renderer: Box<dyn Renderer>,
    options: PlayerOptions,
    state: PlaybackState,
    total_frames: f32,
    current_frame: f32,
    direction: Direction,
    looping: bool,
    segment: Option<FrameRange>,
    revision: u64,
    listeners: Listeners<Notification>,
}

impl fmt::Debug for PlaybackStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackStateMachine")
            .field("state", &self.state)
            .field("total_frames", &self.total_frames)
            .field("current_frame", &self.current_frame)
            .field("direction", &self.direction)
            .field("looping", &self.looping)
            .field("segment", &self.segment)
            .field("revision", &self.revision)
            .finish()
    }
}

impl PlaybackStateMachine {
    /// New player in `Loading`. Nothing is requested from the renderer until
    /// [`load`](Self::load) is called.
    pub fn new(renderer: Box<dyn Renderer>, options: PlayerOptions) -> Self {
        Self {
            renderer,
            looping: options.looping,
            direction: options.direction,
            options,
            state: PlaybackState::Loading,
            total_frames: 0.0,
            current_frame: 0.0,
            segment: None,
            revision: 0,
            listeners: Listeners::new(),
        }
    }

    /// Wrap into the shared handle used by engines and controls.
    pub fn shared(self) -> SharedPlayer {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn total_frames(&self) -> f32 {
        self.total_frames
    }

    #[inline]
    pub fn current_frame(&self) -> f32 {
        self.current_frame
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn looping(&self) -> bool {
        self.looping
    }

    #[inline]
    pub fn segment(&self) -> Option<FrameRange> {
        self.segment
    }

    /// Bumped by every applied command and every lifecycle transition
    /// (load, ready, failure, completion). Lets a caller detect that the
    /// player changed since its own last command.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state,
            total_frames: self.total_frames,
            direction: self.direction,
            looping: self.looping,
            current_frame: self.current_frame,
            segment: self.segment,
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn FnMut(&Notification)>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn notify(&mut self, cause: Cause) {
        let n = Notification {
            snapshot: self.snapshot(),
            cause,
        };
        self.listeners.emit(&n);
    }

    // ---- imperative API ----

    pub fn play(&mut self) -> CommandOutcome {
        self.apply(Command::Play)
    }

    pub fn pause(&mut self) -> CommandOutcome {
        self.apply(Command::Pause)
    }

    pub fn stop(&mut self) -> CommandOutcome {
        self.apply(Command::Stop)
    }

    pub fn seek(&mut self, frame: f32) -> CommandOutcome {
        self.apply(Command::Seek { frame })
    }

    pub fn seek_range(&mut self, range: FrameRange, continue_playing: bool) -> CommandOutcome {
        self.apply(Command::SeekRange {
            range,
            continue_playing,
        })
    }

    pub fn toggle_loop(&mut self) -> CommandOutcome {
        self.apply(Command::ToggleLoop)
    }

    pub fn set_loop(&mut self, looping: bool) -> CommandOutcome {
        self.apply(Command::SetLoop { looping })
    }

    pub fn change_direction(&mut self) -> CommandOutcome {
        self.apply(Command::ChangeDirection)
    }

    /// Apply one command. Defined for every state; never fails. Subscribers
    /// are notified with the (clamped) command and its outcome.
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let command = self.clamp_command(command);
        let prev = self.state;
        let outcome = if !prev.accepts_commands() {
            debug!("player: {} rejected in {}", command.name(), prev.name());
            CommandOutcome::Rejected
        } else {
            self.execute(prev, &command)
        };
        if outcome == CommandOutcome::Applied {
            self.state = next_state(prev, &command);
            self.bump();
        }
        self.notify(Cause::Command { command, outcome });
        outcome
    }

    #[inline]
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn clamp_command(&self, command: Command) -> Command {
        // Before the first ready there is no frame count to clamp against.
        if self.state == PlaybackState::Loading {
            return command;
        }
        match command {
            Command::Seek { frame } => {
                let clamped = clamp_frame(frame, self.total_frames);
                if clamped != frame {
                    warn!("player: seek {frame} clamped to {clamped}");
                }
                Command::Seek { frame: clamped }
            }
            Command::SeekRange {
                range,
                continue_playing,
            } => Command::SeekRange {
                range: range.clamped(self.total_frames),
                continue_playing,
            },
            other => other,
        }
    }

    /// Renderer side effects for an accepted command.
    fn execute(&mut self, prev: PlaybackState, command: &Command) -> CommandOutcome {
        use CommandOutcome::{Applied, Suppressed};
        match *command {
            Command::Play => {
                if prev.is_playing() {
                    return Suppressed;
                }
                self.renderer.play();
                Applied
            }
            Command::Pause => {
                if !prev.is_playing() {
                    return Suppressed;
                }
                self.renderer.pause();
                Applied
            }
            Command::Stop => {
                if prev == PlaybackState::Stopped {
                    return Suppressed;
                }
                self.renderer.stop();
                self.current_frame = self.segment_start();
                Applied
            }
            Command::Seek { frame } => {
                if prev == PlaybackState::Paused
                    && self.segment.is_none()
                    && self.current_frame == frame
                {
                    return Suppressed;
                }
                // Segment-relative frames would land in the wrong place.
                if self.segment.take().is_some() {
                    self.renderer.reset_segments();
                }
                self.renderer.go_to_and_stop(frame);
                self.current_frame = frame;
                Applied
            }
            Command::SeekRange {
                range,
                continue_playing,
            } => {
                self.segment = Some(range);
                self.renderer.play_segments(range, true);
                if !continue_playing {
                    self.renderer.go_to_and_stop(range.start());
                }
                self.current_frame = range.start();
                Applied
            }
            Command::ToggleLoop => {
                self.looping = !self.looping;
                self.renderer.set_loop(self.looping);
                Applied
            }
            Command::SetLoop { looping } => {
                if self.looping == looping {
                    return Suppressed;
                }
                self.looping = looping;
                self.renderer.set_loop(looping);
                Applied
            }
            Command::ChangeDirection => {
                self.direction = self.direction.flipped();
                self.renderer.set_direction(self.direction);
                Applied
            }
        }
    }

    fn segment_start(&self) -> f32 {
        self.segment.map_or(0.0, |s| s.start())
    }

    // ---- renderer lifecycle hooks ----

    /// Request `source` from the renderer and enter `Loading`.
    pub fn load(&mut self, source: &AnimationSource) {
        self.state = PlaybackState::Loading;
        self.total_frames = 0.0;
        self.current_frame = 0.0;
        self.segment = None;
        self.looping = self.options.looping;
        self.direction = self.options.direction;
        self.bump();
        self.notify(Cause::Loading);
        if let Err(e) = self.renderer.load_animation(source) {
            self.fail(e);
        }
    }

    /// Externally triggered reload; the only way out of `Failure`.
    pub fn reload(&mut self, source: &AnimationSource) {
        self.load(source);
    }

    /// Renderer finished loading (DOMLoaded / data_ready).
    pub fn on_ready(&mut self) {
        if self.state != PlaybackState::Loading {
            warn!("player: ready ignored in {}", self.state.name());
            return;
        }
        self.total_frames = self.renderer.total_frames().max(0.0);
        self.renderer.set_loop(self.looping);
        self.renderer.set_direction(self.direction);
        if let Some(seg) = self.options.initial_segment {
            let seg = seg.clamped(self.total_frames);
            self.segment = Some(seg);
            self.current_frame = seg.start();
            if self.options.autoplay {
                self.renderer.play_segments(seg, true);
            } else {
                self.renderer.go_to_and_stop(seg.start());
            }
        } else if self.options.autoplay {
            self.renderer.play();
        } else {
            self.renderer.go_to_and_stop(0.0);
        }
        self.state = if self.options.autoplay {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        };
        self.bump();
        self.notify(Cause::Ready);
    }

    /// Unrecoverable renderer failure; valid from any state.
    pub fn on_data_failed(&mut self, reason: impl Into<String>) {
        self.fail(RendererError::data_failed(reason));
    }

    fn fail(&mut self, err: RendererError) {
        error!("player: renderer failure: {err}");
        let reason = err.to_string();
        self.state = PlaybackState::Failure;
        self.bump();
        self.notify(Cause::Failed { reason });
    }

    /// Renderer advanced to `frame`.
    pub fn on_enter_frame(&mut self, frame: f32) {
        if !self.state.accepts_commands() {
            return;
        }
        self.current_frame = clamp_frame(frame, self.total_frames);
        self.notify(Cause::EnterFrame);
    }

    /// Non-looping playback reached the end of its segment; hold there.
    pub fn on_complete(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if self.looping {
            debug!("player: complete ignored while looping");
            return;
        }
        self.state = PlaybackState::Paused;
        self.bump();
        self.notify(Cause::Complete);
    }
}
