//! Lottie Interactivity Core (renderer-agnostic)
//!
//! Binds a vector-animation renderer to ambient UI signals. The crate owns the
//! playback state machine, the position sources (scroll, cursor, hover, click),
//! the declarative action resolver and the engine that wires them together.
//! Hosts (wasm, native shells) implement [`Renderer`] and feed raw UI events
//! into a [`PositionSource`]; everything else runs here.

pub mod actions;
pub mod commands;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod frame_range;
pub mod ids;
pub mod listeners;
pub mod outputs;
pub mod player;
pub mod position;
pub mod renderer;
pub mod resolver;
pub mod state;

// Re-exports for consumers (adapters)
pub use actions::{Action, ActionKind, PointerRegion};
pub use commands::{Command, CommandOutcome};
pub use config::{ClickOverflow, CursorAxis, EngineConfig, InteractionMode, PlayerOptions};
pub use controls::{Chrome, ChromeLayout, ControlElement, Controls, ScrubEvent, Scrubber};
pub use engine::InteractivityEngine;
pub use error::{ConfigError, RendererError};
pub use frame_range::FrameRange;
pub use ids::ListenerId;
pub use outputs::{Cause, Notification, PlayerSnapshot};
pub use player::{PlaybackStateMachine, SharedPlayer};
pub use position::{
    ClickSource, CursorSource, HoverEvent, HoverSource, Position, PositionFeed, PositionSource,
    Rect, ScrollGeometry, ScrollSource,
};
pub use renderer::{AnimationSource, HeadlessRenderer, Renderer, RendererCall};
pub use resolver::{interpolate_frame, resolve_progress, ActionResolver, ResolvedCommand};
pub use state::{next_state, Direction, PlaybackState};
