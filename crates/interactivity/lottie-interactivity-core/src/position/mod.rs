//! Position sources: normalize raw UI events into positions the resolver
//! understands, and coalesce them to one delivery per animation-frame tick.
//!
//! The host calls a source's raw-event methods (`on_scroll`, `on_pointer_move`,
//! `on_click`, ...) as events arrive and [`PositionSource::flush`] once per
//! animation frame. Only the latest position pending at flush time is
//! delivered, except for clicks: [`ClickSource`] delivers every count queued
//! since the last flush.

mod click;
mod cursor;
mod hover;
mod scroll;

pub use click::ClickSource;
pub use cursor::CursorSource;
pub use hover::HoverSource;
pub use scroll::ScrollSource;

use serde::{Deserialize, Serialize};

use crate::config::InteractionMode;
use crate::ids::ListenerId;
use crate::listeners::Listeners;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverEvent {
    Enter,
    Leave,
}

/// One normalized signal value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Position {
    /// Scalar progress in [0, 1].
    Progress { value: f32 },
    /// Pointer position, each axis in [0, 1].
    Pointer { x: f32, y: f32 },
    /// Pointer left the element.
    Outside,
    Hover { event: HoverEvent },
    /// Clicks counted since the source was created or reset.
    Clicks { count: u32 },
}

impl Position {
    #[inline]
    pub fn progress(value: f32) -> Self {
        Self::Progress { value }
    }

    /// Scalar view used for visibility intervals. Pointer pairs collapse to
    /// the mean of both axes.
    pub fn scalar(&self) -> Option<f32> {
        match *self {
            Self::Progress { value } => Some(value),
            Self::Pointer { x, y } => Some((x + y) * 0.5),
            _ => None,
        }
    }
}

/// Axis-aligned box in host pixels.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Layout facts needed by the scroll source, measured by the host.
///
/// `viewport` is the window or the custom scroll container; both rects must
/// be in the same coordinate space.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollGeometry {
    pub element: Rect,
    pub viewport: Rect,
}

/// Latest-value slot plus listeners; the coalescing core of every source.
#[derive(Debug, Default)]
pub struct PositionFeed {
    pending: Option<Position>,
    listeners: Listeners<Position>,
}

impl PositionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is pending; earlier values in the same tick are dropped.
    #[inline]
    pub fn push(&mut self, position: Position) {
        self.pending = Some(position);
    }

    #[inline]
    pub fn pending(&self) -> Option<&Position> {
        self.pending.as_ref()
    }

    pub fn subscribe(&mut self, listener: Box<dyn FnMut(&Position)>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Emit `position` to every listener now, bypassing the pending slot.
    pub fn deliver(&mut self, position: &Position) {
        self.listeners.emit(position);
    }

    /// Deliver the pending position, if any. Returns whether one was delivered.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(p) => {
                self.listeners.emit(&p);
                true
            }
            None => false,
        }
    }
}

/// One ambient signal with an explicit subscription lifetime.
pub trait PositionSource {
    fn mode(&self) -> InteractionMode;
    fn feed(&self) -> &PositionFeed;
    fn feed_mut(&mut self) -> &mut PositionFeed;

    fn subscribe(&mut self, listener: Box<dyn FnMut(&Position)>) -> ListenerId {
        self.feed_mut().subscribe(listener)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.feed_mut().unsubscribe(id)
    }

    /// Animation-frame tick: deliver the coalesced position, if any.
    fn flush(&mut self) -> bool {
        self.feed_mut().flush()
    }
}
