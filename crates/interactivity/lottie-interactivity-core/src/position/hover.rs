use super::{HoverEvent, Position, PositionFeed, PositionSource};
use crate::config::InteractionMode;

/// Enter/leave signal. Repeated events of the same kind are collapsed.
#[derive(Debug, Default)]
pub struct HoverSource {
    inside: bool,
    feed: PositionFeed,
}

impl HoverSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn on_enter(&mut self) {
        if !self.inside {
            self.inside = true;
            self.feed.push(Position::Hover {
                event: HoverEvent::Enter,
            });
        }
    }

    pub fn on_leave(&mut self) {
        if self.inside {
            self.inside = false;
            self.feed.push(Position::Hover {
                event: HoverEvent::Leave,
            });
        }
    }
}

impl PositionSource for HoverSource {
    fn mode(&self) -> InteractionMode {
        InteractionMode::Hover
    }

    fn feed(&self) -> &PositionFeed {
        &self.feed
    }

    fn feed_mut(&mut self) -> &mut PositionFeed {
        &mut self.feed
    }
}
