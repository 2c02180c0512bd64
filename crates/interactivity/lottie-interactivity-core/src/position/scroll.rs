use log::warn;

use super::{Position, PositionFeed, PositionSource, ScrollGeometry};
use crate::config::InteractionMode;

/// Scroll progress of the element through its viewport.
///
/// The reference line sits `offset` viewport-heights above the viewport's
/// bottom edge. Progress is 0 while the element's top edge is below that line
/// and 1 once its bottom edge has passed the viewport's top edge.
#[derive(Debug)]
pub struct ScrollSource {
    offset: f32,
    last: Option<f32>,
    feed: PositionFeed,
}

impl ScrollSource {
    pub fn new(offset: f32) -> Self {
        Self {
            offset: offset.clamp(0.0, 0.99),
            last: None,
            feed: PositionFeed::new(),
        }
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Last computed progress, if any event has been seen.
    #[inline]
    pub fn last_progress(&self) -> Option<f32> {
        self.last
    }

    /// Compute progress for one layout measurement.
    pub fn progress(&self, geom: &ScrollGeometry) -> f32 {
        let reach = geom.viewport.height * (1.0 - self.offset);
        let line = geom.viewport.top + reach;
        let travelled = line - geom.element.top;
        let total = reach + geom.element.height;
        if !travelled.is_finite() || !total.is_finite() || total <= 0.0 {
            warn!("scroll: degenerate geometry {geom:?}, reporting 0");
            return 0.0;
        }
        (travelled / total).clamp(0.0, 1.0)
    }

    pub fn on_scroll(&mut self, geom: &ScrollGeometry) {
        let p = self.progress(geom);
        self.last = Some(p);
        self.feed.push(Position::progress(p));
    }

    /// Layout changed; recomputed exactly like a scroll.
    pub fn on_resize(&mut self, geom: &ScrollGeometry) {
        self.on_scroll(geom);
    }
}

impl Default for ScrollSource {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl PositionSource for ScrollSource {
    fn mode(&self) -> InteractionMode {
        InteractionMode::Scroll
    }

    fn feed(&self) -> &PositionFeed {
        &self.feed
    }

    fn feed_mut(&mut self) -> &mut PositionFeed {
        &mut self.feed
    }
}
