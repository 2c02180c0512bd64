use std::mem;

use super::{Position, PositionFeed, PositionSource};
use crate::config::InteractionMode;

/// Counts clicks. The count is never normalized; the resolver maps it onto
/// the action list.
///
/// Clicks are discrete, so unlike the other sources nothing is coalesced:
/// every count not yet delivered goes out, in order, on the next flush.
#[derive(Debug, Default)]
pub struct ClickSource {
    count: u32,
    queued: Vec<u32>,
    feed: PositionFeed,
}

impl ClickSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Counts waiting for the next flush.
    #[inline]
    pub fn queued(&self) -> &[u32] {
        &self.queued
    }

    pub fn on_click(&mut self) {
        self.count = self.count.saturating_add(1);
        self.queued.push(self.count);
    }

    /// Start counting from zero again. Undelivered clicks are dropped.
    pub fn reset(&mut self) {
        self.count = 0;
        self.queued.clear();
    }
}

impl PositionSource for ClickSource {
    fn mode(&self) -> InteractionMode {
        InteractionMode::Click
    }

    fn feed(&self) -> &PositionFeed {
        &self.feed
    }

    fn feed_mut(&mut self) -> &mut PositionFeed {
        &mut self.feed
    }

    fn flush(&mut self) -> bool {
        let queued = mem::take(&mut self.queued);
        for &count in &queued {
            self.feed.deliver(&Position::Clicks { count });
        }
        !queued.is_empty()
    }
}
