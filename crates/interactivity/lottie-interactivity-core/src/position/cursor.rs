use super::{Position, PositionFeed, PositionSource, Rect};
use crate::config::{CursorAxis, InteractionMode};

/// Pointer position projected onto the element box.
#[derive(Debug)]
pub struct CursorSource {
    axis: CursorAxis,
    feed: PositionFeed,
}

fn fraction(v: f32, origin: f32, extent: f32) -> f32 {
    if !v.is_finite() || !(extent > 0.0) {
        return 0.0;
    }
    ((v - origin) / extent).clamp(0.0, 1.0)
}

impl CursorSource {
    pub fn new(axis: CursorAxis) -> Self {
        Self {
            axis,
            feed: PositionFeed::new(),
        }
    }

    #[inline]
    pub fn axis(&self) -> CursorAxis {
        self.axis
    }

    /// Normalize client coordinates against the element's box.
    pub fn normalize(&self, element: &Rect, client_x: f32, client_y: f32) -> Position {
        let x = fraction(client_x, element.left, element.width);
        let y = fraction(client_y, element.top, element.height);
        match self.axis {
            CursorAxis::X => Position::progress(x),
            CursorAxis::Y => Position::progress(y),
            CursorAxis::Both => Position::Pointer { x, y },
        }
    }

    pub fn on_pointer_move(&mut self, element: &Rect, client_x: f32, client_y: f32) {
        let p = self.normalize(element, client_x, client_y);
        self.feed.push(p);
    }

    pub fn on_pointer_leave(&mut self) {
        self.feed.push(Position::Outside);
    }
}

impl Default for CursorSource {
    fn default() -> Self {
        Self::new(CursorAxis::default())
    }
}

impl PositionSource for CursorSource {
    fn mode(&self) -> InteractionMode {
        InteractionMode::Cursor
    }

    fn feed(&self) -> &PositionFeed {
        &self.feed
    }

    fn feed_mut(&mut self) -> &mut PositionFeed {
        &mut self.feed
    }
}
