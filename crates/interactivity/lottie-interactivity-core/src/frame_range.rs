//! Playable frame segments.

use serde::{Deserialize, Serialize};

/// A segment of the animation timeline, in frames.
///
/// `start > end` means the segment plays in reverse. Values are immutable
/// once built; clamping produces a new range.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct FrameRange {
    start: f32,
    end: f32,
}

impl FrameRange {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.end
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.start > self.end
    }

    /// Number of frames covered, regardless of direction.
    #[inline]
    pub fn span(&self) -> f32 {
        (self.end - self.start).abs()
    }

    /// Lower and upper bound, regardless of direction.
    #[inline]
    pub fn bounds(&self) -> (f32, f32) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    pub fn contains(&self, frame: f32) -> bool {
        let (lo, hi) = self.bounds();
        frame >= lo && frame <= hi
    }

    /// Clamp both ends into `[0, total_frames]`, keeping the direction.
    pub fn clamped(&self, total_frames: f32) -> Self {
        Self::new(
            clamp_frame(self.start, total_frames),
            clamp_frame(self.end, total_frames),
        )
    }
}

impl From<[f32; 2]> for FrameRange {
    fn from(v: [f32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<FrameRange> for [f32; 2] {
    fn from(r: FrameRange) -> Self {
        [r.start, r.end]
    }
}

/// Clamp a frame index into `[0, total_frames]`. Non-finite input maps to 0.
pub fn clamp_frame(frame: f32, total_frames: f32) -> f32 {
    if !frame.is_finite() {
        return 0.0;
    }
    frame.clamp(0.0, total_frames.max(0.0))
}
