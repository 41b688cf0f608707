//! Angular intervals around the observer
//!
//! An arc is the half-open interval `[start, start + span)` in degrees, with
//! 0° along +x and angles growing clockwise on screen. The end may run past
//! 360° until the arc is split at the wrap.

use serde::{Deserialize, Serialize};

/// A half-open angular interval in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// Start angle (degrees)
    pub start: f32,
    /// Angular width (degrees, never negative)
    pub span: f32,
}

impl Arc {
    /// Full turn, the starting point for every safe-arc search
    pub const FULL: Arc = Arc {
        start: 0.0,
        span: 360.0,
    };

    /// Build an arc, inverting it if the span is negative
    pub fn new(start: f32, span: f32) -> Self {
        Self { start, span }.normalized()
    }

    /// Build an arc from radians
    pub fn from_radians(start: f32, span: f32) -> Self {
        Self::new(start.to_degrees(), span.to_degrees())
    }

    /// Arc starting at `start` with the shorter of the two spans to `end` (≤ 180°)
    pub fn from_angles(start: f32, end: f32) -> Self {
        let raw = (end - start).abs() % 360.0;
        let span = if raw > 180.0 { 360.0 - raw } else { raw };
        Self::new(start, span).normalized()
    }

    fn normalized(self) -> Self {
        if self.span >= 0.0 {
            return self;
        }
        let mut start = self.end();
        if start < 0.0 {
            start += 360.0;
            // A tiny negative start rounds up to exactly 360
            if start >= 360.0 {
                start = 0.0;
            }
        }
        Self {
            start,
            span: -self.span,
        }
    }

    /// End angle (degrees), may exceed 360
    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.span
    }

    #[inline]
    pub fn start_radians(&self) -> f32 {
        self.start.to_radians()
    }

    #[inline]
    pub fn span_radians(&self) -> f32 {
        self.span.to_radians()
    }

    #[inline]
    pub fn end_radians(&self) -> f32 {
        self.end().to_radians()
    }

    /// Middle of the arc, normalized to [0, 360)
    pub fn mid(&self) -> f32 {
        crate::normalize_degrees(self.start + self.span / 2.0)
    }

    /// Whether the arc runs past 360°
    #[inline]
    pub fn crosses_wrap(&self) -> bool {
        self.end() > 360.0
    }

    /// Split at 360° into `[start, 360)` and `[0, end - 360)`
    pub fn split_at_wrap(&self) -> [Arc; 2] {
        [
            Arc::new(self.start, 360.0 - self.start),
            Arc::new(0.0, self.end() - 360.0),
        ]
    }

    /// Whether a bearing (degrees) falls inside the arc, wrap included
    pub fn contains(&self, degrees: f32) -> bool {
        let offset = (degrees - self.start).rem_euclid(360.0);
        offset < self.span || self.span >= 360.0
    }
}
