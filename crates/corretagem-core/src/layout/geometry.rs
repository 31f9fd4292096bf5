//! Page-space geometry: word boxes and rectangles.
//!
//! Coordinates follow the rendered page: `x` grows to the right and `y`
//! grows downward, so `y0` is the top edge and `y1` the bottom edge.

use serde::{Deserialize, Serialize};

/// A word as produced by the PDF engine, with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedWord {
    /// Left edge.
    pub x0: f32,
    /// Top edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge. Words of one typeset line share this value exactly.
    pub y1: f32,
    /// Text of the word.
    pub value: String,
}

impl PositionedWord {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32, value: impl Into<String>) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            value: value.into(),
        }
    }

    /// Bounding box of the word.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.x1, self.y1)
    }
}

/// An axis-aligned rectangle `(x0, y0) - (x1, y1)`.
///
/// Valid rectangles satisfy `x0 <= x1` and `y0 <= y1`. Zero-area rectangles
/// are legal and are used as explicit placeholders (see [`Rect::point`]).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Zero-area rectangle located at a single point.
    pub const fn point(x: f32, y: f32) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// True when the corners are swapped on either axis.
    pub fn is_inverted(&self) -> bool {
        self.x0 > self.x1 || self.y0 > self.y1
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Check whether `other` overlaps this rectangle. Shared edges count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    /// Check whether a word's bounding box overlaps this rectangle.
    pub fn intersects_word(&self, word: &PositionedWord) -> bool {
        self.intersects(&word.rect())
    }

    /// Same vertical band as `self`, stretched horizontally over `[0, width]`.
    pub fn full_width(&self, width: f32) -> Rect {
        Rect::new(0.0, self.y0, width, self.y1)
    }
}
