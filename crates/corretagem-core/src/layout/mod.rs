//! Geometric reconstruction of text rows and regions from positioned words.

mod geometry;
mod lines;
mod region;

pub use geometry::{PositionedWord, Rect};
pub use lines::{Section, VisualLine, group_into_lines, words_in_rect};
pub use region::{Anchor, locate, locate_optional, span};
