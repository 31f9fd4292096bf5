//! Locating named regions of a page by their anchor phrases.

use tracing::{debug, warn};

use super::geometry::Rect;
use crate::error::ExtractionError;
use crate::pdf::Page;

/// Outcome of looking up an optional anchor phrase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// The phrase was found at this rectangle.
    Found(Rect),
    /// The phrase does not occur on the page.
    Absent,
}

impl Anchor {
    pub fn is_found(&self) -> bool {
        matches!(self, Anchor::Found(_))
    }
}

/// Find the first hit of the first candidate phrase present on the page.
pub fn locate<S: AsRef<str>>(page: &Page, candidates: &[S]) -> Result<Rect, ExtractionError> {
    match locate_optional(page, candidates) {
        Anchor::Found(rect) => Ok(rect),
        Anchor::Absent => Err(ExtractionError::SectionNotFound(
            candidates
                .iter()
                .map(|c| c.as_ref())
                .collect::<Vec<_>>()
                .join(" | "),
        )),
    }
}

/// Like [`locate`], reporting a missing phrase as [`Anchor::Absent`].
pub fn locate_optional<S: AsRef<str>>(page: &Page, candidates: &[S]) -> Anchor {
    for candidate in candidates {
        if let Some(rect) = page.search(candidate.as_ref()).into_iter().next() {
            debug!(
                "Located {:?} on page {} at ({:.1}, {:.1}, {:.1}, {:.1})",
                candidate.as_ref(),
                page.number,
                rect.x0,
                rect.y0,
                rect.x1,
                rect.y1
            );
            return Anchor::Found(rect);
        }
    }
    Anchor::Absent
}

/// Rectangle from the top-left corner of `first` to the bottom-right corner of
/// `second`.
///
/// `first` must be the upper anchor. Passing the anchors in reverse order
/// yields an inverted rectangle; this is logged, not corrected.
pub fn span(first: &Rect, second: &Rect) -> Rect {
    let rect = Rect::new(first.x0, first.y0, second.x1, second.y1);
    if rect.is_inverted() {
        warn!(
            "Inverted region ({:.1}, {:.1}, {:.1}, {:.1}): anchors out of order",
            rect.x0, rect.y0, rect.x1, rect.y1
        );
    }
    rect
}
