//! Grouping of positioned words into visual lines and sections.

use super::geometry::{PositionedWord, Rect};

/// Words sharing one bottom coordinate, ordered left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualLine {
    /// Bottom coordinate shared by every word of the line.
    pub bottom: f32,
    /// Words ordered by their left coordinate.
    pub words: Vec<PositionedWord>,
}

impl VisualLine {
    /// Word values joined with single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.value.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Group words into visual lines.
///
/// Words are sorted by `(bottom, left)` and split into runs with an identical
/// bottom coordinate. There is no tolerance: words of one typeset line come out
/// of the same rendering pass with the same baseline.
pub fn group_into_lines<I>(words: I) -> Vec<VisualLine>
where
    I: IntoIterator<Item = PositionedWord>,
{
    let mut sorted: Vec<PositionedWord> = words.into_iter().collect();
    sorted.sort_by(|a, b| a.y1.total_cmp(&b.y1).then(a.x0.total_cmp(&b.x0)));

    let mut lines: Vec<VisualLine> = Vec::new();
    for word in sorted {
        match lines.last_mut() {
            Some(line) if line.bottom == word.y1 => line.words.push(word),
            _ => lines.push(VisualLine {
                bottom: word.y1,
                words: vec![word],
            }),
        }
    }
    lines
}

/// Keep the words whose bounding box intersects `rect`.
pub fn words_in_rect<'a>(words: &'a [PositionedWord], rect: &Rect) -> Vec<&'a PositionedWord> {
    words.iter().filter(|w| rect.intersects_word(w)).collect()
}

/// The lines found inside a rectangular region of a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub lines: Vec<VisualLine>,
}

impl Section {
    /// Build a section from the page words intersecting `rect`.
    pub fn from_region(words: &[PositionedWord], rect: &Rect) -> Self {
        let inside = words_in_rect(words, rect).into_iter().cloned();
        Self {
            lines: group_into_lines(inside),
        }
    }

    /// Rendered text of every line, top to bottom.
    pub fn text_by_lines(&self) -> Vec<String> {
        self.lines.iter().map(VisualLine::text).collect()
    }

    /// All lines concatenated with no separator.
    pub fn full_text(&self) -> String {
        self.lines.iter().map(VisualLine::text).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
