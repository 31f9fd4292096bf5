//! PDF processing module.
//!
//! The PDF engine is only asked for positioned words. Everything else
//! (line grouping, phrase search) works on the decoded [`Document`].

mod extractor;

pub use extractor::PdfExtractor;

use tracing::debug;

use crate::error::PdfError;
use crate::layout::{PositionedWord, Rect, group_into_lines};

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF engines able to report positioned words.
pub trait PdfProcessor {
    /// Load a PDF from bytes, authenticating with `password` when encrypted.
    fn load(&mut self, data: &[u8], password: Option<&str>) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Words of a page (1-indexed) in rendering order.
    fn extract_words(&self, page: u32) -> Result<Vec<PositionedWord>>;
}

/// A decoded page: its number and its words.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Page number (1-indexed).
    pub number: u32,
    /// Words in rendering order.
    pub words: Vec<PositionedWord>,
}

impl Page {
    pub fn new(number: u32, words: Vec<PositionedWord>) -> Self {
        Self { number, words }
    }

    /// Full-text search for a literal phrase.
    ///
    /// Matching is case-insensitive and runs over each visual line rendered
    /// with single spaces, so a phrase may cover several words of one line.
    /// Each hit is the union of the boxes of the words it touches.
    pub fn search(&self, phrase: &str) -> Vec<Rect> {
        let needle: Vec<char> = phrase.chars().flat_map(char::to_lowercase).collect();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for line in group_into_lines(self.words.iter().cloned()) {
            let mut haystack: Vec<(char, Option<usize>)> = Vec::new();
            for (index, word) in line.words.iter().enumerate() {
                if index > 0 {
                    haystack.push((' ', None));
                }
                haystack.extend(word.value.chars().flat_map(char::to_lowercase).map(|c| (c, Some(index))));
            }

            let mut start = 0;
            while start + needle.len() <= haystack.len() {
                let window = &haystack[start..start + needle.len()];
                if window.iter().map(|(c, _)| *c).eq(needle.iter().copied()) {
                    let hit = window
                        .iter()
                        .filter_map(|(_, index)| *index)
                        .map(|index| line.words[index].rect())
                        .reduce(|a, b| a.union(&b));
                    if let Some(rect) = hit {
                        hits.push(rect);
                    }
                    start += needle.len();
                } else {
                    start += 1;
                }
            }
        }
        hits
    }

    pub fn contains_text(&self, phrase: &str) -> bool {
        !self.search(phrase).is_empty()
    }
}

/// A PDF decoded once into per-page word lists.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    /// Decode a PDF with the default lopdf/pdf-extract engine.
    pub fn open(data: &[u8], password: Option<&str>) -> Result<Self> {
        let mut extractor = PdfExtractor::new();
        extractor.load(data, password)?;
        Self::from_processor(&extractor)
    }

    /// Read every page of an already loaded processor.
    pub fn from_processor<P: PdfProcessor>(processor: &P) -> Result<Self> {
        let page_count = processor.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let pages = (1..=page_count)
            .map(|number| Ok(Page::new(number, processor.extract_words(number)?)))
            .collect::<Result<Vec<_>>>()?;

        debug!("Decoded document with {} pages", pages.len());
        Ok(Self { pages })
    }

    /// Build a document from in-memory pages.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check whether any page contains the phrase.
    pub fn contains_text(&self, phrase: &str) -> bool {
        self.pages.iter().any(|page| page.contains_text(phrase))
    }
}
