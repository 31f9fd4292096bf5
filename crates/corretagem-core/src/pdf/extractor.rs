//! Positioned word extraction using lopdf and pdf-extract.

use lopdf::Document;
use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::layout::PositionedWord;

/// PDF word extractor using lopdf for decoding and pdf-extract for text
/// positioning.
///
/// The two crates do not share a lopdf version, so pdf-extract is handed
/// bytes, re-saved without encryption when the input was protected.
pub struct PdfExtractor {
    document: Option<Document>,
    pages: Vec<Vec<PositionedWord>>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            pages: Vec::new(),
        }
    }

    /// Run pdf-extract over plain (unencrypted) PDF bytes.
    fn collect_words(data: &[u8]) -> Result<Vec<Vec<PositionedWord>>> {
        let doc =
            pdf_extract::Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
        let mut collector = WordCollector::default();
        pdf_extract::output_doc(&doc, &mut collector)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(collector.pages)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8], password: Option<&str>) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let plain = if doc.is_encrypted() {
            if doc.decrypt(password.unwrap_or("")).is_err() {
                return Err(PdfError::InvalidPassword);
            }
            // decrypt() leaves /Encrypt in the trailer
            doc.trailer.remove(b"Encrypt");
            debug!("Decrypted PDF");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        self.pages = Self::collect_words(&plain)?;
        debug!(
            "Loaded PDF with {} pages, {} words",
            page_count,
            self.pages.iter().map(Vec::len).sum::<usize>()
        );
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_words(&self, page: u32) -> Result<Vec<PositionedWord>> {
        if page == 0 {
            return Err(PdfError::InvalidPage(page));
        }
        self.pages
            .get((page - 1) as usize)
            .cloned()
            .ok_or(PdfError::InvalidPage(page))
    }
}

/// Round to 1/100 pt so glyphs set on one baseline share a bottom coordinate.
fn snap(value: f64) -> f32 {
    ((value * 100.0).round() / 100.0) as f32
}

/// Merges the glyph stream of pdf-extract into whitespace-delimited words.
#[derive(Default)]
struct WordCollector {
    pages: Vec<Vec<PositionedWord>>,
    words: Vec<PositionedWord>,
    pending: Option<PositionedWord>,
    page_height: f64,
}

impl WordCollector {
    fn flush(&mut self) {
        if let Some(word) = self.pending.take() {
            trace!("word {:?} at ({}, {})", word.value, word.x0, word.y1);
            self.words.push(word);
        }
    }
}

impl OutputDev for WordCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> std::result::Result<(), OutputError> {
        self.page_height = media_box.ury - media_box.lly;
        self.words.clear();
        self.pending = None;
        Ok(())
    }

    fn end_page(&mut self) -> std::result::Result<(), OutputError> {
        self.flush();
        self.pages.push(std::mem::take(&mut self.words));
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> std::result::Result<(), OutputError> {
        if char.trim().is_empty() {
            self.flush();
            return Ok(());
        }

        // Side of the square with the same area as the transformed glyph box.
        let scaled_x = font_size * (trm.m11 + trm.m21);
        let scaled_y = font_size * (trm.m12 + trm.m22);
        let size = (scaled_x * scaled_y).abs().sqrt();

        let baseline = self.page_height - trm.m32;
        let x0 = snap(trm.m31);
        let x1 = snap(trm.m31 + width * size);
        let y0 = snap(baseline - size);
        let y1 = snap(baseline);
        let gap = snap(size * 0.1);

        let continues_word = matches!(
            &self.pending,
            Some(word) if word.y1 == y1 && x0 >= word.x0 && x0 <= word.x1 + gap
        );

        if continues_word {
            if let Some(word) = self.pending.as_mut() {
                word.value.push_str(char);
                word.x1 = word.x1.max(x1);
                word.y0 = word.y0.min(y0);
            }
        } else {
            self.flush();
            self.pending = Some(PositionedWord::new(x0, y0, x1, y1, char));
        }
        Ok(())
    }

    fn begin_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }
}
