//! Core library for Brazilian brokerage note extraction.
//!
//! This crate provides:
//! - PDF word extraction (lopdf + pdf-extract) into an in-memory [`Document`]
//! - Geometric grouping of words into lines and anchored page regions
//! - Brazilian number, date and id parsing
//! - Data-driven broker templates (B3, NuInvest) and note assembly across pages

pub mod error;
pub mod layout;
pub mod models;
pub mod notes;
pub mod pdf;

pub use error::{CorretagemError, ExtractionError, PdfError, Result};
pub use layout::{PositionedWord, Rect, Section, VisualLine};
pub use models::{
    BrokerageNote, CorretagemConfig, FeeType, Fees, NoteKey, Security, SecurityType, Transaction,
    TransactionKind,
};
pub use notes::{BrokerTemplate, NoteExtractor, NoteParser, ParserFactory};
pub use pdf::{Document, Page, PdfExtractor, PdfProcessor};

/// Parse every brokerage note of a PDF with the built-in templates.
pub fn parse_brokerage_notes(data: &[u8], password: Option<&str>) -> Result<Vec<BrokerageNote>> {
    Ok(ParserFactory::new(data, password)?.parse())
}
