//! Error types for the corretagem-core library.

use thiserror::Error;

/// Main error type for the corretagem library.
#[derive(Error, Debug)]
pub enum CorretagemError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Brokerage note extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The document could not be authenticated with the supplied password.
    #[error("invalid password")]
    InvalidPassword,

    /// Failed to extract positioned words from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to brokerage note extraction.
///
/// `SectionNotFound` and `MalformedLine` are page-local: the parser skips the
/// page and carries on with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// None of the anchor phrases were found on the page.
    #[error("section not found: {0}")]
    SectionNotFound(String),

    /// The reference date region has no `dd/mm/yyyy` token.
    #[error("no date found in: {0:?}")]
    MissingDate(String),

    /// The reference id region has no digits.
    #[error("no reference id found in: {0:?}")]
    MissingReferenceId(String),

    /// Unknown fee category name.
    #[error("invalid brokerage note fee type: {0}")]
    InvalidFeeType(String),

    /// A transaction line does not have the columns its template expects.
    #[error("malformed transaction line {line:?}: {reason}")]
    MalformedLine { line: String, reason: String },
}

/// Result type for the corretagem library.
pub type Result<T> = std::result::Result<T, CorretagemError>;
