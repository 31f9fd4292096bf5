//! Brokerage note extraction: templates, table scanning, fee aggregation and
//! assembly of multi-page notes.

mod dispatch;
mod parser;
mod registry;
pub mod rules;
mod table;
pub mod template;

pub use dispatch::{ParserFactory, select_template};
pub use parser::NoteParser;
pub use registry::NoteRegistry;
pub use table::{ColumnLayout, TableScan};
pub use template::{BrokerTemplate, FeeLabel, FeeLayout, HeaderLayout, PageSize, TransactionLayout};

use crate::error::ExtractionError;
use crate::models::BrokerageNote;
use crate::pdf::Document;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for brokerage note extractors.
pub trait NoteExtractor {
    /// Extract every note of a decoded document.
    ///
    /// Pages that cannot be read are skipped, so this never fails.
    fn extract(&self, document: &Document) -> Vec<BrokerageNote>;
}
