//! Data models: securities, transactions, notes and configuration.

pub mod config;
pub mod note;
pub mod security;
pub mod transaction;

pub use config::{BrokerConfig, CorretagemConfig, OutputConfig, OutputFormat, PdfConfig};
pub use note::{BrokerageNote, FeeType, Fees, NoteKey};
pub use security::{Security, SecurityType};
pub use transaction::{Transaction, TransactionKind};
