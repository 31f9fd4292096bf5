//! Transaction table scanning and column slicing.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ExtractionError;
use crate::models::{Security, Transaction, TransactionKind};
use crate::notes::rules::{extract_amount_from_line, extract_value_from_line};

/// How the rows of a transaction table are told apart from the other lines
/// of its region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum TableScan {
    /// Rows follow the header line until a line starting with `end_marker`.
    Delimited {
        start_marker: String,
        end_marker: String,
    },
    /// Rows start with `row_prefix`. Any other line closes the block and each
    /// header line opens a new one.
    Continuation {
        start_marker: String,
        row_prefix: String,
    },
}

impl TableScan {
    /// Select the table rows among the rendered lines of a region.
    ///
    /// Header and end lines are never rows.
    pub fn rows<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> Vec<&'a str> {
        let mut rows = Vec::new();
        let mut inside = false;
        for line in lines {
            let line = line.as_ref();
            let start_marker = match self {
                TableScan::Delimited {
                    start_marker,
                    end_marker,
                } => {
                    if line.starts_with(end_marker.as_str()) {
                        inside = false;
                    }
                    start_marker
                }
                TableScan::Continuation {
                    start_marker,
                    row_prefix,
                } => {
                    if !line.starts_with(row_prefix.as_str()) {
                        inside = false;
                    }
                    start_marker
                }
            };

            if inside {
                trace!("Transaction line: {}", line);
                rows.push(line);
            }

            if line.starts_with(start_marker.as_str()) {
                inside = true;
            }
        }
        rows
    }
}

/// Token positions of a transaction row.
///
/// Negative indices count from the end of the row, so that security names of
/// any length sit between fixed leading and trailing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub kind: isize,
    pub name_start: isize,
    pub name_end: isize,
    pub unit_price: isize,
    pub quantity: isize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            kind: 1,
            name_start: 3,
            name_end: -4,
            unit_price: -3,
            quantity: -4,
        }
    }
}

impl ColumnLayout {
    /// Slice a table row into a transaction.
    pub fn parse_row(&self, line: &str, buy_indicator: &str) -> Result<Transaction, ExtractionError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let indicator = column(&tokens, self.kind, line, "kind")?;
        let kind = if indicator == buy_indicator {
            TransactionKind::Buy
        } else {
            trace!("Indicator {:?} read as a sale", indicator);
            TransactionKind::Sell
        };

        let start = slice_bound(self.name_start, tokens.len());
        let end = slice_bound(self.name_end, tokens.len());
        let name = if start < end {
            tokens[start..end].join(" ")
        } else {
            String::new()
        };

        let unit_price = extract_value_from_line(column(&tokens, self.unit_price, line, "unit price")?);
        let quantity = extract_amount_from_line(column(&tokens, self.quantity, line, "quantity")?);

        Ok(Transaction::new(kind, quantity, unit_price, Security::new(name)))
    }
}

/// Resolve a possibly negative index into `len` tokens.
fn resolve(index: isize, len: usize) -> Option<usize> {
    if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        let index = index as usize;
        (index < len).then_some(index)
    }
}

/// Resolve a slice bound, clamping it into `0..=len`.
fn slice_bound(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        (index as usize).min(len)
    }
}

fn column<'a>(
    tokens: &[&'a str],
    index: isize,
    line: &str,
    name: &str,
) -> Result<&'a str, ExtractionError> {
    resolve(index, tokens.len())
        .map(|i| tokens[i])
        .ok_or_else(|| ExtractionError::MalformedLine {
            line: line.to_string(),
            reason: format!("no {} column at index {}", name, index),
        })
}
