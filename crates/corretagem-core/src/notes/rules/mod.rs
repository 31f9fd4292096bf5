//! Rule-based token extractors for Brazilian brokerage notes.

pub mod amounts;
pub mod dates;
pub mod ids;
pub mod patterns;

pub use amounts::{
    CurrencyExtractor, QuantityExtractor, extract_amount_from_line, extract_value_from_line,
    format_brl_amount, parse_brl_amount,
};
pub use dates::{DateExtractor, extract_date_from_line};
pub use ids::extract_leading_id;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, left to right.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
