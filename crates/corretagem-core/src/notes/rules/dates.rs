//! Date extraction for brokerage notes.

use chrono::NaiveDate;

use super::FieldExtractor;
use super::patterns::DATE_DMY;
use crate::error::ExtractionError;

/// `dd/mm/yyyy` date extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDate;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = DATE_DMY.captures(text)?;
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_DMY
            .find_iter(text)
            .filter_map(|m| self.extract(m.as_str()))
            .collect()
    }
}

/// First `dd/mm/yyyy` date of a line.
///
/// Only call this where the layout guarantees a date; a missing or invalid
/// first token is an error.
pub fn extract_date_from_line(line: &str) -> Result<NaiveDate, ExtractionError> {
    DateExtractor::new()
        .extract(line)
        .ok_or_else(|| ExtractionError::MissingDate(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_from_line() {
        assert_eq!(
            extract_date_from_line(" 03/02/2024 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()
        );
    }

    #[test]
    fn test_extract_date_glued_to_text() {
        assert_eq!(
            extract_date_from_line("Nr. nota Folha Data pregão4535159 1 2/5/2022C.I").unwrap(),
            NaiveDate::from_ymd_opt(2022, 5, 2).unwrap()
        );
    }

    #[test]
    fn test_extract_date_first_wins() {
        let extractor = DateExtractor::new();
        let dates = extractor.extract_all("02/05/2022 Líquido para 04/05/2022");
        assert_eq!(dates.len(), 2);
        assert_eq!(
            extractor.extract("02/05/2022 Líquido para 04/05/2022"),
            Some(NaiveDate::from_ymd_opt(2022, 5, 2).unwrap())
        );
    }

    #[test]
    fn test_extract_date_missing() {
        assert_eq!(
            extract_date_from_line("Data pregão"),
            Err(ExtractionError::MissingDate("Data pregão".to_string()))
        );
        assert!(extract_date_from_line("31/02/2022").is_err());
    }
}
