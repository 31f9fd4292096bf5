//! Template-driven note parser.

use tracing::{debug, warn};

use super::registry::NoteRegistry;
use super::rules::{extract_date_from_line, extract_leading_id, extract_value_from_line};
use super::template::BrokerTemplate;
use super::{NoteExtractor, Result};
use crate::layout::{Anchor, Rect, Section, locate, locate_optional, span};
use crate::models::{BrokerageNote, FeeType, NoteKey};
use crate::pdf::{Document, Page};

/// Reads brokerage notes laid out as described by a [`BrokerTemplate`].
///
/// A document is scanned twice: once for transactions, once for fee
/// summaries. Both passes share one [`NoteRegistry`], so a note printed over
/// several pages comes out as a single [`BrokerageNote`].
#[derive(Debug, Clone)]
pub struct NoteParser {
    template: BrokerTemplate,
    /// Pages to scan (0 = all).
    max_pages: usize,
}

impl NoteParser {
    pub fn new(template: BrokerTemplate) -> Self {
        Self {
            template,
            max_pages: 0,
        }
    }

    /// Only scan the first `max_pages` pages (0 = all).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn template(&self) -> &BrokerTemplate {
        &self.template
    }

    fn pages<'d>(&self, document: &'d Document) -> impl Iterator<Item = &'d Page> {
        let limit = match self.max_pages {
            0 => usize::MAX,
            n => n,
        };
        document.pages().iter().take(limit)
    }

    /// Identity of the note printed on `page`, read from its header block.
    pub fn note_key(&self, page: &Page) -> Result<NoteKey> {
        let header = &self.template.header;
        let region = span(&locate(page, &header.start)?, &locate(page, &header.end)?);
        let text = Section::from_region(&page.words, &region).full_text();

        let reference_id = if header.reference_id {
            Some(extract_leading_id(&text)?)
        } else {
            None
        };
        let reference_date = extract_date_from_line(&text)?;

        Ok(NoteKey {
            reference_id,
            reference_date,
        })
    }

    /// Add the transactions of `page` to its note.
    fn collect_transactions(&self, page: &Page, registry: &mut NoteRegistry) -> Result<usize> {
        let key = self.note_key(page)?;
        registry.get_or_insert(key);

        let layout = &self.template.transactions;
        let width = self.template.page.width;
        let title = locate(page, &layout.title)?.full_width(width);
        let summary = locate(page, &layout.summary_title)?.full_width(width);

        let lines = Section::from_region(&page.words, &span(&title, &summary)).text_by_lines();
        let transactions = layout
            .table
            .rows(&lines)
            .into_iter()
            .map(|row| layout.columns.parse_row(row, &layout.buy_indicator))
            .collect::<Result<Vec<_>>>()?;

        let count = transactions.len();
        let note = registry.get_or_insert(key);
        for transaction in transactions {
            note.add_transaction(transaction);
        }
        Ok(count)
    }

    /// Add the fees summarised on `page` to its note.
    fn collect_fees(&self, page: &Page, registry: &mut NoteRegistry) -> Result<usize> {
        let layout = &self.template.fees;
        let title = locate(page, &layout.title)?;
        if let Anchor::Absent = locate_optional(page, &layout.end_title) {
            debug!("Page {} has no fee summary end, no fees read", page.number);
            return Ok(0);
        }

        // Once closed on the page, the summary runs down to the page corner.
        let corner = Rect::point(self.template.page.width, self.template.page.height);
        let section = Section::from_region(&page.words, &span(&title, &corner));

        let fees: Vec<(FeeType, _)> = section
            .text_by_lines()
            .iter()
            .filter_map(|line| {
                layout
                    .match_line(line)
                    .map(|fee| (fee, extract_value_from_line(line)))
            })
            .collect();
        if fees.is_empty() {
            return Ok(0);
        }

        let note = registry.get_or_insert(self.note_key(page)?);
        for (fee, value) in &fees {
            note.update_fee(*fee, *value);
        }
        Ok(fees.len())
    }
}

impl NoteExtractor for NoteParser {
    fn extract(&self, document: &Document) -> Vec<BrokerageNote> {
        let mut registry = NoteRegistry::new();

        for page in self.pages(document) {
            match self.collect_transactions(page, &mut registry) {
                Ok(count) => debug!("Page {}: {} transactions", page.number, count),
                Err(e) => warn!("Skipping transactions of page {}: {}", page.number, e),
            }
        }

        for page in self.pages(document) {
            match self.collect_fees(page, &mut registry) {
                Ok(count) => debug!("Page {}: {} fees", page.number, count),
                Err(e) => warn!("Skipping fees of page {}: {}", page.number, e),
            }
        }

        debug!(
            "Parsed {} brokerage notes with template {}",
            registry.len(),
            self.template.name
        );
        registry.into_notes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::layout::PositionedWord;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    /// Words of `text` laid out from `x` on the baseline `y`.
    fn line(x: f32, y: f32, text: &str) -> Vec<PositionedWord> {
        let mut words = Vec::new();
        let mut left = x;
        for value in text.split_whitespace() {
            let right = left + 4.0 * value.chars().count() as f32;
            words.push(PositionedWord::new(left, y - 8.0, right, y, value));
            left = right + 3.0;
        }
        words
    }

    fn page(number: u32, lines: &[(f32, f32, &str)]) -> Page {
        Page::new(
            number,
            lines
                .iter()
                .flat_map(|(x, y, text)| line(*x, *y, text))
                .collect(),
        )
    }

    fn header(id: &str, date: &str) -> Vec<(f32, f32, String)> {
        vec![
            (400.0, 50.0, "Nr. nota Folha Data pregão".to_string()),
            (400.0, 62.0, format!("{} 1 {}", id, date)),
            (560.0, 90.0, "C.I".to_string()),
        ]
    }

    fn note_page(number: u32, id: &str, date: &str, body: &[(f32, f32, &str)]) -> Page {
        let header = header(id, date);
        let mut lines: Vec<(f32, f32, &str)> =
            header.iter().map(|(x, y, t)| (*x, *y, t.as_str())).collect();
        lines.extend_from_slice(body);
        page(number, &lines)
    }

    #[test]
    fn test_note_key() {
        let parser = NoteParser::new(BrokerTemplate::b3());
        let key = parser
            .note_key(&note_page(1, "4535159", "02/05/2022", &[]))
            .unwrap();
        assert_eq!(key.reference_id, Some(4535159));
        assert_eq!(key.reference_date, NaiveDate::from_ymd_opt(2022, 5, 2).unwrap());
    }

    #[test]
    fn test_note_key_without_header() {
        let parser = NoteParser::new(BrokerTemplate::b3());
        let err = parser.note_key(&page(1, &[(10.0, 10.0, "Outro documento")])).unwrap_err();
        assert_eq!(err, ExtractionError::SectionNotFound("Nr. nota".to_string()));
    }

    #[test]
    fn test_extract_transactions_and_fees() {
        let document = Document::from_pages(vec![note_page(
            1,
            "100",
            "03/05/2022",
            &[
                (20.0, 200.0, "Negócios realizados"),
                (20.0, 215.0, "Q Negociação C/V Tipo mercado"),
                (20.0, 230.0, "1-BOVESPA C VISTA BLAU ON NM 100 24,68 2.468,00 D"),
                (20.0, 400.0, "Resumo dos Negócios"),
                (320.0, 400.0, "Resumo Financeiro"),
                (320.0, 420.0, "Taxa de liquidação 0,61 D"),
                (320.0, 435.0, "Emolumentos 0,12 D"),
                (320.0, 600.0, "Líquido para 05/05/2022 2.468,73 D"),
            ],
        )]);

        let notes = NoteParser::new(BrokerTemplate::b3()).extract(&document);
        assert_eq!(notes.len(), 1);
        let note = &notes[0];
        assert_eq!(note.reference_id(), Some(100));
        assert_eq!(note.transactions().len(), 1);
        assert_eq!(note.transactions()[0].security().name(), "BLAU ON NM");
        assert_eq!(note.fees().settlement_fee, dec!(0.61));
        assert_eq!(note.fees().emoluments, dec!(0.12));
        assert_eq!(note.fees().total(), dec!(0.73));
    }

    #[test]
    fn test_fees_need_end_anchor() {
        let document = Document::from_pages(vec![note_page(
            1,
            "100",
            "03/05/2022",
            &[
                (320.0, 400.0, "Resumo Financeiro"),
                (320.0, 420.0, "Taxa de liquidação 0,61 D"),
            ],
        )]);

        let notes = NoteParser::new(BrokerTemplate::b3()).extract(&document);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].fees().total(), dec!(0));
        assert!(notes[0].transactions().is_empty());
    }

    #[test]
    fn test_max_pages() {
        let document = Document::from_pages(vec![
            note_page(1, "1", "02/05/2022", &[]),
            note_page(2, "2", "03/05/2022", &[]),
        ]);
        let notes = NoteParser::new(BrokerTemplate::b3())
            .with_max_pages(1)
            .extract(&document);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].reference_id(), Some(1));
    }
}
