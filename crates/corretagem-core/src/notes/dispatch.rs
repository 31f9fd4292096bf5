//! Broker selection by the tax id printed on a document.

use tracing::debug;

use super::NoteExtractor;
use super::parser::NoteParser;
use super::template::BrokerTemplate;
use crate::error::Result;
use crate::models::{BrokerageNote, CorretagemConfig};
use crate::pdf::Document;

/// First template whose tax id occurs in the document.
///
/// Templates without a tax id are never selected here.
pub fn select_template<'t>(
    document: &Document,
    templates: &'t [BrokerTemplate],
) -> Option<&'t BrokerTemplate> {
    templates.iter().find(|template| {
        template
            .tax_id
            .as_deref()
            .is_some_and(|tax_id| document.contains_text(tax_id))
    })
}

/// Decodes a document once and parses it with the matching broker template,
/// falling back to the standard B3 layout.
#[derive(Debug)]
pub struct ParserFactory {
    document: Document,
    templates: Vec<BrokerTemplate>,
    fallback: BrokerTemplate,
    max_pages: usize,
}

impl ParserFactory {
    /// Decode PDF bytes, authenticating with `password` if encrypted.
    pub fn new(data: &[u8], password: Option<&str>) -> Result<Self> {
        Ok(Self::from_document(Document::open(data, password)?))
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            templates: BrokerTemplate::builtin(),
            fallback: BrokerTemplate::b3(),
            max_pages: 0,
        }
    }

    /// Replace the templates tried before the fallback.
    pub fn with_templates(mut self, templates: Vec<BrokerTemplate>) -> Self {
        self.templates = templates;
        self
    }

    /// Only parse the first `max_pages` pages (0 = all).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Apply broker and page settings from a configuration.
    pub fn with_config(self, config: &CorretagemConfig) -> Self {
        self.with_templates(config.templates())
            .with_max_pages(config.pdf.max_pages)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Template selected for the document.
    pub fn template(&self) -> &BrokerTemplate {
        select_template(&self.document, &self.templates).unwrap_or(&self.fallback)
    }

    pub fn parser(&self) -> NoteParser {
        let template = self.template();
        debug!("Using {} template", template.name);
        NoteParser::new(template.clone()).with_max_pages(self.max_pages)
    }

    pub fn parse(&self) -> Vec<BrokerageNote> {
        self.parser().extract(&self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PositionedWord;
    use crate::pdf::Page;

    fn document(text: &str) -> Document {
        let words = text
            .split_whitespace()
            .enumerate()
            .map(|(i, value)| {
                let x = 10.0 + 60.0 * i as f32;
                PositionedWord::new(x, 10.0, x + 50.0, 20.0, value)
            })
            .collect();
        Document::from_pages(vec![Page::new(1, words)])
    }

    #[test]
    fn test_select_nuinvest_by_tax_id() {
        let factory = ParserFactory::from_document(document("NU INVEST CNPJ: 62.169.875/0001-79"));
        assert_eq!(factory.template().name, "NuInvest");
    }

    #[test]
    fn test_fallback_to_b3() {
        let factory = ParserFactory::from_document(document("XP INVESTIMENTOS CNPJ: 02.332.886/0001-04"));
        assert_eq!(factory.template().name, "B3");
    }

    #[test]
    fn test_first_template_wins() {
        let mut first = BrokerTemplate::b3();
        first.name = "first".to_string();
        first.tax_id = Some("11.111.111/0001-11".to_string());
        let mut second = first.clone();
        second.name = "second".to_string();

        let doc = document("CNPJ 11.111.111/0001-11");
        let templates = [first, second];
        assert_eq!(select_template(&doc, &templates).map(|t| t.name.as_str()), Some("first"));
    }

    #[test]
    fn test_templates_without_tax_id_are_skipped() {
        let doc = document("Nr. nota");
        assert!(select_template(&doc, &[BrokerTemplate::b3()]).is_none());
    }

    #[test]
    fn test_with_config() {
        let mut config = CorretagemConfig::default();
        config.brokers.include_builtin = false;
        let factory = ParserFactory::from_document(document("62.169.875/0001-79")).with_config(&config);
        assert_eq!(factory.template().name, "B3");
    }

    #[test]
    fn test_new_rejects_garbage() {
        assert!(ParserFactory::new(b"not a pdf", None).is_err());
    }
}
