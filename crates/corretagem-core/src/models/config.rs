//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::notes::template::BrokerTemplate;

/// Main configuration for corretagem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorretagemConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Broker templates used to read notes.
    pub brokers: BrokerConfig,

    /// Output defaults for the command line.
    pub output: OutputConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Password tried on encrypted documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

/// Broker template selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Extra templates, tried before the built-in ones.
    pub templates: Vec<BrokerTemplate>,

    /// Also try the built-in templates.
    pub include_builtin: bool,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            templates: Vec::new(),
            include_builtin: true,
        }
    }
}

/// Output format for parsed notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Text,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

impl CorretagemConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Templates to try on a document, in order.
    pub fn templates(&self) -> Vec<BrokerTemplate> {
        let mut templates = self.brokers.templates.clone();
        if self.brokers.include_builtin {
            templates.extend(BrokerTemplate::builtin());
        }
        templates
    }
}
