//! Rendering of parsed notes as JSON, CSV or text.

use rust_decimal::Decimal;

use corretagem_core::models::{FeeType, OutputFormat};
use corretagem_core::notes::rules::format_brl_amount;
use corretagem_core::{BrokerageNote, TransactionKind};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// JSON output
    Json,
    /// CSV output, one row per transaction
    Csv,
    /// Plain text summary
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

pub fn extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    }
}

pub fn format_notes(
    notes: &[BrokerageNote],
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(notes)?),
        OutputFormat::Json => Ok(serde_json::to_string(notes)?),
        OutputFormat::Csv => format_csv(notes),
        OutputFormat::Text => Ok(format_text(notes)),
    }
}

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Buy => "BUY",
        TransactionKind::Sell => "SELL",
    }
}

fn format_csv(notes: &[BrokerageNote]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "reference_id",
        "reference_date",
        "kind",
        "security",
        "ticker",
        "quantity",
        "unit_price",
        "total",
        "source_withheld_taxes",
    ])?;

    for note in notes {
        let reference_id = note.reference_id().map(|id| id.to_string()).unwrap_or_default();
        let reference_date = note.reference_date().to_string();
        for transaction in note.transactions() {
            let quantity = transaction.quantity().to_string();
            let unit_price = transaction.unit_price().to_string();
            let total = transaction.total().to_string();
            let withheld = transaction.source_withheld_taxes().to_string();
            wtr.write_record([
                reference_id.as_str(),
                reference_date.as_str(),
                kind_label(transaction.kind()),
                transaction.security().name(),
                transaction.security().ticker().unwrap_or_default(),
                quantity.as_str(),
                unit_price.as_str(),
                total.as_str(),
                withheld.as_str(),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(notes: &[BrokerageNote]) -> String {
    let mut output = String::new();

    for note in notes {
        match note.reference_id() {
            Some(id) => output.push_str(&format!("Note {} of {}\n", id, note.reference_date())),
            None => output.push_str(&format!("Note of {}\n", note.reference_date())),
        }

        output.push_str("\nTransactions:\n");
        for transaction in note.transactions() {
            output.push_str(&format!(
                "  {:<4} {:>8} x R$ {:>10}  {}\n",
                kind_label(transaction.kind()),
                transaction.quantity(),
                format_brl_amount(transaction.unit_price()),
                transaction.security().name()
            ));
        }

        output.push_str("\nFees:\n");
        for fee in FeeType::ALL {
            let value = note.fees().get(fee);
            if value != Decimal::ZERO {
                output.push_str(&format!("  {:<18} R$ {}\n", fee.as_str(), format_brl_amount(value)));
            }
        }
        output.push_str(&format!(
            "  {:<18} R$ {}\n\n",
            "TOTAL",
            format_brl_amount(note.fees().total())
        ));
    }

    output
}
