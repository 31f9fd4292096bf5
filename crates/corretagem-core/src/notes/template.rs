//! Data-driven broker templates.
//!
//! A template records where a broker prints each section of a note, how its
//! transaction table is laid out and which summary labels carry which fee.

use serde::{Deserialize, Serialize};

use super::table::{ColumnLayout, TableScan};
use crate::models::FeeType;

/// Layout description of one broker's notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerTemplate {
    /// Human readable broker name.
    pub name: String,

    /// Tax id (CNPJ) printed on the broker's notes, used for dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    #[serde(default)]
    pub page: PageSize,

    pub header: HeaderLayout,

    pub transactions: TransactionLayout,

    pub fees: FeeLayout,
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl Default for PageSize {
    fn default() -> Self {
        Self {
            width: 601.0,
            height: 842.0,
        }
    }
}

/// Header block holding the note identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderLayout {
    /// Upper anchor candidates.
    pub start: Vec<String>,
    /// Lower anchor candidates.
    pub end: Vec<String>,
    /// Read a reference id from the header text.
    #[serde(default)]
    pub reference_id: bool,
}

/// Transaction table placement and columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLayout {
    /// Title above the table.
    pub title: Vec<String>,
    /// Title below the table.
    pub summary_title: Vec<String>,
    pub table: TableScan,
    /// Indicator token of a buy; any other token is a sell.
    pub buy_indicator: String,
    pub columns: ColumnLayout,
}

/// Financial summary placement and fee labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeLayout {
    pub title: Vec<String>,
    /// Anchor below the summary. When absent from a page, the page has no fees.
    pub end_title: Vec<String>,
    /// Tried in order; the first label prefixing a line wins.
    pub labels: Vec<FeeLabel>,
}

/// Summary line prefix and the fee it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLabel {
    pub label: String,
    pub fee: FeeType,
}

impl FeeLabel {
    pub fn new(label: impl Into<String>, fee: FeeType) -> Self {
        Self {
            label: label.into(),
            fee,
        }
    }
}

impl FeeLayout {
    /// Fee carried by a summary line, if any label prefixes it.
    pub fn match_line(&self, line: &str) -> Option<FeeType> {
        self.labels
            .iter()
            .find(|label| line.starts_with(label.label.as_str()))
            .map(|label| label.fee)
    }
}

fn phrases(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl BrokerTemplate {
    /// Standard B3 layout, shared by most brokers.
    pub fn b3() -> Self {
        Self {
            name: "B3".to_string(),
            tax_id: None,
            page: PageSize::default(),
            header: HeaderLayout {
                start: phrases(&["Nr. nota"]),
                end: phrases(&["C.I"]),
                reference_id: true,
            },
            transactions: TransactionLayout {
                title: phrases(&["Negócios realizados"]),
                summary_title: phrases(&["Resumo dos Negócios"]),
                table: TableScan::Delimited {
                    start_marker: "Q".to_string(),
                    end_marker: "Resumo dos Negócios".to_string(),
                },
                buy_indicator: "C".to_string(),
                columns: ColumnLayout::default(),
            },
            fees: FeeLayout {
                title: phrases(&["Resumo Financeiro"]),
                end_title: phrases(&["Líquido para"]),
                labels: vec![
                    FeeLabel::new("Taxa de liquidação", FeeType::SettlementFee),
                    FeeLabel::new("Taxa de Registro", FeeType::RegistrationFee),
                    FeeLabel::new("Taxa de termo/opções", FeeType::TermFee),
                    FeeLabel::new("Taxa A.N.A.", FeeType::AnaFee),
                    FeeLabel::new("Emolumentos", FeeType::Emoluments),
                    FeeLabel::new("Taxa Operacional", FeeType::OperationalFee),
                    FeeLabel::new("Execução", FeeType::Execution),
                    FeeLabel::new("Taxa de Custódia", FeeType::CustodyFee),
                    FeeLabel::new("Impostos", FeeType::Taxes),
                    FeeLabel::new("I.R.R.F.", FeeType::Irrf),
                    FeeLabel::new("Outros", FeeType::Others),
                ],
            },
        }
    }

    /// NuInvest layout: the table is split in blocks of `BOVESPA` rows.
    pub fn nuinvest() -> Self {
        let b3 = Self::b3();
        Self {
            name: "NuInvest".to_string(),
            tax_id: Some("62.169.875/0001-79".to_string()),
            page: PageSize::default(),
            header: HeaderLayout {
                start: phrases(&["Número da nota"]),
                end: phrases(&["Valor/Ajuste D/C"]),
                reference_id: true,
            },
            transactions: TransactionLayout {
                title: phrases(&["Nome do Cliente"]),
                table: TableScan::Continuation {
                    start_marker: "Mercado".to_string(),
                    row_prefix: "BOVESPA".to_string(),
                },
                ..b3.transactions
            },
            fees: FeeLayout {
                labels: vec![
                    FeeLabel::new("Taxa de Liquidação", FeeType::SettlementFee),
                    FeeLabel::new("Taxa de Registro", FeeType::RegistrationFee),
                    FeeLabel::new("Taxa de Termo / Opções", FeeType::TermFee),
                    FeeLabel::new("Taxa A.N.A.", FeeType::AnaFee),
                    FeeLabel::new("Emolumentos", FeeType::Emoluments),
                    FeeLabel::new("Taxa Operacional", FeeType::OperationalFee),
                    FeeLabel::new("Execução", FeeType::Execution),
                    FeeLabel::new("Taxa de Custódia", FeeType::CustodyFee),
                    FeeLabel::new("Impostos", FeeType::Taxes),
                    FeeLabel::new("I.R.R.F.", FeeType::Irrf),
                    FeeLabel::new("Outros", FeeType::Others),
                ],
                ..b3.fees
            },
        }
    }

    /// Built-in templates recognised by tax id.
    pub fn builtin() -> Vec<Self> {
        vec![Self::nuinvest()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_match_line_prefix() {
        let fees = BrokerTemplate::b3().fees;
        assert_eq!(fees.match_line("Taxa de liquidação 7,92 D"), Some(FeeType::SettlementFee));
        assert_eq!(
            fees.match_line("I.R.R.F. s/ operações, base R$15.850,00 0,79"),
            Some(FeeType::Irrf)
        );
        assert_eq!(fees.match_line("Emolumentos 1,58 D"), Some(FeeType::Emoluments));
    }

    #[test]
    fn test_match_line_is_case_sensitive_prefix() {
        let fees = BrokerTemplate::b3().fees;
        assert_eq!(fees.match_line("Taxa de Liquidação 7,92 D"), None);
        assert_eq!(fees.match_line("Total Emolumentos 1,58"), None);
        assert_eq!(fees.match_line("Líquido para 04/05/2022"), None);
    }

    #[test]
    fn test_match_line_first_label_wins() {
        let fees = FeeLayout {
            title: vec![],
            end_title: vec![],
            labels: vec![
                FeeLabel::new("Taxa", FeeType::Others),
                FeeLabel::new("Taxa Operacional", FeeType::OperationalFee),
            ],
        };
        assert_eq!(fees.match_line("Taxa Operacional 0,00"), Some(FeeType::Others));
    }

    #[test]
    fn test_nuinvest_template() {
        let template = BrokerTemplate::nuinvest();
        assert_eq!(template.tax_id.as_deref(), Some("62.169.875/0001-79"));
        assert_eq!(template.transactions.summary_title, vec!["Resumo dos Negócios"]);
        assert_eq!(template.fees.title, vec!["Resumo Financeiro"]);
        assert_eq!(
            template.fees.match_line("Taxa de Liquidação 0,35"),
            Some(FeeType::SettlementFee)
        );
    }

    #[test]
    fn test_template_json() {
        let json = serde_json::to_string(&BrokerTemplate::nuinvest()).unwrap();
        assert!(json.contains(r#""strategy":"continuation""#));
        assert!(json.contains(r#""fee":"SETTLEMENT_FEE""#));
        let back: BrokerTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BrokerTemplate::nuinvest());
    }

    #[test]
    fn test_template_unknown_fee() {
        let mut value = serde_json::to_value(BrokerTemplate::b3()).unwrap();
        value["fees"]["labels"][0]["fee"] = serde_json::json!("BROKERAGE");
        let err = serde_json::from_value::<BrokerTemplate>(value).unwrap_err();
        assert!(err.to_string().contains("invalid brokerage note fee type"));
    }
}
