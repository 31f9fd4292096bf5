//! Brokerage notes and their fee categories.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;
use crate::error::ExtractionError;

/// Fee categories that can be charged on a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    SettlementFee,
    RegistrationFee,
    TermFee,
    AnaFee,
    Emoluments,
    OperationalFee,
    Execution,
    CustodyFee,
    Taxes,
    Irrf,
    Others,
}

impl FeeType {
    pub const ALL: [FeeType; 11] = [
        FeeType::SettlementFee,
        FeeType::RegistrationFee,
        FeeType::TermFee,
        FeeType::AnaFee,
        FeeType::Emoluments,
        FeeType::OperationalFee,
        FeeType::Execution,
        FeeType::CustodyFee,
        FeeType::Taxes,
        FeeType::Irrf,
        FeeType::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeeType::SettlementFee => "SETTLEMENT_FEE",
            FeeType::RegistrationFee => "REGISTRATION_FEE",
            FeeType::TermFee => "TERM_FEE",
            FeeType::AnaFee => "ANA_FEE",
            FeeType::Emoluments => "EMOLUMENTS",
            FeeType::OperationalFee => "OPERATIONAL_FEE",
            FeeType::Execution => "EXECUTION",
            FeeType::CustodyFee => "CUSTODY_FEE",
            FeeType::Taxes => "TAXES",
            FeeType::Irrf => "IRRF",
            FeeType::Others => "OTHERS",
        }
    }
}

impl fmt::Display for FeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeeType {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        FeeType::ALL
            .into_iter()
            .find(|fee| fee.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ExtractionError::InvalidFeeType(s.to_string()))
    }
}

impl TryFrom<String> for FeeType {
    type Error = ExtractionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Identity of a note: notes sharing a key are the same note, even across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteKey {
    pub reference_id: Option<u64>,
    pub reference_date: NaiveDate,
}

/// Running fee totals of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fees {
    pub settlement_fee: Decimal,
    pub registration_fee: Decimal,
    pub term_fee: Decimal,
    pub ana_fee: Decimal,
    pub emoluments: Decimal,
    pub operational_fee: Decimal,
    pub execution: Decimal,
    pub custody_fee: Decimal,
    pub taxes: Decimal,
    pub irrf: Decimal,
    pub others: Decimal,
}

impl Fees {
    pub fn get(&self, fee: FeeType) -> Decimal {
        match fee {
            FeeType::SettlementFee => self.settlement_fee,
            FeeType::RegistrationFee => self.registration_fee,
            FeeType::TermFee => self.term_fee,
            FeeType::AnaFee => self.ana_fee,
            FeeType::Emoluments => self.emoluments,
            FeeType::OperationalFee => self.operational_fee,
            FeeType::Execution => self.execution,
            FeeType::CustodyFee => self.custody_fee,
            FeeType::Taxes => self.taxes,
            FeeType::Irrf => self.irrf,
            FeeType::Others => self.others,
        }
    }

    fn slot(&mut self, fee: FeeType) -> &mut Decimal {
        match fee {
            FeeType::SettlementFee => &mut self.settlement_fee,
            FeeType::RegistrationFee => &mut self.registration_fee,
            FeeType::TermFee => &mut self.term_fee,
            FeeType::AnaFee => &mut self.ana_fee,
            FeeType::Emoluments => &mut self.emoluments,
            FeeType::OperationalFee => &mut self.operational_fee,
            FeeType::Execution => &mut self.execution,
            FeeType::CustodyFee => &mut self.custody_fee,
            FeeType::Taxes => &mut self.taxes,
            FeeType::Irrf => &mut self.irrf,
            FeeType::Others => &mut self.others,
        }
    }

    /// Sum of every category.
    pub fn total(&self) -> Decimal {
        FeeType::ALL.into_iter().map(|fee| self.get(fee)).sum()
    }
}

/// One brokerage note: trades of a trading day plus the fees charged on them.
///
/// Fee totals only grow by accumulation; the transaction list keeps the order
/// lines were read in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokerageNote {
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_id: Option<u64>,
    reference_date: NaiveDate,
    #[serde(flatten)]
    fees: Fees,
    transactions: Vec<Transaction>,
}

impl BrokerageNote {
    /// Create an empty note with zeroed fees.
    pub fn new(key: NoteKey) -> Self {
        Self {
            reference_id: key.reference_id,
            reference_date: key.reference_date,
            fees: Fees::default(),
            transactions: Vec::new(),
        }
    }

    pub fn key(&self) -> NoteKey {
        NoteKey {
            reference_id: self.reference_id,
            reference_date: self.reference_date,
        }
    }

    pub fn reference_id(&self) -> Option<u64> {
        self.reference_id
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn fees(&self) -> &Fees {
        &self.fees
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Add `value` to the running total of `fee`.
    pub fn update_fee(&mut self, fee: FeeType, value: Decimal) {
        *self.fees.slot(fee) += value;
    }

    /// Add `value` to the fee category called `name` (e.g. `"EMOLUMENTS"`).
    pub fn update_fee_by_name(&mut self, name: &str, value: Decimal) -> Result<(), ExtractionError> {
        let fee = name.parse()?;
        self.update_fee(fee, value);
        Ok(())
    }
}
