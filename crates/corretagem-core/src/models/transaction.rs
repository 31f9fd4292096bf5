//! Buy and sell operations listed on a brokerage note.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::security::Security;

/// Rate withheld at source on sales (0.005%).
const SOURCE_WITHHELD_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 5);

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Buy,
    Sell,
}

/// A single operation on a security. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    kind: TransactionKind,
    quantity: u64,
    unit_price: Decimal,
    security: Security,
    source_withheld_taxes: Decimal,
}

impl Transaction {
    /// Build a transaction, deriving the tax withheld at source on sales.
    pub fn new(
        kind: TransactionKind,
        quantity: u64,
        unit_price: Decimal,
        security: Security,
    ) -> Self {
        let source_withheld_taxes = match kind {
            TransactionKind::Sell => (unit_price * Decimal::from(quantity) * SOURCE_WITHHELD_RATE)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            TransactionKind::Buy => Decimal::ZERO,
        };
        Self {
            kind,
            quantity,
            unit_price,
            security,
            source_withheld_taxes,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn security(&self) -> &Security {
        &self.security
    }

    /// Tax withheld at source, rounded to cents (ties away from zero). Zero on buys.
    pub fn source_withheld_taxes(&self) -> Decimal {
        self.source_withheld_taxes
    }

    /// Gross value of the operation.
    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
