use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals shown at the top of the financial tracker page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Sum of all income transactions
    pub total_income: Decimal,

    /// Sum of all expense transactions, as a positive magnitude
    pub total_expense: Decimal,

    /// total_income - total_expense
    pub net_balance: Decimal,

    /// Number of transactions included
    pub transaction_count: usize,
}

impl Default for FinancialSummary {
    fn default() -> Self {
        Self {
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            net_balance: Decimal::ZERO,
            transaction_count: 0,
        }
    }
}
