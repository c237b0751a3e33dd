use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a financial record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money coming in (crop sales, subsidies, ...)
    Income,
    /// Money going out (seeds, labour, diesel, ...)
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "Income"),
            TransactionType::Expense => write!(f, "Expense"),
        }
    }
}

/// Sort order for transaction listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest magnitude first
    AmountDesc,
    /// Smallest magnitude first
    AmountAsc,
}

/// A single income or expense record in the farm ledger.
///
/// The sign of `amount` is owned by `transaction_type`: income is stored
/// positive, expense is stored negated. Constructors enforce this, whatever
/// sign the caller passes in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Calendar day of the transaction
    pub date: NaiveDate,

    /// Free-text description entered by the user
    pub description: String,

    /// Income or Expense
    pub transaction_type: TransactionType,

    /// Signed amount (negative for expenses)
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(
        transaction_type: TransactionType,
        amount: Decimal,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            transaction_type,
            amount: Self::signed(transaction_type, amount),
        }
    }

    /// Amount as shown in the UI, never negative.
    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }

    /// Amount with the sign re-derived from the type, ignoring whatever sign is stored.
    pub fn signed_amount(&self) -> Decimal {
        Self::signed(self.transaction_type, self.amount)
    }

    fn signed(transaction_type: TransactionType, amount: Decimal) -> Decimal {
        match transaction_type {
            TransactionType::Income => amount.abs(),
            TransactionType::Expense => -amount.abs(),
        }
    }
}
