use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::summary::FinancialSummary;
use crate::models::transaction::{Transaction, TransactionSortOrder, TransactionType};

/// Longest description accepted from the form.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Manages the session's income/expense records.
///
/// Pure business logic with no I/O. Transactions are kept newest first.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Validate form input, build the transaction and insert it. Returns the new id.
    pub fn add_transaction(
        &self,
        ledger: &mut Vec<Transaction>,
        transaction_type: TransactionType,
        amount: Decimal,
        date: NaiveDate,
        description: &str,
    ) -> Result<Uuid, CoreError> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::invalid_field("amount", "must be greater than zero"));
        }
        let tx = Transaction::new(transaction_type, amount, date, description.trim());
        let id = tx.id;
        self.insert(ledger, tx)?;
        Ok(id)
    }

    /// Insert an already-built transaction (import path), keeping newest-first order.
    /// The stored sign is re-derived from the type, whatever the record carried.
    pub fn insert(&self, ledger: &mut Vec<Transaction>, mut tx: Transaction) -> Result<(), CoreError> {
        self.validate(&tx)?;
        tx.amount = tx.signed_amount();
        if ledger.iter().any(|t| t.id == tx.id) {
            return Err(CoreError::ValidationError(format!(
                "Transaction {} already exists",
                tx.id
            )));
        }
        // Same-day entries: the latest one goes first
        let pos = ledger.partition_point(|t| t.date > tx.date);
        ledger.insert(pos, tx);
        Ok(())
    }

    /// Remove a transaction by id and return it.
    pub fn remove_transaction(
        &self,
        ledger: &mut Vec<Transaction>,
        id: Uuid,
    ) -> Result<Transaction, CoreError> {
        let idx = ledger
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found("Transaction", id))?;
        Ok(ledger.remove(idx))
    }

    /// Totals over `transactions`, signs re-derived from each type.
    pub fn summary(&self, transactions: &[Transaction]) -> FinancialSummary {
        let mut summary = FinancialSummary::default();
        for tx in transactions {
            match tx.transaction_type {
                TransactionType::Income => summary.total_income += tx.magnitude(),
                TransactionType::Expense => summary.total_expense += tx.magnitude(),
            }
        }
        summary.net_balance = summary.total_income - summary.total_expense;
        summary.transaction_count = transactions.len();
        summary
    }

    pub fn sorted<'a>(
        &self,
        transactions: &'a [Transaction],
        order: &TransactionSortOrder,
    ) -> Vec<&'a Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        match order {
            TransactionSortOrder::DateDesc => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
            TransactionSortOrder::DateAsc => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
            TransactionSortOrder::AmountDesc => sorted.sort_by(|a, b| b.magnitude().cmp(&a.magnitude())),
            TransactionSortOrder::AmountAsc => sorted.sort_by(|a, b| a.magnitude().cmp(&b.magnitude())),
        }
        sorted
    }

    /// Case-insensitive match against the description.
    pub fn search<'a>(&self, transactions: &'a [Transaction], query: &str) -> Vec<&'a Transaction> {
        let q = query.trim().to_lowercase();
        transactions
            .iter()
            .filter(|t| t.description.to_lowercase().contains(&q))
            .collect()
    }

    /// CSV with columns: id, date, type, description, amount (signed).
    pub fn export_csv(&self, transactions: &[Transaction]) -> String {
        let mut csv = String::from("id,date,type,description,amount\n");
        for tx in transactions {
            // Quote fields containing commas, quotes, or newlines
            let description = if tx.description.contains(&[',', '"', '\n'][..]) {
                format!("\"{}\"", tx.description.replace('"', "\"\""))
            } else {
                tx.description.clone()
            };
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                tx.id,
                tx.date,
                tx.transaction_type,
                description,
                tx.signed_amount(),
            ));
        }
        csv
    }

    pub fn export_json(&self, transactions: &[Transaction]) -> Result<String, CoreError> {
        serde_json::to_string_pretty(transactions)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize transactions: {e}")))
    }

    /// Form rules: non-zero amount, non-empty description, not dated in the future.
    fn validate(&self, tx: &Transaction) -> Result<(), CoreError> {
        if tx.amount.is_zero() {
            return Err(CoreError::invalid_field("amount", "must be greater than zero"));
        }

        let description = tx.description.trim();
        if description.is_empty() {
            return Err(CoreError::invalid_field("description", "is required"));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(CoreError::invalid_field(
                "description",
                format!("must be at most {MAX_DESCRIPTION_LEN} characters"),
            ));
        }

        // Allow +1 day tolerance for timezone differences
        let today = Utc::now().date_naive();
        if let Some(tomorrow) = today.succ_opt() {
            if tx.date > tomorrow {
                return Err(CoreError::invalid_field(
                    "date",
                    format!("{} is in the future", tx.date),
                ));
            }
        }

        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
