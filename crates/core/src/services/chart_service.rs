use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::chart::{ChartBucket, Granularity};
use crate::models::transaction::{Transaction, TransactionType};

/// Buckets ledger transactions into income/expense totals for the finance chart.
///
/// Stateless; the same input always gives the same buckets.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Group `transactions` into one bucket per day/month/quarter/year.
    ///
    /// Each transaction adds its magnitude to `income` or `expense` depending on
    /// its type; the stored sign is never trusted. Buckets come back sorted by key
    /// with a plain string comparison.
    pub fn aggregate(&self, transactions: &[Transaction], granularity: Granularity) -> Vec<ChartBucket> {
        let mut buckets: HashMap<String, ChartBucket> = HashMap::new();

        for tx in transactions {
            let key = Self::bucket_key(tx.date, granularity);
            let bucket = buckets.entry(key.clone()).or_insert_with(|| ChartBucket {
                label: Self::bucket_label(tx.date, granularity),
                key,
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            });

            match tx.transaction_type {
                TransactionType::Income => bucket.income += tx.magnitude(),
                TransactionType::Expense => bucket.expense += tx.magnitude(),
            }
        }

        let mut result: Vec<ChartBucket> = buckets.into_values().collect();
        result.sort_by(|a, b| a.key.cmp(&b.key));
        result
    }

    /// Same as `aggregate`, restricted to transactions dated within `from..=to`.
    pub fn aggregate_range(
        &self,
        transactions: &[Transaction],
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ChartBucket>, CoreError> {
        if from > to {
            return Err(CoreError::ValidationError(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }
        let in_range: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| tx.date >= from && tx.date <= to)
            .cloned()
            .collect();
        Ok(self.aggregate(&in_range, granularity))
    }

    /// Sortable key: `2024-01-15`, `2024-01`, `2024-Q1`, `2024`.
    pub fn bucket_key(date: NaiveDate, granularity: Granularity) -> String {
        match granularity {
            Granularity::Daily => date.format("%Y-%m-%d").to_string(),
            Granularity::Monthly => date.format("%Y-%m").to_string(),
            Granularity::Quarterly => format!("{}-Q{}", date.year(), Self::quarter(date)),
            Granularity::Yearly => date.year().to_string(),
        }
    }

    /// Display label: `15 Jan 24`, `Jan 24`, `Q1 2024`, `2024`.
    pub fn bucket_label(date: NaiveDate, granularity: Granularity) -> String {
        match granularity {
            Granularity::Daily => date.format("%d %b %y").to_string(),
            Granularity::Monthly => date.format("%b %y").to_string(),
            Granularity::Quarterly => format!("Q{} {}", Self::quarter(date), date.year()),
            Granularity::Yearly => date.year().to_string(),
        }
    }

    /// 1-indexed quarter: months 1–3 → 1 … 10–12 → 4.
    pub fn quarter(date: NaiveDate) -> u32 {
        (date.month() - 1) / 3 + 1
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
