use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Time window used to bucket transactions for the finance chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Monthly,
    Quarterly,
    Yearly,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Monthly => write!(f, "monthly"),
            Granularity::Quarterly => write!(f, "quarterly"),
            Granularity::Yearly => write!(f, "yearly"),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Granularity::Daily),
            "monthly" | "month" => Ok(Granularity::Monthly),
            "quarterly" | "quarter" => Ok(Granularity::Quarterly),
            "yearly" | "year" => Ok(Granularity::Yearly),
            other => Err(format!("Unknown granularity: {other}")),
        }
    }
}

/// One bar group of the income/expense chart.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBucket {
    /// Sortable bucket key, e.g. "2024-06", "2024-Q2", "2024-06-15", "2024"
    pub key: String,

    /// Display label, e.g. "Jun 24", "Q2 2024"
    pub label: String,

    /// Sum of income in this window
    pub income: Decimal,

    /// Sum of expenses in this window, as a positive magnitude
    pub expense: Decimal,
}

impl ChartBucket {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}
