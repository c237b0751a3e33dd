use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryCategory {
    Seeds,
    Fertilizer,
    Pesticide,
    Equipment,
    Feed,
    Other,
}

impl std::fmt::Display for InventoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryCategory::Seeds => write!(f, "Seeds"),
            InventoryCategory::Fertilizer => write!(f, "Fertilizer"),
            InventoryCategory::Pesticide => write!(f, "Pesticide"),
            InventoryCategory::Equipment => write!(f, "Equipment"),
            InventoryCategory::Feed => write!(f, "Feed"),
            InventoryCategory::Other => write!(f, "Other"),
        }
    }
}

/// A stock line on the inventory page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: InventoryCategory,
    pub quantity: Decimal,
    /// "kg", "bags", "litres", ...
    pub unit: String,
    /// At or below this quantity the item shows as low stock
    pub reorder_level: Decimal,
    /// Last day the quantity changed
    pub updated: NaiveDate,
}

impl InventoryItem {
    pub fn new(
        name: impl Into<String>,
        category: InventoryCategory,
        quantity: Decimal,
        unit: impl Into<String>,
        reorder_level: Decimal,
        updated: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            quantity,
            unit: unit.into(),
            reorder_level,
            updated,
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}
