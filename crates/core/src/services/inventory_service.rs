use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::inventory::{InventoryCategory, InventoryItem};

/// Stock bookkeeping for the inventory page.
pub struct InventoryService;

impl InventoryService {
    pub fn new() -> Self {
        Self
    }

    /// Validate and add a stock line. Returns the new id.
    pub fn add_item(&self, items: &mut Vec<InventoryItem>, item: InventoryItem) -> Result<Uuid, CoreError> {
        if item.name.trim().is_empty() {
            return Err(CoreError::invalid_field("name", "is required"));
        }
        if item.unit.trim().is_empty() {
            return Err(CoreError::invalid_field("unit", "is required"));
        }
        if item.quantity < Decimal::ZERO {
            return Err(CoreError::invalid_field("quantity", "must not be negative"));
        }
        if item.reorder_level < Decimal::ZERO {
            return Err(CoreError::invalid_field("reorder_level", "must not be negative"));
        }
        let id = item.id;
        items.push(item);
        Ok(id)
    }

    /// Add `delta` (negative to consume) to an item's quantity. Returns the new quantity.
    pub fn adjust_quantity(
        &self,
        items: &mut [InventoryItem],
        id: Uuid,
        delta: Decimal,
        on: NaiveDate,
    ) -> Result<Decimal, CoreError> {
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found("Inventory item", id))?;

        let updated = item.quantity + delta;
        if updated < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "Cannot use {} {} of {}: only {} in stock",
                delta.abs(),
                item.unit,
                item.name,
                item.quantity
            )));
        }
        item.quantity = updated;
        item.updated = on;
        Ok(updated)
    }

    pub fn remove_item(&self, items: &mut Vec<InventoryItem>, id: Uuid) -> Result<InventoryItem, CoreError> {
        let idx = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found("Inventory item", id))?;
        Ok(items.remove(idx))
    }

    /// All items, alphabetical by name (case-insensitive).
    pub fn list<'a>(&self, items: &'a [InventoryItem]) -> Vec<&'a InventoryItem> {
        let mut sorted: Vec<&InventoryItem> = items.iter().collect();
        sorted.sort_by_key(|i| i.name.to_lowercase());
        sorted
    }

    pub fn low_stock<'a>(&self, items: &'a [InventoryItem]) -> Vec<&'a InventoryItem> {
        self.list(items).into_iter().filter(|i| i.is_low_stock()).collect()
    }

    pub fn by_category<'a>(
        &self,
        items: &'a [InventoryItem],
        category: InventoryCategory,
    ) -> Vec<&'a InventoryItem> {
        self.list(items)
            .into_iter()
            .filter(|i| i.category == category)
            .collect()
    }
}

impl Default for InventoryService {
    fn default() -> Self {
        Self::new()
    }
}
