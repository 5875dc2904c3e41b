//! Read-only views derived from the inventory. Nothing here is stored.

use stockroom_core::{Entity, ProductId};

use crate::money::Money;
use crate::product::{ProductRecord, StockStatus};

/// Shown in place of the table when there is nothing to list.
pub const EMPTY_INVENTORY_MESSAGE: &str = "No products found. Add some products to get started.";

/// Dashboard aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventorySummary {
    pub total_value: Money,
    pub low_stock_count: usize,
    pub total_count: usize,
}

/// Dashboard aggregates formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDisplay {
    pub total_value: String,
    pub low_stock_count: String,
    pub total_count: String,
}

impl InventorySummary {
    pub fn display(&self) -> SummaryDisplay {
        SummaryDisplay {
            total_value: self.total_value.to_string(),
            low_stock_count: self.low_stock_count.to_string(),
            total_count: self.total_count.to_string(),
        }
    }
}

pub fn summary(items: &[ProductRecord]) -> InventorySummary {
    InventorySummary {
        total_value: items.iter().map(ProductRecord::inventory_value).sum(),
        low_stock_count: items.iter().filter(|item| item.is_low_stock()).count(),
        total_count: items.len(),
    }
}

/// Case-insensitive substring match on name or category.
///
/// A blank term matches everything; order is always preserved.
pub fn search(items: &[ProductRecord], term: &str) -> Vec<ProductRecord> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            item.name().to_lowercase().contains(&needle)
                || item.category().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn find<'a>(items: &'a [ProductRecord], id: &ProductId) -> Option<&'a ProductRecord> {
    items.iter().find(|item| item.has_id(id))
}

/// One table row, every column already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub cost_price: String,
    pub selling_price: String,
    pub inventory_value: String,
    pub status: StockStatus,
}

impl From<&ProductRecord> for ProductRow {
    fn from(item: &ProductRecord) -> Self {
        Self {
            id: item.id().clone(),
            name: item.name().to_string(),
            category: item.category().to_string(),
            quantity: item.quantity(),
            cost_price: item.cost_price().to_string(),
            selling_price: item.selling_price().to_string(),
            inventory_value: item.inventory_value().to_string(),
            status: item.stock_status(),
        }
    }
}

pub fn rows(items: &[ProductRecord]) -> Vec<ProductRow> {
    items.iter().map(ProductRow::from).collect()
}
