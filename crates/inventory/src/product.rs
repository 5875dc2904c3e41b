use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

use crate::money::Money;

/// Items with fewer units than this are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Stock status shown next to each product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn for_quantity(quantity: i64) -> Self {
        if quantity < LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }
}

/// The five user-editable fields of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub cost_price: Money,
    pub selling_price: Money,
}

/// Create-or-update request: no id creates, an id edits that record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub id: Option<ProductId>,
    pub details: ProductDetails,
}

impl ProductInput {
    pub fn create(details: ProductDetails) -> Self {
        Self { id: None, details }
    }

    pub fn update(id: ProductId, details: ProductDetails) -> Self {
        Self {
            id: Some(id),
            details,
        }
    }
}

/// One inventory line item, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    id: ProductId,
    name: String,
    category: String,
    #[serde(deserialize_with = "quantity_or_zero")]
    quantity: i64,
    cost_price: Money,
    selling_price: Money,
    date_added: DateTime<Utc>,
}

impl ProductRecord {
    pub fn new(id: ProductId, details: ProductDetails, date_added: DateTime<Utc>) -> Self {
        let ProductDetails {
            name,
            category,
            quantity,
            cost_price,
            selling_price,
        } = details;
        Self {
            id,
            name,
            category,
            quantity,
            cost_price,
            selling_price,
            date_added,
        }
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn cost_price(&self) -> Money {
        self.cost_price
    }

    pub fn selling_price(&self) -> Money {
        self.selling_price
    }

    pub fn date_added(&self) -> DateTime<Utc> {
        self.date_added
    }

    pub fn details(&self) -> ProductDetails {
        ProductDetails {
            name: self.name.clone(),
            category: self.category.clone(),
            quantity: self.quantity,
            cost_price: self.cost_price,
            selling_price: self.selling_price,
        }
    }

    /// quantity × cost price.
    pub fn inventory_value(&self) -> Money {
        self.cost_price.times(self.quantity)
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::for_quantity(self.quantity)
    }

    /// Overwrite the editable fields. `id` and `date_added` never change.
    pub(crate) fn apply_details(&mut self, details: ProductDetails) {
        self.name = details.name;
        self.category = details.category;
        self.quantity = details.quantity;
        self.cost_price = details.cost_price;
        self.selling_price = details.selling_price;
    }
}

/// Older clients persisted a failed quantity coercion (NaN) as `null`.
/// Reading it as 0 keeps the rest of the inventory loadable and flags the
/// item as low stock until someone corrects it.
fn quantity_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_else(|| {
        tracing::warn!("stored quantity is null; reading it as 0");
        0
    }))
}

impl Entity for ProductRecord {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Raw text of the product form, exactly as submitted.
///
/// Converting to a [`ProductInput`] is the only place user text becomes
/// numbers; nothing non-numeric gets past it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Hidden id field; blank when adding a new product.
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub cost_price: String,
    pub selling_price: String,
}

impl ProductForm {
    /// Form prefilled from an existing record, for editing.
    pub fn from_record(record: &ProductRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            category: record.category.clone(),
            quantity: record.quantity.to_string(),
            cost_price: record.cost_price.to_input_text(),
            selling_price: record.selling_price.to_input_text(),
        }
    }

    pub fn is_edit(&self) -> bool {
        !self.id.trim().is_empty()
    }

    pub fn parse(&self) -> DomainResult<ProductInput> {
        let id = if self.is_edit() {
            Some(self.id.parse::<ProductId>()?)
        } else {
            None
        };

        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let quantity_text = self.quantity.trim();
        let quantity: i64 = quantity_text.parse().map_err(|_| {
            DomainError::validation(format!("quantity '{quantity_text}' is not a whole number"))
        })?;
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }

        let cost_price: Money = self
            .cost_price
            .parse()
            .map_err(|e: DomainError| field_error("cost price", e))?;
        let selling_price: Money = self
            .selling_price
            .parse()
            .map_err(|e: DomainError| field_error("selling price", e))?;

        Ok(ProductInput {
            id,
            details: ProductDetails {
                name: name.to_string(),
                category: self.category.trim().to_string(),
                quantity,
                cost_price,
                selling_price,
            },
        })
    }
}

impl TryFrom<&ProductForm> for ProductInput {
    type Error = DomainError;

    fn try_from(form: &ProductForm) -> Result<Self, Self::Error> {
        form.parse()
    }
}

fn field_error(field: &str, err: DomainError) -> DomainError {
    match err {
        DomainError::Validation(msg) => DomainError::validation(format!("{field}: {msg}")),
        other => other,
    }
}
