use thiserror::Error;

use crate::schema::payloads::{NewFood, NewOrderItem, NewTable, OrderItemPatch};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field '{field}' must not be empty")]
    Empty { field: &'static str },

    #[error("field '{field}' must be at least {min}")]
    TooSmall { field: &'static str, min: u32 },

    #[error("field '{field}' must be a finite, non-negative amount")]
    InvalidAmount { field: &'static str },

    #[error("an order needs at least one item")]
    NoItems,

    #[error("order item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("patch sets no fields")]
    EmptyPatch,
}

pub fn validate_order_item(item: &NewOrderItem) -> Result<(), ValidationError> {
    require_text("food_id", &item.food_id)?;
    require_at_least("quantity", item.quantity, 1)?;
    require_amount("unit_price", item.unit_price)
}

pub fn validate_order_items(items: &[NewOrderItem]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::NoItems);
    }
    for (index, item) in items.iter().enumerate() {
        validate_order_item(item).map_err(|e| ValidationError::Item {
            index,
            source: Box::new(e),
        })?;
    }
    Ok(())
}

pub fn validate_order_item_patch(patch: &OrderItemPatch) -> Result<(), ValidationError> {
    if let Some(food_id) = &patch.food_id {
        require_text("food_id", food_id)?;
    }
    if let Some(quantity) = patch.quantity {
        require_at_least("quantity", quantity, 1)?;
    }
    if let Some(unit_price) = patch.unit_price {
        require_amount("unit_price", unit_price)?;
    }
    Ok(())
}

pub fn validate_food(food: &NewFood) -> Result<(), ValidationError> {
    require_text("name", &food.name)?;
    require_amount("price", food.price)
}

pub fn validate_table(table: &NewTable) -> Result<(), ValidationError> {
    require_at_least("table_number", table.table_number, 1)?;
    if let Some(guests) = table.number_of_guests {
        require_at_least("number_of_guests", guests, 1)?;
    }
    Ok(())
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

fn require_at_least(field: &'static str, value: u32, min: u32) -> Result<(), ValidationError> {
    if value < min {
        return Err(ValidationError::TooSmall { field, min });
    }
    Ok(())
}

fn require_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidAmount { field });
    }
    Ok(())
}
