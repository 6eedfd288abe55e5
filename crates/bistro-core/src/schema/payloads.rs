use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::document::Document;

// Request bodies accepted by the record services. Patch types list every
// updatable field as an Option; only the fields a caller supplied are written.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub food_id: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// A batch of items placed together, creating one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemPack {
    #[serde(default)]
    pub table_id: Option<String>,
    pub order_items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItemPatch {
    #[serde(default)]
    pub food_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(default)]
    pub table_id: Option<String>,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPatch {
    #[serde(default)]
    pub table_id: Option<String>,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFood {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub food_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTable {
    pub table_number: u32,
    #[serde(default)]
    pub number_of_guests: Option<u32>,
}

/// Collects the supplied fields of a patch into a `$set` document.
#[derive(Debug, Default)]
pub(crate) struct SetFields(Document);

impl SetFields {
    pub(crate) fn with(mut self, field: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            self.0.insert(field.to_string(), value.into());
        }
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn touched(mut self, now: DateTime<Utc>) -> Document {
        self.0.insert("updated_at".to_string(), timestamp_value(now));
        self.0
    }
}

/// A timestamp in the same RFC 3339 form serde writes for stored records.
pub(crate) fn timestamp_value(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}
