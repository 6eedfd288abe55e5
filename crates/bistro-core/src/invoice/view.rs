use serde::{Deserialize, Serialize};

use crate::query::document::{from_document, Document};
use crate::schema::records::round_money;

/// One order item as it appears on an invoice. Fields fed by a join that
/// found nothing are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceLine {
    pub amount: Option<f64>,
    pub total_count: Option<u64>,
    pub food_name: Option<String>,
    pub food_image: Option<String>,
    pub table_number: Option<u32>,
    pub table_id: Option<String>,
    pub order_id: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

/// Totals for the items of one (order, table) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceGroup {
    pub payment_due: f64,
    pub total_count: u64,
    #[serde(default)]
    pub table_number: Option<u32>,
    pub order_items: Vec<InvoiceLine>,
}

impl InvoiceGroup {
    pub fn from_document(doc: Document) -> Result<Self, serde_json::Error> {
        let mut group: Self = from_document(doc)?;
        group.payment_due = round_money(group.payment_due);
        Ok(group)
    }
}
