//! Invoice aggregation for an order.
//!
//! Order items are joined to their food, order and table, reshaped into
//! invoice lines and folded into per-(order, table) totals. The whole chain
//! is one composed query, so each call costs exactly one store read.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::schema::records::collections;
use crate::store::{DocumentStore, StoreError};

pub mod pipeline;
pub mod view;

pub use pipeline::invoice_pipeline;
pub use view::{InvoiceGroup, InvoiceLine};

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("invoice retrieval failed: {0}")]
    Retrieval(#[from] StoreError),

    #[error("invoice result could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct InvoiceService {
    store: Arc<dyn DocumentStore>,
    timeout: Duration,
}

impl InvoiceService {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);

    pub fn new(store: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Invoice groups for `order_id`. An order without items yields an empty
    /// list rather than an error.
    pub async fn get_invoice_for_order(&self, order_id: &str) -> Result<Vec<InvoiceGroup>, InvoiceError> {
        let pipeline = invoice_pipeline(order_id);

        let docs = tokio::time::timeout(
            self.timeout,
            self.store.aggregate(collections::ORDER_ITEM, &pipeline),
        )
        .await
        .map_err(|_| StoreError::Timeout(self.timeout))??;

        docs.into_iter()
            .map(InvoiceGroup::from_document)
            .collect::<Result<Vec<_>, _>>()
            .map_err(InvoiceError::from)
    }
}
