use std::sync::Arc;

use crate::records::validate::{require_text, ValidationError};
use crate::records::{new_record_id, RecordError, Repository};
use crate::schema::payloads::{timestamp_value, NewOrder, OrderPatch, SetFields};
use crate::schema::records::{timestamp_now, Order, Record, Table};
use crate::store::{DeleteOutcome, DocumentStore, UpdateOutcome};

#[derive(Clone)]
pub struct OrderService {
    orders: Repository<Order>,
    tables: Repository<Table>,
}

impl OrderService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            orders: Repository::new(Arc::clone(&store)),
            tables: Repository::new(store),
        }
    }

    pub async fn list(&self) -> Result<Vec<Order>, RecordError> {
        self.orders.list().await
    }

    pub async fn get(&self, order_id: &str) -> Result<Order, RecordError> {
        self.orders.require(order_id).await
    }

    /// Opens an order. A table, when named, must exist.
    pub async fn create(&self, new: NewOrder) -> Result<Order, RecordError> {
        if let Some(table_id) = &new.table_id {
            self.require_table(table_id).await?;
        }

        let now = timestamp_now();
        let order = Order {
            order_id: new_record_id(),
            table_id: new.table_id,
            order_date: new.order_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };
        self.orders.insert(std::slice::from_ref(&order)).await?;
        Ok(order)
    }

    pub async fn update(&self, order_id: &str, patch: OrderPatch) -> Result<UpdateOutcome, RecordError> {
        if let Some(table_id) = &patch.table_id {
            self.require_table(table_id).await?;
        }

        let set = SetFields::default()
            .with("table_id", patch.table_id)
            .with("order_date", patch.order_date.map(timestamp_value));
        if set.is_empty() {
            return Err(ValidationError::EmptyPatch.into());
        }
        self.orders.update(order_id, set.touched(timestamp_now())).await
    }

    pub async fn delete(&self, order_id: &str) -> Result<DeleteOutcome, RecordError> {
        let outcome = self.orders.delete(order_id).await?;
        if outcome.deleted_count == 0 {
            return Err(RecordError::NotFound {
                kind: Order::KIND,
                id: order_id.to_string(),
            });
        }
        Ok(outcome)
    }

    pub async fn delete_all(&self) -> Result<DeleteOutcome, RecordError> {
        self.orders.delete_all().await
    }

    async fn require_table(&self, table_id: &str) -> Result<Table, RecordError> {
        require_text("table_id", table_id)?;
        self.tables.require(table_id).await
    }
}
