use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::records::orders::OrderService;
use crate::records::validate::{validate_order_item_patch, validate_order_items, ValidationError};
use crate::records::{new_record_id, RecordError, Repository};
use crate::schema::payloads::{NewOrder, OrderItemPack, OrderItemPatch, SetFields};
use crate::schema::records::{round_money, timestamp_now, OrderItem};
use crate::store::{DeleteOutcome, DocumentStore, Filter, UpdateOutcome};

/// Result of placing an order item pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedOrderItems {
    pub order_id: String,
    pub inserted_ids: Vec<String>,
}

#[derive(Clone)]
pub struct OrderItemService {
    items: Repository<OrderItem>,
    orders: OrderService,
}

impl OrderItemService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            items: Repository::new(Arc::clone(&store)),
            orders: OrderService::new(store),
        }
    }

    pub async fn list(&self) -> Result<Vec<OrderItem>, RecordError> {
        self.items.list().await
    }

    /// Raw items of one order, without joins or totals.
    pub async fn list_for_order(&self, order_id: &str) -> Result<Vec<OrderItem>, RecordError> {
        self.items.find(&Filter::eq("order_id", order_id)).await
    }

    pub async fn get(&self, order_item_id: &str) -> Result<OrderItem, RecordError> {
        self.items.require(order_item_id).await
    }

    /// Opens an order for the pack's table and inserts every item under it.
    /// Items are validated up front, so a rejected pack creates nothing.
    pub async fn create(&self, pack: OrderItemPack) -> Result<CreatedOrderItems, RecordError> {
        validate_order_items(&pack.order_items)?;

        let order = self
            .orders
            .create(NewOrder {
                table_id: pack.table_id,
                order_date: None,
            })
            .await?;

        let now = timestamp_now();
        let items = pack
            .order_items
            .into_iter()
            .map(|item| OrderItem {
                order_item_id: new_record_id(),
                order_id: order.order_id.clone(),
                food_id: item.food_id,
                quantity: item.quantity,
                unit_price: round_money(item.unit_price),
                created_at: now,
                updated_at: now,
            })
            .collect::<Vec<_>>();

        self.items.insert(&items).await?;
        Ok(CreatedOrderItems {
            order_id: order.order_id,
            inserted_ids: items.into_iter().map(|i| i.order_item_id).collect(),
        })
    }

    /// Writes only the fields present in `patch`, plus `updated_at`.
    pub async fn update(&self, order_item_id: &str, patch: OrderItemPatch) -> Result<UpdateOutcome, RecordError> {
        validate_order_item_patch(&patch)?;

        let set = SetFields::default()
            .with("food_id", patch.food_id)
            .with("quantity", patch.quantity)
            .with("unit_price", patch.unit_price.map(round_money));
        if set.is_empty() {
            return Err(ValidationError::EmptyPatch.into());
        }
        self.items.update(order_item_id, set.touched(timestamp_now())).await
    }

    pub async fn delete_all(&self) -> Result<DeleteOutcome, RecordError> {
        self.items.delete_all().await
    }
}
