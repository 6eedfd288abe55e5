use axum::extract::{Path, State};
use axum::Json;
use bistro_core::records::CreatedOrderItems;
use bistro_core::schema::payloads::{OrderItemPack, OrderItemPatch};
use bistro_core::schema::OrderItem;
use bistro_core::store::{DeleteOutcome, UpdateOutcome};
use bistro_core::InvoiceGroup;
use tracing::info;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::AppState;

pub async fn list_order_items(State(state): State<AppState>) -> Result<Json<Vec<OrderItem>>, ApiError> {
    Ok(Json(state.order_items.list().await?))
}

pub async fn get_order_item(
    State(state): State<AppState>,
    Path(order_item_id): Path<String>,
) -> Result<Json<OrderItem>, ApiError> {
    Ok(Json(state.order_items.get(&order_item_id).await?))
}

/// Invoice view of one order: its items joined to food and table, totalled
/// per table.
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Vec<InvoiceGroup>>, ApiError> {
    let groups = state.invoices.get_invoice_for_order(&order_id).await?;
    info!(%order_id, groups = groups.len(), "invoice built");
    Ok(Json(groups))
}

pub async fn create_order_items(
    State(state): State<AppState>,
    JsonBody(pack): JsonBody<OrderItemPack>,
) -> Result<Json<CreatedOrderItems>, ApiError> {
    let created = state.order_items.create(pack).await?;
    info!(order_id = %created.order_id, items = created.inserted_ids.len(), "order items placed");
    Ok(Json(created))
}

pub async fn update_order_item(
    State(state): State<AppState>,
    Path(order_item_id): Path<String>,
    JsonBody(patch): JsonBody<OrderItemPatch>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    Ok(Json(state.order_items.update(&order_item_id, patch).await?))
}

pub async fn delete_all_order_items(State(state): State<AppState>) -> Result<Json<DeleteOutcome>, ApiError> {
    let outcome = state.order_items.delete_all().await?;
    info!(deleted = outcome.deleted_count, "order items cleared");
    Ok(Json(outcome))
}
