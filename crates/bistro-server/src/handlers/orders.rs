use axum::extract::{Path, State};
use axum::Json;
use bistro_core::schema::payloads::{NewOrder, OrderPatch};
use bistro_core::schema::Order;
use bistro_core::store::{DeleteOutcome, UpdateOutcome};
use tracing::info;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::AppState;

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list().await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.get(&order_id).await?))
}

pub async fn create_order(
    State(state): State<AppState>,
    JsonBody(new): JsonBody<NewOrder>,
) -> Result<Json<Order>, ApiError> {
    let order = state.orders.create(new).await?;
    info!(order_id = %order.order_id, "order opened");
    Ok(Json(order))
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    JsonBody(patch): JsonBody<OrderPatch>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    Ok(Json(state.orders.update(&order_id, patch).await?))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    Ok(Json(state.orders.delete(&order_id).await?))
}

pub async fn delete_all_orders(State(state): State<AppState>) -> Result<Json<DeleteOutcome>, ApiError> {
    let outcome = state.orders.delete_all().await?;
    info!(deleted = outcome.deleted_count, "orders cleared");
    Ok(Json(outcome))
}
