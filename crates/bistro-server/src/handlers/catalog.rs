use axum::extract::{Path, State};
use axum::Json;
use bistro_core::schema::payloads::{NewFood, NewTable};
use bistro_core::schema::{FoodItem, Table};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::AppState;

pub async fn list_foods(State(state): State<AppState>) -> Result<Json<Vec<FoodItem>>, ApiError> {
    Ok(Json(state.foods.list().await?))
}

pub async fn get_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> Result<Json<FoodItem>, ApiError> {
    Ok(Json(state.foods.get(&food_id).await?))
}

pub async fn create_food(
    State(state): State<AppState>,
    JsonBody(new): JsonBody<NewFood>,
) -> Result<Json<FoodItem>, ApiError> {
    Ok(Json(state.foods.create(new).await?))
}

pub async fn list_tables(State(state): State<AppState>) -> Result<Json<Vec<Table>>, ApiError> {
    Ok(Json(state.tables.list().await?))
}

pub async fn get_table(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> Result<Json<Table>, ApiError> {
    Ok(Json(state.tables.get(&table_id).await?))
}

pub async fn create_table(
    State(state): State<AppState>,
    JsonBody(new): JsonBody<NewTable>,
) -> Result<Json<Table>, ApiError> {
    Ok(Json(state.tables.create(new).await?))
}
