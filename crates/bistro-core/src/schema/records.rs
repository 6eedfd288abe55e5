use chrono::{DateTime, SubsecRound, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod collections {
    pub const ORDER_ITEM: &str = "orderItem";
    pub const FOOD: &str = "food";
    pub const ORDER: &str = "order";
    pub const TABLE: &str = "table";

    pub const ALL: [&str; 4] = [ORDER_ITEM, FOOD, ORDER, TABLE];
}

/// A persisted record type: where it lives and which field identifies it.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const KIND: &'static str;
    const COLLECTION: &'static str;
    const ID_FIELD: &'static str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: String,
    pub order_id: String,
    pub food_id: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub food_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub food_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    #[serde(default)]
    pub table_id: Option<String>,
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub table_id: String,
    pub table_number: u32,
    #[serde(default)]
    pub number_of_guests: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for OrderItem {
    const KIND: &'static str = "order item";
    const COLLECTION: &'static str = collections::ORDER_ITEM;
    const ID_FIELD: &'static str = "order_item_id";
}

impl Record for FoodItem {
    const KIND: &'static str = "food";
    const COLLECTION: &'static str = collections::FOOD;
    const ID_FIELD: &'static str = "food_id";
}

impl Record for Order {
    const KIND: &'static str = "order";
    const COLLECTION: &'static str = collections::ORDER;
    const ID_FIELD: &'static str = "order_id";
}

impl Record for Table {
    const KIND: &'static str = "table";
    const COLLECTION: &'static str = collections::TABLE;
    const ID_FIELD: &'static str = "table_id";
}

/// Rounds a monetary amount to cents.
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Current time at second precision, the resolution stored timestamps carry.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
