use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get};
use axum::Router;
use bistro_core::records::{FoodService, OrderItemService, OrderService, TableService};
use bistro_core::{DocumentStore, InvoiceService};

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;

pub use config::ServerConfig;
pub use error::ApiError;
pub use extract::JsonBody;

/// Services shared by every handler, all backed by one injected store.
#[derive(Clone)]
pub struct AppState {
    pub invoices: InvoiceService,
    pub order_items: OrderItemService,
    pub orders: OrderService,
    pub foods: FoodService,
    pub tables: TableService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, query_timeout: Duration) -> Self {
        Self {
            invoices: InvoiceService::new(Arc::clone(&store), query_timeout),
            order_items: OrderItemService::new(Arc::clone(&store)),
            orders: OrderService::new(Arc::clone(&store)),
            foods: FoodService::new(Arc::clone(&store)),
            tables: TableService::new(store),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    use handlers::{catalog, health, order_items, orders};

    Router::new()
        .route("/healthz", get(health::healthz))
        .route(
            "/orderItems",
            get(order_items::list_order_items)
                .post(order_items::create_order_items)
                .delete(order_items::delete_all_order_items),
        )
        .route(
            "/orderItems/:order_item_id",
            get(order_items::get_order_item).patch(order_items::update_order_item),
        )
        .route("/orderItems-order/:order_id", get(order_items::get_invoice))
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/:order_id",
            get(orders::get_order).patch(orders::update_order),
        )
        .route("/order/:order_id", delete(orders::delete_order))
        .route("/allorders", delete(orders::delete_all_orders))
        .route("/foods", get(catalog::list_foods).post(catalog::create_food))
        .route("/foods/:food_id", get(catalog::get_food))
        .route("/tables", get(catalog::list_tables).post(catalog::create_table))
        .route("/tables/:table_id", get(catalog::get_table))
        .with_state(state)
}
