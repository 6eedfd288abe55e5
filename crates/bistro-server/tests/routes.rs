use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bistro_core::schema::payloads::{NewOrder, NewOrderItem, NewTable, OrderItemPack, OrderItemPatch};
use bistro_core::MemoryStore;
use bistro_server::handlers::{catalog, health, order_items, orders};
use bistro_server::{AppState, JsonBody};

const SEED: &str = include_str!("../../../config/seed/restaurant.json");

fn seeded() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::from_seed_json(SEED).expect("seed parses"))
}

fn state_over(store: Arc<MemoryStore>) -> AppState {
    AppState::new(store, Duration::from_secs(5))
}

#[tokio::test]
async fn health_reports_ok() {
    let Json(body) = health::healthz().await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn invoice_route_totals_an_order() {
    let state = state_over(seeded());

    let Json(groups) = order_items::get_invoice(State(state), Path("O1".to_string()))
        .await
        .expect("invoice");

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].payment_due, 13.75);
    assert_eq!(groups[0].total_count, 2);
    assert_eq!(groups[0].table_number, Some(3));
}

#[tokio::test]
async fn invoice_for_unknown_order_is_empty_not_an_error() {
    let state = state_over(seeded());

    let Json(groups) = order_items::get_invoice(State(state), Path("O-missing".to_string()))
        .await
        .expect("invoice");

    assert!(groups.is_empty());
}

#[tokio::test]
async fn offline_store_surfaces_as_server_error() {
    let store = seeded();
    store.set_unavailable(true);
    let state = state_over(store);

    let err = order_items::get_invoice(State(state), Path("O1".to_string()))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_records_are_not_found() {
    let state = state_over(seeded());

    let err = order_items::get_order_item(State(state.clone()), Path("I-none".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let err = orders::get_order(State(state.clone()), Path("O-none".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let err = catalog::get_food(State(state.clone()), Path("F-none".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let err = orders::delete_order(State(state), Path("O-none".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_payloads_are_rejected() {
    let state = state_over(seeded());

    let err = order_items::create_order_items(
        State(state.clone()),
        JsonBody(OrderItemPack {
            table_id: Some("T1".into()),
            order_items: vec![],
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = order_items::update_order_item(
        State(state.clone()),
        Path("I1".to_string()),
        JsonBody(OrderItemPatch::default()),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = catalog::create_table(
        State(state),
        JsonBody(NewTable {
            table_number: 0,
            number_of_guests: None,
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn placing_items_then_reading_the_invoice() {
    let state = state_over(seeded());

    let Json(created) = order_items::create_order_items(
        State(state.clone()),
        JsonBody(OrderItemPack {
            table_id: Some("T2".into()),
            order_items: vec![NewOrderItem {
                food_id: "F3".into(),
                quantity: 1,
                unit_price: 12.0,
            }],
        }),
    )
    .await
    .expect("create");

    let Json(groups) = order_items::get_invoice(State(state), Path(created.order_id))
        .await
        .expect("invoice");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].payment_due, 12.0);
    assert_eq!(groups[0].table_number, Some(7));
}

#[tokio::test]
async fn order_lifecycle() {
    let state = state_over(seeded());

    let Json(order) = orders::create_order(
        State(state.clone()),
        JsonBody(NewOrder {
            table_id: Some("T2".into()),
            order_date: None,
        }),
    )
    .await
    .expect("create");

    let Json(fetched) = orders::get_order(State(state.clone()), Path(order.order_id.clone()))
        .await
        .expect("get");
    assert_eq!(fetched, order);

    let Json(outcome) = orders::delete_order(State(state.clone()), Path(order.order_id))
        .await
        .expect("delete");
    assert_eq!(outcome.deleted_count, 1);

    let Json(outcome) = orders::delete_all_orders(State(state.clone())).await.expect("delete all");
    assert_eq!(outcome.deleted_count, 4);
    let Json(left) = orders::list_orders(State(state)).await.expect("list");
    assert!(left.is_empty());
}
