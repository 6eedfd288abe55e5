use crate::dsl::plan::{Accumulator, Group, GroupKey, Pipeline, Projection, Stage};
use crate::schema::join_graph::INVOICE_JOINS;

/// The full invoice query for one order: joins, line projection, then
/// grouping, executed by the store as one pipeline over `orderItem`.
pub fn invoice_pipeline(order_id: &str) -> Pipeline {
    Pipeline::new()
        .stages(join_stages(order_id))
        .stage(line_projection())
        .stages(grouping_stages())
}

/// Selects the order's items and attaches their food, order and table.
/// Every join is outer: an item with no match keeps its place with the
/// joined field absent.
pub fn join_stages(order_id: &str) -> Vec<Stage> {
    let mut stages = vec![Stage::match_eq("order_id", order_id)];
    for edge in &INVOICE_JOINS {
        stages.push(Stage::Lookup(edge.lookup()));
        stages.push(Stage::unwind_preserving(edge.alias));
    }
    stages
}

// `amount` is the food's price, not price * quantity.
pub fn line_projection() -> Stage {
    Stage::Project(vec![
        Projection::path("amount", "food.price"),
        Projection::include("total_count"),
        Projection::path("food_name", "food.name"),
        Projection::path("food_image", "food.food_image"),
        Projection::path("table_number", "table.table_number"),
        Projection::path("table_id", "table.table_id"),
        Projection::path("order_id", "order.order_id"),
        Projection::path("price", "food.price"),
        Projection::include("quantity"),
    ])
}

pub fn grouping_stages() -> Vec<Stage> {
    vec![
        Stage::Group(Group {
            key: vec![
                GroupKey::new("order_id", "order_id"),
                GroupKey::new("table_id", "table_id"),
                GroupKey::new("table_number", "table_number"),
            ],
            accumulators: vec![
                Accumulator::sum("payment_due", "amount"),
                Accumulator::count("total_count"),
                Accumulator::push("order_items"),
            ],
        }),
        Stage::Project(vec![
            Projection::include("payment_due"),
            Projection::include("total_count"),
            Projection::path("table_number", "_id.table_number"),
            Projection::include("order_items"),
        ]),
    ]
}
