use bistro_core::dsl::{explain, Pipeline, Projection, Stage};
use bistro_core::invoice::invoice_pipeline;

#[test]
fn invoice_pipeline_renders_every_stage() {
    let text = explain(&invoice_pipeline("O1"));

    insta::assert_snapshot!(text, @r###"
    MATCH order_id = "O1"
    LOOKUP food ON food_id = food.food_id AS food LIMIT 1
    UNWIND food PRESERVE EMPTY
    LOOKUP order ON order_id = order.order_id AS order LIMIT 1
    UNWIND order PRESERVE EMPTY
    LOOKUP table ON order.table_id = table.table_id AS table LIMIT 1
    UNWIND table PRESERVE EMPTY
    PROJECT amount <- food.price, total_count, food_name <- food.name, food_image <- food.food_image, table_number <- table.table_number, table_id <- table.table_id, order_id <- order.order_id, price <- food.price, quantity
    GROUP BY order_id, table_id, table_number INTO payment_due = SUM(amount), total_count = COUNT(), order_items = PUSH(ROOT)
    PROJECT payment_due, total_count, table_number <- _id.table_number, order_items
    "###);
}

#[test]
fn explain_is_deterministic_for_equal_pipelines() {
    let a = invoice_pipeline("O7");
    let b = invoice_pipeline("O7");

    assert_eq!(explain(&a), explain(&b));
    assert_ne!(explain(&a), explain(&invoice_pipeline("O8")));
}

#[test]
fn literals_and_plain_unwinds_render() {
    let pipeline = Pipeline::new()
        .stage(Stage::Unwind {
            path: "tags".into(),
            preserve_null_and_empty: false,
        })
        .stage(Stage::Project(vec![
            Projection::include("tags"),
            Projection::literal("source", "menu"),
        ]));

    insta::assert_snapshot!(explain(&pipeline), @r###"
    UNWIND tags
    PROJECT tags, source = "menu"
    "###);
}
