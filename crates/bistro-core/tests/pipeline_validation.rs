use std::collections::HashMap;

use bistro_core::dsl::{
    validate_pipeline, validate_pipeline_against, Accumulator, Group, GroupKey, Lookup, Pipeline, PipelineError,
    Projection, Stage,
};
use bistro_core::query::Document;
use bistro_core::schema::collections;
use bistro_core::invoice::invoice_pipeline;

fn group_by(key: Vec<GroupKey>, accumulators: Vec<Accumulator>) -> Pipeline {
    Pipeline::new().stage(Stage::Group(Group { key, accumulators }))
}

#[test]
fn invoice_pipeline_is_well_formed() {
    validate_pipeline(&invoice_pipeline("O1")).expect("should validate");
}

#[test]
fn rejects_empty_path_segments() {
    let pipeline = Pipeline::new().stage(Stage::match_eq("order..id", "O1"));

    let err = validate_pipeline(&pipeline).unwrap_err();
    assert!(err.to_string().contains("invalid field path 'order..id'"));
}

#[test]
fn rejects_operator_style_paths() {
    let pipeline = Pipeline::new().stage(Stage::Project(vec![Projection::path("amount", "$food.price")]));

    let err = validate_pipeline(&pipeline).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidPath { stage: 0, .. }));
}

#[test]
fn rejects_duplicate_projection_fields() {
    let pipeline = Pipeline::new()
        .stage(Stage::match_eq("order_id", "O1"))
        .stage(Stage::Project(vec![
            Projection::include("amount"),
            Projection::path("amount", "food.price"),
        ]));

    assert_eq!(
        validate_pipeline(&pipeline),
        Err(PipelineError::DuplicateField {
            stage: 1,
            field: "amount".into()
        })
    );
}

#[test]
fn rejects_nested_output_names() {
    let pipeline = Pipeline::new().stage(Stage::Project(vec![Projection::path("food.name", "name")]));

    let err = validate_pipeline(&pipeline).unwrap_err();
    assert!(matches!(err, PipelineError::NestedOutputField { .. }));
}

#[test]
fn rejects_empty_projection() {
    let pipeline = Pipeline::new().stage(Stage::Project(vec![]));

    assert_eq!(
        validate_pipeline(&pipeline),
        Err(PipelineError::EmptyProjection { stage: 0 })
    );
}

#[test]
fn rejects_group_without_key() {
    let pipeline = group_by(vec![], vec![Accumulator::count("n")]);

    assert_eq!(
        validate_pipeline(&pipeline),
        Err(PipelineError::EmptyGroupKey { stage: 0 })
    );
}

#[test]
fn rejects_accumulator_shadowing_the_group_id() {
    let pipeline = group_by(vec![GroupKey::new("order_id", "order_id")], vec![Accumulator::count("_id")]);

    let err = validate_pipeline(&pipeline).unwrap_err();
    assert!(err.to_string().contains("duplicate output field '_id'"));
}

#[test]
fn rejects_zero_lookup_limit() {
    let pipeline = Pipeline::new().stage(Stage::Lookup(Lookup {
        from: "food".into(),
        local_field: "food_id".into(),
        foreign_field: "food_id".into(),
        as_field: "food".into(),
        limit: Some(0),
    }));

    assert_eq!(
        validate_pipeline(&pipeline),
        Err(PipelineError::ZeroLookupLimit { stage: 0 })
    );
}

#[test]
fn lookups_must_name_a_known_collection() {
    let mut catalog: HashMap<String, Vec<Document>> = collections::ALL
        .iter()
        .map(|name| (name.to_string(), Vec::new()))
        .collect();
    validate_pipeline_against(&invoice_pipeline("O1"), &catalog).expect("all joined collections exist");

    catalog.remove(collections::TABLE);
    assert_eq!(
        validate_pipeline_against(&invoice_pipeline("O1"), &catalog),
        Err(PipelineError::UnknownCollection {
            stage: 5,
            from: "table".into()
        })
    );
}
