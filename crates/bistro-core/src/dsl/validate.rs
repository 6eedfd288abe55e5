use std::collections::HashSet;

use crate::dsl::plan::{AccumulatorOp, Group, Lookup, Pipeline, ProjectExpr, Projection, Stage};
use crate::query::execute::Catalog;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("stage {stage}: invalid field path '{path}' in {context}")]
    InvalidPath {
        stage: usize,
        path: String,
        context: &'static str,
    },

    #[error("stage {stage}: output field '{field}' must be a top-level name")]
    NestedOutputField { stage: usize, field: String },

    #[error("stage {stage}: duplicate output field '{field}'")]
    DuplicateField { stage: usize, field: String },

    #[error("stage {stage}: projection must name at least one field")]
    EmptyProjection { stage: usize },

    #[error("stage {stage}: group requires at least one key field")]
    EmptyGroupKey { stage: usize },

    #[error("stage {stage}: lookup limit must be at least 1")]
    ZeroLookupLimit { stage: usize },

    #[error("stage {stage}: lookup from unknown collection '{from}'")]
    UnknownCollection { stage: usize, from: String },
}

pub fn validate_pipeline(pipeline: &Pipeline) -> Result<(), PipelineError> {
    for (stage, s) in pipeline.stages.iter().enumerate() {
        match s {
            Stage::Match { field, .. } => check_path(stage, field, "match")?,
            Stage::Lookup(lookup) => validate_lookup(stage, lookup)?,
            Stage::Unwind { path, .. } => check_path(stage, path, "unwind")?,
            Stage::Project(projections) => validate_projection(stage, projections)?,
            Stage::Group(group) => validate_group(stage, group)?,
        }
    }
    Ok(())
}

/// Structural checks plus every lookup naming a collection `catalog` holds.
pub fn validate_pipeline_against(pipeline: &Pipeline, catalog: &dyn Catalog) -> Result<(), PipelineError> {
    validate_pipeline(pipeline)?;

    for (stage, s) in pipeline.stages.iter().enumerate() {
        if let Stage::Lookup(lookup) = s {
            if !catalog.contains(&lookup.from) {
                return Err(PipelineError::UnknownCollection {
                    stage,
                    from: lookup.from.clone(),
                });
            }
        }
    }
    Ok(())
}

fn validate_lookup(stage: usize, lookup: &Lookup) -> Result<(), PipelineError> {
    check_path(stage, &lookup.from, "lookup from")?;
    check_path(stage, &lookup.local_field, "lookup local field")?;
    check_path(stage, &lookup.foreign_field, "lookup foreign field")?;
    check_path(stage, &lookup.as_field, "lookup output")?;

    if lookup.limit == Some(0) {
        return Err(PipelineError::ZeroLookupLimit { stage });
    }
    Ok(())
}

fn validate_projection(stage: usize, projections: &[Projection]) -> Result<(), PipelineError> {
    if projections.is_empty() {
        return Err(PipelineError::EmptyProjection { stage });
    }

    let mut seen = HashSet::new();
    for p in projections {
        check_output(stage, &p.field, &mut seen)?;
        if let ProjectExpr::Path(source) = &p.expr {
            check_path(stage, source, "projection source")?;
        }
    }
    Ok(())
}

fn validate_group(stage: usize, group: &Group) -> Result<(), PipelineError> {
    if group.key.is_empty() {
        return Err(PipelineError::EmptyGroupKey { stage });
    }

    let mut key_fields = HashSet::new();
    for k in &group.key {
        check_output(stage, &k.field, &mut key_fields)?;
        check_path(stage, &k.path, "group key")?;
    }

    // accumulators share the output document with `_id`
    let mut seen = HashSet::from(["_id".to_string()]);
    for acc in &group.accumulators {
        check_output(stage, &acc.field, &mut seen)?;
        if let AccumulatorOp::Sum(path) = &acc.op {
            check_path(stage, path, "sum")?;
        }
    }
    Ok(())
}

fn check_output(stage: usize, field: &str, seen: &mut HashSet<String>) -> Result<(), PipelineError> {
    check_path(stage, field, "output field")?;
    if field.contains('.') {
        return Err(PipelineError::NestedOutputField {
            stage,
            field: field.to_string(),
        });
    }
    if !seen.insert(field.to_string()) {
        return Err(PipelineError::DuplicateField {
            stage,
            field: field.to_string(),
        });
    }
    Ok(())
}

fn check_path(stage: usize, path: &str, context: &'static str) -> Result<(), PipelineError> {
    let ok = !path.is_empty()
        && !path.starts_with('$')
        && path.split('.').all(|segment| !segment.trim().is_empty());

    if ok {
        Ok(())
    } else {
        Err(PipelineError::InvalidPath {
            stage,
            path: path.to_string(),
            context,
        })
    }
}
