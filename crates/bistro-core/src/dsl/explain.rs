use crate::dsl::plan::{AccumulatorOp, Group, Lookup, Pipeline, ProjectExpr, Projection, Stage};

fn explain_lookup(l: &Lookup) -> String {
    let limit = l
        .limit
        .map(|n| format!(" LIMIT {n}"))
        .unwrap_or_default();

    format!(
        "LOOKUP {} ON {} = {}.{} AS {}{}",
        l.from, l.local_field, l.from, l.foreign_field, l.as_field, limit
    )
}

fn explain_projection(projections: &[Projection]) -> String {
    let cols = projections
        .iter()
        .map(|p| match &p.expr {
            ProjectExpr::Include => p.field.clone(),
            ProjectExpr::Path(source) => format!("{} <- {}", p.field, source),
            ProjectExpr::Literal(value) => format!("{} = {}", p.field, value),
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("PROJECT {cols}")
}

fn explain_group(g: &Group) -> String {
    let key = g
        .key
        .iter()
        .map(|k| {
            if k.field == k.path {
                k.field.clone()
            } else {
                format!("{} <- {}", k.field, k.path)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let accumulators = g
        .accumulators
        .iter()
        .map(|a| match &a.op {
            AccumulatorOp::Sum(path) => format!("{} = SUM({})", a.field, path),
            AccumulatorOp::Count => format!("{} = COUNT()", a.field),
            AccumulatorOp::Push => format!("{} = PUSH(ROOT)", a.field),
        })
        .collect::<Vec<_>>()
        .join(", ");

    if accumulators.is_empty() {
        format!("GROUP BY {key}")
    } else {
        format!("GROUP BY {key} INTO {accumulators}")
    }
}

/// Renders a pipeline as one line per stage. Equal pipelines always render
/// to identical text.
pub fn explain(pipeline: &Pipeline) -> String {
    pipeline
        .stages
        .iter()
        .map(|stage| match stage {
            Stage::Match { field, value } => format!("MATCH {field} = {value}"),
            Stage::Lookup(l) => explain_lookup(l),
            Stage::Unwind {
                path,
                preserve_null_and_empty,
            } => {
                if *preserve_null_and_empty {
                    format!("UNWIND {path} PRESERVE EMPTY")
                } else {
                    format!("UNWIND {path}")
                }
            }
            Stage::Project(projections) => explain_projection(projections),
            Stage::Group(g) => explain_group(g),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
