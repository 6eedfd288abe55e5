use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::dsl::plan::{AccumulatorOp, Group, Lookup, Pipeline, ProjectExpr, Projection, Stage};
use crate::dsl::validate::{validate_pipeline, PipelineError};
use crate::query::document::{field_equals, get_path, remove_path, set_path, Document};

/// Read access to the collections a pipeline may join against.
pub trait Catalog {
    fn collection(&self, name: &str) -> &[Document];

    fn contains(&self, name: &str) -> bool;
}

impl Catalog for HashMap<String, Vec<Document>> {
    fn collection(&self, name: &str) -> &[Document] {
        self.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn contains(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

/// Runs `pipeline` over `source`. The pipeline is validated first; once it
/// is well formed, execution cannot fail.
pub fn run_pipeline(
    source: &[Document],
    pipeline: &Pipeline,
    catalog: &dyn Catalog,
) -> Result<Vec<Document>, PipelineError> {
    validate_pipeline(pipeline)?;

    let mut docs = source.to_vec();
    for stage in &pipeline.stages {
        docs = match stage {
            Stage::Match { field, value } => docs
                .into_iter()
                .filter(|d| field_equals(d, field, value))
                .collect(),
            Stage::Lookup(lookup) => docs
                .into_iter()
                .map(|d| join(d, lookup, catalog))
                .collect(),
            Stage::Unwind {
                path,
                preserve_null_and_empty,
            } => unwind(docs, path, *preserve_null_and_empty),
            Stage::Project(projections) => docs.iter().map(|d| project(d, projections)).collect(),
            Stage::Group(group) => fold_groups(docs, group),
        };
    }
    Ok(docs)
}

/// Candidates in `rows` whose `field` equals `key`. A null key never matches.
fn lookup_matches<'a>(
    rows: &'a [Document],
    field: &'a str,
    key: Option<&'a Value>,
) -> impl Iterator<Item = &'a Document> + 'a {
    let key = key.filter(|k| !k.is_null());
    rows.iter()
        .filter(move |row| key.is_some() && get_path(row, field) == key)
}

fn join(mut doc: Document, lookup: &Lookup, catalog: &dyn Catalog) -> Document {
    let matched = {
        let rows = catalog.collection(&lookup.from);
        lookup_matches(rows, &lookup.foreign_field, get_path(&doc, &lookup.local_field))
            .take(lookup.limit.unwrap_or(usize::MAX))
            .cloned()
            .map(Value::Object)
            .collect::<Vec<_>>()
    };
    set_path(&mut doc, &lookup.as_field, Value::Array(matched));
    doc
}

fn unwind(docs: Vec<Document>, path: &str, preserve: bool) -> Vec<Document> {
    let mut out = Vec::with_capacity(docs.len());
    for mut doc in docs {
        match get_path(&doc, path).cloned() {
            Some(Value::Array(items)) if !items.is_empty() => {
                for item in items {
                    let mut expanded = doc.clone();
                    set_path(&mut expanded, path, item);
                    out.push(expanded);
                }
            }
            Some(Value::Array(_)) | None => {
                if preserve {
                    remove_path(&mut doc, path);
                    out.push(doc);
                }
            }
            Some(Value::Null) => {
                if preserve {
                    out.push(doc);
                }
            }
            // a scalar unwinds to itself
            Some(_) => out.push(doc),
        }
    }
    out
}

fn project(doc: &Document, projections: &[Projection]) -> Document {
    projections
        .iter()
        .map(|p| {
            let value = match &p.expr {
                ProjectExpr::Include => get_path(doc, &p.field).cloned(),
                ProjectExpr::Path(source) => get_path(doc, source).cloned(),
                ProjectExpr::Literal(value) => Some(value.clone()),
            };
            (p.field.clone(), value.unwrap_or(Value::Null))
        })
        .collect()
}

fn fold_groups(docs: Vec<Document>, group: &Group) -> Vec<Document> {
    // keyed by the rendered key so groups come out in first-seen order
    let mut groups: IndexMap<String, (Document, Vec<Document>)> = IndexMap::new();

    for doc in docs {
        let key: Document = group
            .key
            .iter()
            .map(|k| {
                let value = get_path(&doc, &k.path).cloned().unwrap_or(Value::Null);
                (k.field.clone(), value)
            })
            .collect();
        let rendered = numeric_normal(&Value::Object(key.clone())).to_string();

        groups
            .entry(rendered)
            .or_insert_with(|| (key, Vec::new()))
            .1
            .push(doc);
    }

    groups
        .into_values()
        .map(|(key, members)| {
            let mut out = Document::new();
            out.insert("_id".to_string(), Value::Object(key));
            for acc in &group.accumulators {
                let value = match &acc.op {
                    AccumulatorOp::Sum(path) => {
                        sum_numbers(members.iter().filter_map(|m| get_path(m, path)))
                    }
                    AccumulatorOp::Count => Value::from(members.len() as u64),
                    AccumulatorOp::Push => {
                        Value::Array(members.iter().cloned().map(Value::Object).collect())
                    }
                };
                out.insert(acc.field.clone(), value);
            }
            out
        })
        .collect()
}

// Equal numbers render alike (3 and 3.0 share a group).
fn numeric_normal(value: &Value) -> Value {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(Number::from_f64)
            .map_or_else(|| value.clone(), Value::Number),
        Value::Array(items) => Value::Array(items.iter().map(numeric_normal).collect()),
        Value::Object(map) => Value::Object(map.iter().map(|(k, v)| (k.clone(), numeric_normal(v))).collect()),
        other => other.clone(),
    }
}

// Integers stay integers; a single float makes the total a float.
fn sum_numbers<'a>(values: impl Iterator<Item = &'a Value>) -> Value {
    let mut total = 0.0;
    let mut integral = true;

    for value in values {
        if let Value::Number(n) = value {
            integral &= !n.is_f64();
            total += n.as_f64().unwrap_or(0.0);
        }
    }

    if integral {
        Value::from(total as i64)
    } else {
        Number::from_f64(total).map_or(Value::Null, Value::Number)
    }
}
