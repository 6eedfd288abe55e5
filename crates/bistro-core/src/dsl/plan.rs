use serde::{Deserialize, Serialize};
use serde_json::Value;

// A composed query: stages run in order over one source collection and are
// executed by the store as a single operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(mut self, stages: impl IntoIterator<Item = Stage>) -> Self {
        self.stages.extend(stages);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    // Keep documents whose field equals the value, e.g. order_id = "O1"
    Match { field: String, value: Value },
    Lookup(Lookup),
    Unwind {
        path: String,
        preserve_null_and_empty: bool,
    },
    Project(Vec<Projection>),
    Group(Group),
}

impl Stage {
    pub fn match_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Match {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Unwinds `path` keeping documents whose array is missing or empty.
    pub fn unwind_preserving(path: impl Into<String>) -> Self {
        Self::Unwind {
            path: path.into(),
            preserve_null_and_empty: true,
        }
    }
}

// Left outer join: matches from `from` are collected into an array at `as_field`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lookup {
    pub from: String,          // e.g. "food"
    pub local_field: String,   // e.g. "food_id" or "order.table_id"
    pub foreign_field: String, // e.g. "food_id"
    pub as_field: String,      // e.g. "food"
    pub limit: Option<usize>,
}

// A projected output field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub field: String,
    pub expr: ProjectExpr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectExpr {
    // copy the field of the same name
    Include,
    // copy from another dotted path, e.g. "food.price"
    Path(String),
    Literal(Value),
}

impl Projection {
    pub fn include(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expr: ProjectExpr::Include,
        }
    }

    pub fn path(field: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expr: ProjectExpr::Path(source.into()),
        }
    }

    pub fn literal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            expr: ProjectExpr::Literal(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub key: Vec<GroupKey>,
    pub accumulators: Vec<Accumulator>,
}

// One component of the group key, written to `_id.<field>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupKey {
    pub field: String,
    pub path: String,
}

impl GroupKey {
    pub fn new(field: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accumulator {
    pub field: String,
    pub op: AccumulatorOp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulatorOp {
    // sum of the numeric values at a path; anything else contributes nothing
    Sum(String),
    Count,
    // the grouped documents themselves, in input order
    Push,
}

impl Accumulator {
    pub fn sum(field: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: AccumulatorOp::Sum(path.into()),
        }
    }

    pub fn count(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: AccumulatorOp::Count,
        }
    }

    pub fn push(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: AccumulatorOp::Push,
        }
    }
}
