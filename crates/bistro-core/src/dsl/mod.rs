pub mod explain;
pub mod plan;
pub mod validate;

pub use explain::explain;
pub use plan::{Accumulator, AccumulatorOp, Group, GroupKey, Lookup, Pipeline, ProjectExpr, Projection, Stage};
pub use validate::{validate_pipeline, validate_pipeline_against, PipelineError};
