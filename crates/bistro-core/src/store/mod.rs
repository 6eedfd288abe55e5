use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::dsl::plan::Pipeline;
use crate::dsl::validate::PipelineError;
use crate::query::document::{field_equals, Document};

pub mod memory;

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store read timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid pipeline: {0}")]
    InvalidPipeline(#[from] PipelineError),

    #[error("document rejected: {0}")]
    InvalidDocument(String),
}

/// Conjunction of equality clauses on dotted field paths. An empty filter
/// matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    pub fn clauses(&self) -> &[(String, Value)] {
        &self.clauses
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, value)| field_equals(doc, field, value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertOutcome {
    pub inserted_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

/// A document-oriented store. Every call is one round-trip; `aggregate`
/// executes a whole composed pipeline server-side.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    /// First document matching `filter`, if any. Absence is not an error.
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    async fn insert_many(&self, collection: &str, docs: Vec<Document>) -> Result<InsertOutcome, StoreError>;

    /// Sets the given top-level or dotted fields on the first match. With
    /// `upsert`, a missing document is created from the filter and `set`.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError>;

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<DeleteOutcome, StoreError>;

    async fn aggregate(&self, collection: &str, pipeline: &Pipeline) -> Result<Vec<Document>, StoreError>;
}
