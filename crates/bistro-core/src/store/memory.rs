use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, trace};
use uuid::Uuid;

use super::{DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoreError, UpdateOutcome};
use crate::dsl::explain::explain;
use crate::dsl::plan::Pipeline;
use crate::dsl::validate::validate_pipeline_against;
use crate::query::document::{get_path, set_path, Document};
use crate::query::execute::run_pipeline;

const ID_FIELD: &str = "_id";

/// In-process document store. Collections are created on first insert and
/// every read runs against one consistent snapshot of all collections.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    read_delay: Option<Duration>,
    unavailable: AtomicBool,
    reads: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. Documents without an `_id` get one; a repeated
    /// `_id` within a collection is rejected as on insert.
    pub fn with_collections(collections: HashMap<String, Vec<Document>>) -> Result<Self, StoreError> {
        let mut seeded = HashMap::with_capacity(collections.len());
        for (name, docs) in collections {
            let docs = docs.into_iter().map(with_object_id).collect::<Vec<_>>();
            unique_ids(&mut HashSet::new(), &docs)?;
            seeded.insert(name, docs);
        }

        Ok(Self {
            collections: RwLock::new(seeded),
            ..Self::default()
        })
    }

    /// Creates an empty collection for each name not already present, so
    /// lookups against it are accepted before the first insert.
    pub fn declare(mut self, names: &[&str]) -> Self {
        let collections = self.collections.get_mut();
        for name in names {
            collections.entry((*name).to_string()).or_default();
        }
        self
    }

    /// Builds a store from a JSON object mapping collection names to arrays
    /// of documents.
    pub fn from_seed_json(raw: &str) -> Result<Self, StoreError> {
        let collections: HashMap<String, Vec<Document>> =
            serde_json::from_str(raw).map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
        Self::with_collections(collections)
    }

    /// Delays every read, for exercising caller timeouts.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    /// Number of read operations served so far.
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    async fn begin_read(&self) -> Result<(), StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        self.ensure_available()
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

fn with_object_id(mut doc: Document) -> Document {
    if !doc.contains_key(ID_FIELD) {
        doc.insert(ID_FIELD.to_string(), Value::String(new_object_id()));
    }
    doc
}

/// Ids of `docs`, each checked against and added to `existing`.
fn unique_ids(existing: &mut HashSet<String>, docs: &[Document]) -> Result<Vec<String>, StoreError> {
    let mut ids = Vec::with_capacity(docs.len());
    for doc in docs {
        let id = doc
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::InvalidDocument("_id must be a string".to_string()))?;
        if !existing.insert(id.to_string()) {
            return Err(StoreError::InvalidDocument(format!("duplicate _id '{id}'")));
        }
        ids.push(id.to_string());
    }
    Ok(ids)
}

fn new_object_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        self.begin_read().await?;
        let collections = self.collections.read().await;

        let docs = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();
        Ok(docs)
    }

    async fn insert_many(&self, collection: &str, docs: Vec<Document>) -> Result<InsertOutcome, StoreError> {
        self.ensure_available()?;
        let mut collections = self.collections.write().await;
        let target = collections.entry(collection.to_string()).or_default();

        let mut existing: HashSet<String> = target
            .iter()
            .filter_map(|d| d.get(ID_FIELD).and_then(Value::as_str).map(str::to_string))
            .collect();

        let docs = docs.into_iter().map(with_object_id).collect::<Vec<_>>();
        let inserted_ids = unique_ids(&mut existing, &docs)?;

        target.extend(docs);
        debug!(collection, inserted = inserted_ids.len(), "inserted documents");
        Ok(InsertOutcome { inserted_ids })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        self.ensure_available()?;
        let mut collections = self.collections.write().await;
        let target = collections.entry(collection.to_string()).or_default();

        if let Some(doc) = target.iter_mut().find(|d| filter.matches(d)) {
            let mut modified = false;
            for (field, value) in set {
                if get_path(doc, &field) != Some(&value) {
                    set_path(doc, &field, value);
                    modified = true;
                }
            }
            return Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome::default());
        }

        let mut doc = Document::new();
        for (field, value) in filter.clauses() {
            set_path(&mut doc, field, value.clone());
        }
        for (field, value) in set {
            set_path(&mut doc, &field, value);
        }
        let doc = with_object_id(doc);
        let upserted_id = doc.get(ID_FIELD).and_then(Value::as_str).map(str::to_string);
        target.push(doc);

        debug!(collection, ?upserted_id, "upserted document");
        Ok(UpdateOutcome {
            matched_count: 0,
            modified_count: 0,
            upserted_id,
        })
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<DeleteOutcome, StoreError> {
        self.ensure_available()?;
        let mut collections = self.collections.write().await;

        let deleted_count = match collections.get_mut(collection) {
            Some(docs) => {
                let before = docs.len();
                docs.retain(|d| !filter.matches(d));
                (before - docs.len()) as u64
            }
            None => 0,
        };

        debug!(collection, deleted_count, "deleted documents");
        Ok(DeleteOutcome { deleted_count })
    }

    async fn aggregate(&self, collection: &str, pipeline: &Pipeline) -> Result<Vec<Document>, StoreError> {
        self.begin_read().await?;
        debug!(collection, stages = pipeline.len(), "running aggregation");
        trace!(plan = %explain(pipeline), "aggregation plan");

        // one read lock for the whole pipeline, so joins see a single snapshot
        let collections = self.collections.read().await;
        validate_pipeline_against(pipeline, &*collections)?;
        let source = collections.get(collection).map(Vec::as_slice).unwrap_or(&[]);
        let docs = run_pipeline(source, pipeline, &*collections)?;
        Ok(docs)
    }
}
