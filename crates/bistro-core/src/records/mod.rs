//! CRUD services for the persisted record types.

use std::marker::PhantomData;
use std::sync::Arc;

use thiserror::Error;

use crate::query::document::{from_document, to_document, Document};
use crate::schema::records::Record;
use crate::store::{DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoreError, UpdateOutcome};

pub mod catalog;
pub mod order_items;
pub mod orders;
pub mod validate;

pub use catalog::{FoodService, TableService};
pub use order_items::{CreatedOrderItems, OrderItemService};
pub use orders::OrderService;
pub use validate::ValidationError;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("stored {kind} could not be decoded: {source}")]
    Decode {
        kind: &'static str,
        source: serde_json::Error,
    },

    #[error("{kind} could not be encoded: {source}")]
    Encode {
        kind: &'static str,
        source: serde_json::Error,
    },
}

/// Typed access to the collection holding `T`.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, RecordError> {
        self.find(&Filter::all()).await
    }

    pub async fn find(&self, filter: &Filter) -> Result<Vec<T>, RecordError> {
        self.store
            .find(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(decode::<T>)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, RecordError> {
        self.store
            .find_one(T::COLLECTION, &Filter::eq(T::ID_FIELD, id))
            .await?
            .map(decode::<T>)
            .transpose()
    }

    pub async fn require(&self, id: &str) -> Result<T, RecordError> {
        self.get(id).await?.ok_or_else(|| RecordError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
    }

    pub async fn insert(&self, records: &[T]) -> Result<InsertOutcome, RecordError> {
        let docs = records
            .iter()
            .map(|r| {
                to_document(r).map_err(|source| RecordError::Encode {
                    kind: T::KIND,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.store.insert_many(T::COLLECTION, docs).await?)
    }

    /// Writes `set` onto the record with `id`; a missing record is NotFound.
    pub async fn update(&self, id: &str, set: Document) -> Result<UpdateOutcome, RecordError> {
        let outcome = self
            .store
            .update_one(T::COLLECTION, &Filter::eq(T::ID_FIELD, id), set, false)
            .await?;
        if outcome.matched_count == 0 {
            return Err(RecordError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
        Ok(outcome)
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome, RecordError> {
        Ok(self
            .store
            .delete_many(T::COLLECTION, &Filter::eq(T::ID_FIELD, id))
            .await?)
    }

    pub async fn delete_all(&self) -> Result<DeleteOutcome, RecordError> {
        Ok(self.store.delete_many(T::COLLECTION, &Filter::all()).await?)
    }
}

fn decode<T: Record>(doc: Document) -> Result<T, RecordError> {
    from_document(doc).map_err(|source| RecordError::Decode {
        kind: T::KIND,
        source,
    })
}

fn new_record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
