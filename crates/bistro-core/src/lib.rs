//! Restaurant order management: record services over a document store and
//! the order invoice aggregation.

pub mod dsl;
pub mod invoice;
pub mod query;
pub mod records;
pub mod schema;
pub mod store;

pub use invoice::{InvoiceError, InvoiceGroup, InvoiceLine, InvoiceService};
pub use store::{DocumentStore, Filter, MemoryStore, StoreError};
