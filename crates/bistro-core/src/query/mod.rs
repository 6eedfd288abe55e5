pub mod document;
pub mod execute;

pub use document::{from_document, get_path, to_document, Document};
pub use execute::{run_pipeline, Catalog};
