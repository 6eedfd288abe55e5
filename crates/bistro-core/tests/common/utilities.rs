use std::fs;
use std::sync::Arc;

use bistro_core::query::Document;
use bistro_core::MemoryStore;
use serde_json::Value;

pub fn load_store(name: &str) -> MemoryStore {
    let path = format!("tests/fixtures/stores/{}", name);
    let raw = fs::read_to_string(path).expect("fixture read");
    MemoryStore::from_seed_json(&raw).expect("fixture parse")
}

pub fn shared_store(name: &str) -> Arc<MemoryStore> {
    Arc::new(load_store(name))
}

pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn docs(values: Vec<Value>) -> Vec<Document> {
    values.into_iter().map(doc).collect()
}
