use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};

/// A stored record: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// Resolves a dotted path such as `order.table_id` against a document.
pub fn get_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Writes `value` at a dotted path, creating intermediate objects as needed.
pub fn set_path(doc: &mut Document, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            doc.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = doc
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(inner) = child {
                set_path(inner, rest, value);
            }
        }
    }
}

pub fn remove_path(doc: &mut Document, path: &str) -> Option<Value> {
    match path.split_once('.') {
        None => doc.remove(path),
        Some((head, rest)) => match doc.get_mut(head)? {
            Value::Object(inner) => remove_path(inner, rest),
            _ => None,
        },
    }
}

pub fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(doc) => Ok(doc),
        other => Err(serde_json::Error::custom(format!(
            "expected a JSON object, found {other}"
        ))),
    }
}

pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(doc))
}

/// Equality test on a dotted path. Null also matches a missing field.
pub fn field_equals(doc: &Document, path: &str, wanted: &Value) -> bool {
    match get_path(doc, path) {
        Some(found) => found == wanted,
        None => wanted.is_null(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn nested_paths_resolve_and_miss_cleanly() {
        let d = doc(json!({"order": {"table_id": "T1"}, "food": null}));
        assert_eq!(get_path(&d, "order.table_id"), Some(&json!("T1")));
        assert_eq!(get_path(&d, "food.price"), None);
        assert_eq!(get_path(&d, "table"), None);
    }

    #[test]
    fn set_path_replaces_scalars_with_objects() {
        let mut d = doc(json!({"order": 7}));
        set_path(&mut d, "order.table_id", json!("T9"));
        assert_eq!(Value::Object(d), json!({"order": {"table_id": "T9"}}));
    }
}
