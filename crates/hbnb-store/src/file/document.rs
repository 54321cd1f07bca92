//! The serialized file document
//!
//! One JSON object mapping `"<Type>.<id>"` to that entity's `to_dict()`.

use hbnb_core::model::{Entity, EntityKind};
use hbnb_core::storage::Objects;
use serde_json::{Map, Value};

use crate::errors::{document_error, Result};

/// Encode every entity into the document bytes
pub fn encode(objects: &Objects) -> Result<Vec<u8>> {
    let document: Map<String, Value> = objects
        .iter()
        .map(|(key, entity)| (key.clone(), Value::Object(entity.to_dict())))
        .collect();
    Ok(serde_json::to_vec(&Value::Object(document))?)
}

/// Decode document bytes back into typed entities
///
/// Every entry must be an object whose `__class__` and `id` agree with
/// its key.
pub fn decode(bytes: &[u8]) -> Result<Objects> {
    let document: Value = serde_json::from_slice(bytes)?;
    let Value::Object(entries) = document else {
        return Err(document_error("document root is not an object"));
    };

    let mut objects = Objects::new();
    for (key, value) in entries {
        if EntityKind::split_key(&key).is_none() {
            return Err(document_error(format!("malformed key '{key}'")));
        }
        let Value::Object(attributes) = value else {
            return Err(document_error(format!("entry '{key}' is not an object")));
        };
        let entity = Entity::from_document(attributes)
            .map_err(|e| document_error(format!("entry '{key}': {e}")))?;
        if entity.key() != key {
            return Err(document_error(format!(
                "entry '{key}' holds {}",
                entity.key()
            )));
        }
        objects.insert(key, entity);
    }
    Ok(objects)
}
