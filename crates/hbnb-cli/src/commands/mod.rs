//! Subcommand implementations
//!
//! Each command takes the storage instance and returns the text to print.

pub mod mutate;
pub mod params;
pub mod query;

use anyhow::Context;
use hbnb_core::model::{Entity, EntityKind};
use hbnb_core::storage::Storage;

/// Resolve a type name given on the command line
pub fn resolve_kind(type_name: &str) -> anyhow::Result<EntityKind> {
    type_name
        .parse::<EntityKind>()
        .with_context(|| format!("class '{type_name}' doesn't exist"))
}

/// Look up an entity, failing when it is absent
pub fn find(storage: &dyn Storage, kind: EntityKind, id: &str) -> anyhow::Result<Entity> {
    storage
        .get(kind, id)?
        .with_context(|| format!("no instance found for {}", kind.key(id)))
}
