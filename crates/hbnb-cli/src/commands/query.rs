//! Read-only commands: all, show, count

use clap::Args;
use hbnb_core::storage::Storage;
use serde_json::Value;

use super::{find, resolve_kind};

#[derive(Debug, Args)]
pub struct AllArgs {
    /// Entity type, e.g. State
    pub type_name: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub type_name: String,
    pub id: String,
}

#[derive(Debug, Args)]
pub struct CountArgs {
    /// Entity type, e.g. Place
    pub type_name: Option<String>,
}

/// JSON array of `to_dict()` for every match, in key order
pub fn all(args: AllArgs, storage: &dyn Storage) -> anyhow::Result<String> {
    let kind = args.type_name.as_deref().map(resolve_kind).transpose()?;
    let dicts: Vec<Value> = storage
        .all(kind)?
        .values()
        .map(|e| Value::Object(e.to_dict()))
        .collect();
    Ok(serde_json::to_string_pretty(&dicts)?)
}

pub fn show(args: ShowArgs, storage: &dyn Storage) -> anyhow::Result<String> {
    let kind = resolve_kind(&args.type_name)?;
    let entity = find(storage, kind, &args.id)?;
    Ok(serde_json::to_string_pretty(&Value::Object(entity.to_dict()))?)
}

pub fn count(args: CountArgs, storage: &dyn Storage) -> anyhow::Result<String> {
    let kind = args.type_name.as_deref().map(resolve_kind).transpose()?;
    Ok(storage.count(kind)?.to_string())
}
