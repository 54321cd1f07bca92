//! Writing commands: create, destroy

use anyhow::Context;
use clap::Args;
use hbnb_core::model::Entity;
use hbnb_core::storage::Storage;

use super::params::parse_params;
use super::{find, resolve_kind};

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Entity type, e.g. City
    pub type_name: String,

    /// Attributes as key=value; quote strings and use `_` for spaces
    pub params: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DestroyArgs {
    pub type_name: String,
    pub id: String,
}

/// Build, save and return the id of a new entity
pub fn create(args: CreateArgs, storage: &mut dyn Storage) -> anyhow::Result<String> {
    let kind = resolve_kind(&args.type_name)?;
    let attributes = parse_params(&args.params);
    let mut entity = Entity::from_dict(kind, attributes)?;
    entity
        .save(storage)
        .with_context(|| format!("could not save {}", entity.key()))?;
    Ok(entity.id().to_string())
}

/// Delete an entity and make the removal durable
pub fn destroy(args: DestroyArgs, storage: &mut dyn Storage) -> anyhow::Result<String> {
    let kind = resolve_kind(&args.type_name)?;
    let entity = find(storage, kind, &args.id)?;
    entity.delete(storage)?;
    storage.save()?;
    Ok(format!("destroyed {}", entity.key()))
}
