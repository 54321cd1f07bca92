//! Entity model
//!
//! Six entity types share a [`BaseModel`] identity and convert to and from
//! flat attribute mappings. [`Entity`] is the closed sum over them and is
//! what the storage backends hold.

pub mod amenity;
pub mod base;
pub mod city;
pub mod kind;
pub mod place;
pub mod relation;
pub mod review;
pub mod state;
pub mod user;

pub use amenity::Amenity;
pub use base::BaseModel;
pub use city::City;
pub use kind::EntityKind;
pub use place::Place;
pub use relation::{Link, Relation};
pub use review::Review;
pub use state::State;
pub use user::User;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{HbnbError, Result};
use crate::storage::Storage;

/// Attribute carrying the type name in `to_dict()` output and documents
pub const CLASS_KEY: &str = "__class__";

/// Behaviour shared by the six entity structs
pub trait Model: Clone + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn base(&self) -> &BaseModel;
    fn base_mut(&mut self) -> &mut BaseModel;
    fn into_entity(self) -> Entity;
    fn from_entity(entity: Entity) -> Option<Self>;

    fn id(&self) -> &str {
        self.base().id()
    }

    /// Index key `"<Type>.<id>"`
    fn key(&self) -> String {
        Self::KIND.key(self.id())
    }

    /// Flat attribute mapping plus the type discriminator
    fn to_dict(&self) -> Map<String, Value> {
        to_dict(Self::KIND, self)
    }

    /// Rebuild an instance, generating any identity fields left out
    ///
    /// # Errors
    ///
    /// `InvalidAttribute` when a value has the wrong shape or the mapping
    /// names a different type.
    fn from_dict(map: Map<String, Value>) -> Result<Self> {
        from_dict(Self::KIND, map)
    }

    /// Touch `updated_at`, register with `storage` and flush it
    ///
    /// On failure `updated_at` keeps its previous value and the backend
    /// keeps what it held before.
    ///
    /// # Errors
    ///
    /// Whatever the backend's `get`, `new` or `save` reports.
    fn save(&mut self, storage: &mut dyn Storage) -> Result<()> {
        let mut entity = self.clone().into_entity();
        let outcome = entity.save(storage);
        *self.base_mut() = entity.base().clone();
        outcome
    }

    /// Ask `storage` to remove this instance
    ///
    /// # Errors
    ///
    /// Whatever the backend's `delete` reports.
    fn delete(&self, storage: &mut dyn Storage) -> Result<()> {
        storage.delete(Some(&self.clone().into_entity()))
    }
}

pub(crate) fn to_dict<T: Serialize>(kind: EntityKind, value: &T) -> Map<String, Value> {
    // Model structs only hold strings, numbers and string lists
    let mut map = match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    map.insert(CLASS_KEY.to_string(), Value::String(kind.as_str().to_string()));
    map
}

pub(crate) fn from_dict<T: DeserializeOwned>(
    kind: EntityKind,
    mut map: Map<String, Value>,
) -> Result<T> {
    let invalid = |reason: String| HbnbError::InvalidAttribute {
        type_name: kind.as_str().to_string(),
        reason,
    };
    match map.remove(CLASS_KEY) {
        Some(Value::String(name)) if name == kind.as_str() => {}
        Some(other) => return Err(invalid(format!("{CLASS_KEY} is {other}"))),
        None => {}
    }
    BaseModel::fill_defaults(&mut map);
    serde_json::from_value(Value::Object(map)).map_err(|e| invalid(e.to_string()))
}

pub(crate) fn related_as<T: Model>(
    storage: &dyn Storage,
    relation: Relation,
    parent_id: &str,
) -> Result<Vec<T>> {
    Ok(storage
        .related(relation, parent_id)?
        .into_iter()
        .filter_map(T::from_entity)
        .collect())
}

macro_rules! impl_model {
    ($ty:ident) => {
        impl $crate::model::Model for $ty {
            const KIND: $crate::model::EntityKind = $crate::model::EntityKind::$ty;

            fn base(&self) -> &$crate::model::BaseModel {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::model::BaseModel {
                &mut self.base
            }

            fn into_entity(self) -> $crate::model::Entity {
                $crate::model::Entity::$ty(self)
            }

            fn from_entity(entity: $crate::model::Entity) -> Option<Self> {
                match entity {
                    $crate::model::Entity::$ty(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for $crate::model::Entity {
            fn from(value: $ty) -> Self {
                $crate::model::Entity::$ty(value)
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
pub(crate) use impl_model;

/// Any one of the six persisted entities
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    State(State),
    User(User),
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
}

macro_rules! each_variant {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Entity::State($inner) => $body,
            Entity::User($inner) => $body,
            Entity::Amenity($inner) => $body,
            Entity::City($inner) => $body,
            Entity::Place($inner) => $body,
            Entity::Review($inner) => $body,
        }
    };
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::State(_) => EntityKind::State,
            Entity::User(_) => EntityKind::User,
            Entity::Amenity(_) => EntityKind::Amenity,
            Entity::City(_) => EntityKind::City,
            Entity::Place(_) => EntityKind::Place,
            Entity::Review(_) => EntityKind::Review,
        }
    }

    pub fn base(&self) -> &BaseModel {
        each_variant!(self, inner => inner.base())
    }

    pub fn base_mut(&mut self) -> &mut BaseModel {
        each_variant!(self, inner => inner.base_mut())
    }

    pub fn id(&self) -> &str {
        self.base().id()
    }

    pub fn key(&self) -> String {
        self.kind().key(self.id())
    }

    pub fn to_dict(&self) -> Map<String, Value> {
        each_variant!(self, inner => inner.to_dict())
    }

    /// Rebuild an entity of a known type from its attribute mapping
    ///
    /// # Errors
    ///
    /// `InvalidAttribute` when a value has the wrong shape.
    pub fn from_dict(kind: EntityKind, map: Map<String, Value>) -> Result<Self> {
        Ok(match kind {
            EntityKind::State => Entity::State(State::from_dict(map)?),
            EntityKind::User => Entity::User(User::from_dict(map)?),
            EntityKind::Amenity => Entity::Amenity(Amenity::from_dict(map)?),
            EntityKind::City => Entity::City(City::from_dict(map)?),
            EntityKind::Place => Entity::Place(Place::from_dict(map)?),
            EntityKind::Review => Entity::Review(Review::from_dict(map)?),
        })
    }

    /// Rebuild an entity from a mapping that carries its own `__class__`
    ///
    /// # Errors
    ///
    /// `UnknownType` when the discriminator is missing or unrecognised,
    /// `InvalidAttribute` when a value has the wrong shape.
    pub fn from_document(map: Map<String, Value>) -> Result<Self> {
        let name = map
            .get(CLASS_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let kind = name.parse::<EntityKind>()?;
        Self::from_dict(kind, map)
    }

    /// Declared foreign keys with the value this entity currently holds
    pub fn foreign_keys(&self) -> Vec<(&'static str, EntityKind, Option<&str>)> {
        match self {
            Entity::City(c) => vec![("state_id", EntityKind::State, c.state_id.as_deref())],
            Entity::Place(p) => vec![
                ("city_id", EntityKind::City, p.city_id.as_deref()),
                ("user_id", EntityKind::User, p.user_id.as_deref()),
            ],
            Entity::Review(r) => vec![
                ("place_id", EntityKind::Place, r.place_id.as_deref()),
                ("user_id", EntityKind::User, r.user_id.as_deref()),
            ],
            Entity::State(_) | Entity::User(_) | Entity::Amenity(_) => Vec::new(),
        }
    }

    /// Touch `updated_at`, register with `storage` and flush it
    ///
    /// # Errors
    ///
    /// Whatever the backend's `get`, `new` or `save` reports. `updated_at`
    /// is restored before the error is returned, and so is the backend's
    /// copy when it already holds the rejected version.
    pub fn save(&mut self, storage: &mut dyn Storage) -> Result<()> {
        let stored = storage.get(self.kind(), self.id())?;
        let previous = self.base().updated_at();
        self.base_mut().touch();
        if let Err(err) = storage.new(self.clone()).and_then(|()| storage.save()) {
            self.base_mut().updated_at = previous;
            self.restore(storage, stored);
            return Err(err);
        }
        Ok(())
    }

    /// Put back what `storage` held for this entity before a failed save
    fn restore(&self, storage: &mut dyn Storage, stored: Option<Entity>) {
        let current = match storage.get(self.kind(), self.id()) {
            Ok(current) => current,
            Err(err) => {
                tracing::warn!(
                    entity_key = %self.key(),
                    error = %err,
                    "cannot inspect after failed save"
                );
                return;
            }
        };
        if current == stored {
            return;
        }
        let outcome = match stored {
            Some(entity) => storage.new(entity),
            None => storage.delete(current.as_ref()),
        };
        if let Err(err) = outcome {
            tracing::warn!(
                entity_key = %self.key(),
                error = %err,
                "cannot restore after failed save"
            );
        }
    }

    /// # Errors
    ///
    /// Whatever the backend's `delete` reports.
    pub fn delete(&self, storage: &mut dyn Storage) -> Result<()> {
        storage.delete(Some(self))
    }
}
