//! The uniform storage contract both backends implement

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::Result;
use crate::model::{Entity, EntityKind, Relation};

/// Index from `"<Type>.<id>"` to entity
pub type Objects = BTreeMap<String, Entity>;

/// Which backend sits behind a `dyn Storage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    File,
    Db,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::File => "file",
            BackendKind::Db => "db",
        }
    }

    /// Interpret the backend selector setting. Only `"db"` selects the
    /// relational backend; anything else, including unset, selects the file.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            Some("db") => BackendKind::Db,
            _ => BackendKind::File,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD contract shared by the file and relational backends
///
/// Reads go through `&self`. Writes go through `&mut self` because each
/// backend owns its index or session exclusively.
pub trait Storage {
    fn backend(&self) -> BackendKind;

    /// Every entity of `kind`, or of all kinds when `None`
    ///
    /// # Errors
    ///
    /// `Connection` if the relational session is not open.
    fn all(&self, kind: Option<EntityKind>) -> Result<Objects>;

    /// # Errors
    ///
    /// `Connection` if the relational session is not open.
    fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>>;

    /// Register an entity. The file backend indexes it immediately; the
    /// relational backend stages it until `save`.
    ///
    /// # Errors
    ///
    /// `Integrity` from the file backend when a set foreign key names a
    /// missing entity, `Connection` if the relational session is not open.
    fn new(&mut self, entity: Entity) -> Result<()>;

    /// Flush registered state to the backing store
    ///
    /// # Errors
    ///
    /// `Validation` or `Integrity` when a staged write breaks a constraint,
    /// `Io` or `Persistence` when the store itself fails.
    fn save(&mut self) -> Result<()>;

    /// Remove an entity; `None` is a no-op
    ///
    /// # Errors
    ///
    /// `Connection` if the relational session is not open.
    fn delete(&mut self, entity: Option<&Entity>) -> Result<()>;

    /// Discard in-memory state and re-read the backing store
    ///
    /// # Errors
    ///
    /// `Serialization` for an unreadable document, `Connection` when the
    /// database cannot be opened.
    fn reload(&mut self) -> Result<()>;

    /// Children of `parent_id` along `relation`, ordered by id
    ///
    /// # Errors
    ///
    /// `Connection` if the relational session is not open.
    fn related(&self, relation: Relation, parent_id: &str) -> Result<Vec<Entity>>;

    /// Release the session. Later calls fail until `reload`.
    ///
    /// # Errors
    ///
    /// `Persistence` if the connection refuses to close.
    fn close(&mut self) -> Result<()>;

    /// `all` keyed by a type name. Unknown names yield an empty mapping.
    ///
    /// # Errors
    ///
    /// As `all`.
    fn all_named(&self, type_name: Option<&str>) -> Result<Objects> {
        match type_name {
            None => self.all(None),
            Some(name) => match EntityKind::from_name(name) {
                Some(kind) => self.all(Some(kind)),
                None => Ok(Objects::new()),
            },
        }
    }

    /// `get` keyed by a type name. Unknown names yield `None`.
    ///
    /// # Errors
    ///
    /// As `get`.
    fn get_named(&self, type_name: &str, id: &str) -> Result<Option<Entity>> {
        match EntityKind::from_name(type_name) {
            Some(kind) => self.get(kind, id),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// As `all`.
    fn count(&self, kind: Option<EntityKind>) -> Result<usize> {
        Ok(self.all(kind)?.len())
    }
}
