use std::fmt;
use std::str::FromStr;

use crate::errors::HbnbError;

/// The six persisted entity types
///
/// Declaration order is dependency order: every type appears after the
/// types its foreign keys point at. Writers that must respect foreign keys
/// iterate `EntityKind::all()` or sort by the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    State,
    User,
    Amenity,
    City,
    Place,
    Review,
}

impl EntityKind {
    /// Type name used as the discriminator and key prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::State => "State",
            Self::User => "User",
            Self::Amenity => "Amenity",
            Self::City => "City",
            Self::Place => "Place",
            Self::Review => "Review",
        }
    }

    /// Resolve a type name. Names are case-sensitive, as they appear in keys.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.as_str() == name)
    }

    /// All entity types in dependency order
    pub fn all() -> &'static [EntityKind] {
        &[
            Self::State,
            Self::User,
            Self::Amenity,
            Self::City,
            Self::Place,
            Self::Review,
        ]
    }

    /// Relational table holding this type
    pub fn table(&self) -> &'static str {
        match self {
            Self::State => "states",
            Self::User => "users",
            Self::Amenity => "amenities",
            Self::City => "cities",
            Self::Place => "places",
            Self::Review => "reviews",
        }
    }

    /// Foreign-key attributes declared on this type, with their target type
    pub fn foreign_keys(&self) -> &'static [(&'static str, EntityKind)] {
        match self {
            Self::City => &[("state_id", Self::State)],
            Self::Place => &[("city_id", Self::City), ("user_id", Self::User)],
            Self::Review => &[("place_id", Self::Place), ("user_id", Self::User)],
            Self::State | Self::User | Self::Amenity => &[],
        }
    }

    /// Index key `"<Type>.<id>"`
    pub fn key(&self, id: &str) -> String {
        format!("{}.{}", self.as_str(), id)
    }

    /// Split an index key back into its type and id
    pub fn split_key(key: &str) -> Option<(EntityKind, &str)> {
        let (name, id) = key.split_once('.')?;
        if id.is_empty() {
            return None;
        }
        Some((Self::from_name(name)?, id))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = HbnbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| HbnbError::UnknownType {
            type_name: s.to_string(),
        })
    }
}
