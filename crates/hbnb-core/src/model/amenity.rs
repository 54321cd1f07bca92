use serde::{Deserialize, Serialize};

use super::{related_as, BaseModel, Model, Place, Relation};
use crate::errors::Result;
use crate::storage::Storage;

/// Feature a place can offer; linked to places many-to-many
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    #[serde(flatten)]
    pub base: BaseModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Amenity {
    pub fn new() -> Self {
        Self {
            base: BaseModel::new(),
            name: None,
        }
    }

    /// Places that list this amenity, ordered by id
    ///
    /// # Errors
    ///
    /// Whatever the backend's `related` reports.
    pub fn places(&self, storage: &dyn Storage) -> Result<Vec<Place>> {
        related_as(storage, Relation::AmenityPlaces, self.id())
    }
}

super::impl_model!(Amenity);
