use serde::{Deserialize, Serialize};

use super::{related_as, Amenity, BaseModel, Model, Relation, Review};
use crate::errors::Result;
use crate::storage::Storage;

/// Rentable place owned by a user in a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(flatten)]
    pub base: BaseModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub number_rooms: i64,

    #[serde(default)]
    pub number_bathrooms: i64,

    #[serde(default)]
    pub max_guest: i64,

    #[serde(default)]
    pub price_by_night: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Linked amenity ids in link order
    #[serde(default)]
    pub amenity_ids: Vec<String>,
}

impl Place {
    pub fn new() -> Self {
        Self {
            base: BaseModel::new(),
            city_id: None,
            user_id: None,
            name: None,
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
            amenity_ids: Vec::new(),
        }
    }

    /// Link an amenity. Linking is add-only and ignores duplicates.
    ///
    /// Takes effect in storage on the next save of this place.
    pub fn add_amenity(&mut self, amenity: &Amenity) {
        let id = amenity.id();
        if !self.amenity_ids.iter().any(|linked| linked == id) {
            self.amenity_ids.push(id.to_string());
        }
    }

    /// Amenities linked to the stored copy of this place, ordered by id
    ///
    /// # Errors
    ///
    /// Whatever the backend's `related` reports.
    pub fn amenities(&self, storage: &dyn Storage) -> Result<Vec<Amenity>> {
        related_as(storage, Relation::PlaceAmenities, self.id())
    }

    /// Reviews of this place, ordered by id
    ///
    /// # Errors
    ///
    /// Whatever the backend's `related` reports.
    pub fn reviews(&self, storage: &dyn Storage) -> Result<Vec<Review>> {
        related_as(storage, Relation::PlaceReviews, self.id())
    }
}

super::impl_model!(Place);
