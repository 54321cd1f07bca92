use serde::{Deserialize, Serialize};

use super::{related_as, BaseModel, Model, Place, Relation, Review};
use crate::errors::Result;
use crate::storage::Storage;

/// Account that hosts places and writes reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: BaseModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl User {
    pub fn new() -> Self {
        Self {
            base: BaseModel::new(),
            email: None,
            password: None,
            first_name: None,
            last_name: None,
        }
    }

    /// Places hosted by this user, ordered by id
    ///
    /// # Errors
    ///
    /// Whatever the backend's `related` reports.
    pub fn places(&self, storage: &dyn Storage) -> Result<Vec<Place>> {
        related_as(storage, Relation::UserPlaces, self.id())
    }

    /// Reviews written by this user, ordered by id
    ///
    /// # Errors
    ///
    /// Whatever the backend's `related` reports.
    pub fn reviews(&self, storage: &dyn Storage) -> Result<Vec<Review>> {
        related_as(storage, Relation::UserReviews, self.id())
    }
}

super::impl_model!(User);
