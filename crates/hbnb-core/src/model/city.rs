use serde::{Deserialize, Serialize};

use super::{related_as, BaseModel, EntityKind, Model, Place, Relation, State};
use crate::errors::Result;
use crate::storage::Storage;

/// City within a state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub base: BaseModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl City {
    pub fn new() -> Self {
        Self {
            base: BaseModel::new(),
            state_id: None,
            name: None,
        }
    }

    /// The owning state, if `state_id` is set and still resolves
    ///
    /// # Errors
    ///
    /// Whatever the backend's `get` reports.
    pub fn state(&self, storage: &dyn Storage) -> Result<Option<State>> {
        let Some(state_id) = self.state_id.as_deref() else {
            return Ok(None);
        };
        Ok(storage
            .get(EntityKind::State, state_id)?
            .and_then(State::from_entity))
    }

    /// Places located in this city, ordered by id
    ///
    /// # Errors
    ///
    /// Whatever the backend's `related` reports.
    pub fn places(&self, storage: &dyn Storage) -> Result<Vec<Place>> {
        related_as(storage, Relation::CityPlaces, self.id())
    }
}

super::impl_model!(City);
