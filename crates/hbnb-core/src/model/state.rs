use serde::{Deserialize, Serialize};

use super::{related_as, BaseModel, City, Model, Relation};
use crate::errors::Result;
use crate::storage::Storage;

/// Top-level region that owns cities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(flatten)]
    pub base: BaseModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl State {
    pub fn new() -> Self {
        Self {
            base: BaseModel::new(),
            name: None,
        }
    }

    /// Cities whose `state_id` is this state, ordered by id
    ///
    /// # Errors
    ///
    /// Whatever the backend's `related` reports.
    pub fn cities(&self, storage: &dyn Storage) -> Result<Vec<City>> {
        related_as(storage, Relation::StateCities, self.id())
    }
}

super::impl_model!(State);
