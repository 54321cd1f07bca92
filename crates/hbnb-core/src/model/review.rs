use serde::{Deserialize, Serialize};

use super::BaseModel;

/// Text review of a place by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub base: BaseModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Review {
    pub fn new() -> Self {
        Self {
            base: BaseModel::new(),
            place_id: None,
            user_id: None,
            text: None,
        }
    }
}

super::impl_model!(Review);
