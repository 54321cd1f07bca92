//! Entity model, storage contract and ambient facilities for the HBNB
//! storage engine. Backends live in `hbnb-store`.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod storage;

pub use hbnb_core_types::schema;

pub use errors::{ErrorKind, HbnbError, Result};
pub use model::{
    Amenity, BaseModel, City, Entity, EntityKind, Model, Place, Relation, Review, State, User,
};
pub use storage::{BackendKind, Objects, Storage};
