use hbnb_core::model::{Amenity, City, Model, Place, Review, State, User};
use hbnb_core::storage::Storage;
use hbnb_store::config::DbConfig;
use hbnb_store::{DbStorage, FileStorage};
use tempfile::TempDir;

/// File backend over a fresh temp directory. Keep the `TempDir` alive.
#[allow(dead_code)]
pub fn file_storage() -> (TempDir, FileStorage) {
    let dir = TempDir::new().unwrap();
    let mut storage = FileStorage::new(dir.path().join("file.json"));
    storage.reload().unwrap();
    (dir, storage)
}

/// Relational backend over a fresh SQLite file. Keep the `TempDir` alive.
#[allow(dead_code)]
pub fn db_storage() -> (TempDir, DbStorage) {
    let dir = TempDir::new().unwrap();
    let mut storage = DbStorage::new(DbConfig::new(dir.path().join("hbnb.sqlite"))).unwrap();
    storage.reload().unwrap();
    (dir, storage)
}

#[allow(dead_code)]
pub fn create_state(storage: &mut dyn Storage, name: &str) -> State {
    let mut state = State {
        name: Some(name.to_string()),
        ..State::new()
    };
    state.save(storage).unwrap();
    state
}

#[allow(dead_code)]
pub fn create_city(storage: &mut dyn Storage, state: &State, name: &str) -> City {
    let mut city = City {
        state_id: Some(state.id().to_string()),
        name: Some(name.to_string()),
        ..City::new()
    };
    city.save(storage).unwrap();
    city
}

#[allow(dead_code)]
pub fn create_user(storage: &mut dyn Storage, email: &str) -> User {
    let mut user = User {
        email: Some(email.to_string()),
        password: Some("pwd".to_string()),
        ..User::new()
    };
    user.save(storage).unwrap();
    user
}

#[allow(dead_code)]
pub fn create_place(storage: &mut dyn Storage, city: &City, user: &User, name: &str) -> Place {
    let mut place = Place {
        city_id: Some(city.id().to_string()),
        user_id: Some(user.id().to_string()),
        name: Some(name.to_string()),
        ..Place::new()
    };
    place.save(storage).unwrap();
    place
}

#[allow(dead_code)]
pub fn create_review(storage: &mut dyn Storage, place: &Place, user: &User, text: &str) -> Review {
    let mut review = Review {
        place_id: Some(place.id().to_string()),
        user_id: Some(user.id().to_string()),
        text: Some(text.to_string()),
        ..Review::new()
    };
    review.save(storage).unwrap();
    review
}

#[allow(dead_code)]
pub fn create_amenity(storage: &mut dyn Storage, name: &str) -> Amenity {
    let mut amenity = Amenity {
        name: Some(name.to_string()),
        ..Amenity::new()
    };
    amenity.save(storage).unwrap();
    amenity
}
