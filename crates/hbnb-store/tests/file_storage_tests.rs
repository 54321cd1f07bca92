#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use hbnb_core::model::{City, EntityKind, Model, Place, State};
use hbnb_core::storage::Storage;
use hbnb_store::FileStorage;
use std::fs;

#[test]
fn test_new_then_save_is_visible_in_all() {
    let (_dir, mut storage) = file_storage();
    let state = create_state(&mut storage, "California");

    let states = storage.all(Some(EntityKind::State)).unwrap();

    assert_eq!(states.len(), 1);
    assert_eq!(states[&state.key()], state.clone().into_entity());
    assert!(storage.all_named(Some("City")).unwrap().is_empty());
}

#[test]
fn test_save_then_reload_reproduces_mapping() {
    let (dir, mut storage) = file_storage();
    let state = create_state(&mut storage, "California");
    let city = create_city(&mut storage, &state, "San Francisco");
    let user = create_user(&mut storage, "host@example.com");
    let mut place = create_place(&mut storage, &city, &user, "Loft");
    let wifi = create_amenity(&mut storage, "Wifi");
    place.add_amenity(&wifi);
    place.latitude = Some(37.773972);
    place.save(&mut storage).unwrap();
    create_review(&mut storage, &place, &user, "Great");

    let before = storage.all(None).unwrap();
    let mut fresh = FileStorage::new(dir.path().join("file.json"));
    fresh.reload().unwrap();

    assert_eq!(fresh.all(None).unwrap(), before);
}

#[test]
fn test_document_is_flat_mapping_of_to_dict() {
    let (dir, mut storage) = file_storage();
    let state = create_state(&mut storage, "Texas");

    let raw = fs::read_to_string(dir.path().join("file.json")).unwrap();
    let document: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let entry = &document[state.key().as_str()];
    assert_eq!(entry["__class__"], "State");
    assert_eq!(entry["name"], "Texas");
    assert_eq!(entry["created_at"], state.to_dict()["created_at"]);
}

#[test]
fn test_reload_is_idempotent() {
    let (dir, mut storage) = file_storage();
    create_state(&mut storage, "Oregon");

    let mut other = FileStorage::new(dir.path().join("file.json"));
    other.reload().unwrap();
    let first = other.all(None).unwrap();
    other.reload().unwrap();

    assert_eq!(other.all(None).unwrap(), first);
}

#[test]
fn test_reload_discards_unsaved_entities() {
    let (_dir, mut storage) = file_storage();
    create_state(&mut storage, "Saved");
    storage.new(State::new().into_entity()).unwrap();
    assert_eq!(storage.count(None).unwrap(), 2);

    storage.reload().unwrap();

    assert_eq!(storage.count(None).unwrap(), 1);
}

#[test]
fn test_delete_removes_immediately_without_cascade() {
    let (_dir, mut storage) = file_storage();
    let state = create_state(&mut storage, "Nevada");
    let city = create_city(&mut storage, &state, "Reno");

    state.delete(&mut storage).unwrap();

    assert!(storage.get(EntityKind::State, state.id()).unwrap().is_none());
    let orphan = storage.get(EntityKind::City, city.id()).unwrap().unwrap();
    assert_eq!(orphan, city.clone().into_entity());
    assert_eq!(city.state(&storage).unwrap(), None);
}

#[test]
fn test_delete_absent_entity_is_noop() {
    let (_dir, mut storage) = file_storage();
    create_state(&mut storage, "Kept");

    storage.delete(Some(&State::new().into_entity())).unwrap();

    assert_eq!(storage.count(None).unwrap(), 1);
}

#[test]
fn test_place_with_unknown_city_is_integrity_failure() {
    let (_dir, mut storage) = file_storage();
    let user = create_user(&mut storage, "u@example.com");
    let mut place = Place {
        city_id: Some("no-such-city".to_string()),
        user_id: Some(user.id().to_string()),
        name: Some("Nowhere".to_string()),
        ..Place::new()
    };
    let before = place.base.updated_at();

    let err = place.save(&mut storage).unwrap_err();

    assert_eq!(err.code(), "ERR_INTEGRITY");
    assert_eq!(place.base.updated_at(), before);
    assert_eq!(storage.count(Some(EntityKind::Place)).unwrap(), 0);
}

#[test]
fn test_file_backend_does_not_validate_required_attributes() {
    let (_dir, mut storage) = file_storage();
    let mut city = City::new();

    city.save(&mut storage).unwrap();

    assert_eq!(storage.count(Some(EntityKind::City)).unwrap(), 1);
}

#[test]
fn test_relationships_resolve_by_scan() {
    let (_dir, mut storage) = file_storage();
    let state = create_state(&mut storage, "California");
    let sf = create_city(&mut storage, &state, "San Francisco");
    let la = create_city(&mut storage, &state, "Los Angeles");
    let other = create_state(&mut storage, "Oregon");
    create_city(&mut storage, &other, "Portland");
    let user = create_user(&mut storage, "host@example.com");
    let place = create_place(&mut storage, &sf, &user, "Loft");
    let review = create_review(&mut storage, &place, &user, "Lovely");

    let mut expected = vec![sf.clone(), la.clone()];
    expected.sort_by(|a, b| a.id().cmp(b.id()));
    assert_eq!(state.cities(&storage).unwrap(), expected);
    assert_eq!(sf.places(&storage).unwrap(), vec![place.clone()]);
    assert!(la.places(&storage).unwrap().is_empty());
    assert_eq!(user.places(&storage).unwrap(), vec![place.clone()]);
    assert_eq!(place.reviews(&storage).unwrap(), vec![review.clone()]);
    assert_eq!(user.reviews(&storage).unwrap(), vec![review]);
}

#[test]
fn test_amenity_links_are_add_only_ids_on_place() {
    let (_dir, mut storage) = file_storage();
    let state = create_state(&mut storage, "California");
    let city = create_city(&mut storage, &state, "San Francisco");
    let user = create_user(&mut storage, "host@example.com");
    let mut place = create_place(&mut storage, &city, &user, "Loft");
    let wifi = create_amenity(&mut storage, "Wifi");
    let pool = create_amenity(&mut storage, "Pool");

    place.add_amenity(&wifi);
    place.add_amenity(&pool);
    place.add_amenity(&wifi);
    place.save(&mut storage).unwrap();

    assert_eq!(place.amenity_ids.len(), 2);
    let mut expected = vec![wifi.clone(), pool.clone()];
    expected.sort_by(|a, b| a.id().cmp(b.id()));
    assert_eq!(place.amenities(&storage).unwrap(), expected);
    assert_eq!(wifi.places(&storage).unwrap(), vec![place.clone()]);
}

#[test]
fn test_corrupt_document_keeps_previous_index() {
    let (dir, mut storage) = file_storage();
    create_state(&mut storage, "Kept");
    fs::write(dir.path().join("file.json"), b"{\"State.x\": 1}").unwrap();

    let err = storage.reload().unwrap_err();

    assert_eq!(err.code(), "ERR_SERIALIZATION");
    assert_eq!(storage.count(None).unwrap(), 1);
}

#[test]
fn test_unknown_type_lookups_are_empty() {
    let (_dir, mut storage) = file_storage();
    let state = create_state(&mut storage, "Idaho");

    assert!(storage.all_named(Some("BaseModel")).unwrap().is_empty());
    assert!(storage.get_named("Castle", state.id()).unwrap().is_none());
    assert!(storage.get_named("State", "missing").unwrap().is_none());
    assert!(storage.get_named("State", state.id()).unwrap().is_some());
}

#[test]
fn test_failed_write_keeps_index_and_timestamps() {
    let (dir, mut storage) = file_storage();
    let mut state = create_state(&mut storage, "California");
    let saved = storage.all(None).unwrap();
    let path = dir.path().join("file.json");
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();
    fs::write(path.join("occupied"), b"x").unwrap();

    state.name = Some("Nevada".to_string());
    let before = state.base.updated_at();
    let err = state.save(&mut storage).unwrap_err();
    let mut orphan = State::new();
    orphan.save(&mut storage).unwrap_err();

    assert_eq!(err.code(), "ERR_IO");
    assert_eq!(state.base.updated_at(), before);
    assert_eq!(storage.all(None).unwrap(), saved);
}
