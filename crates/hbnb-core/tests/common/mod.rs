use std::collections::BTreeMap;

use hbnb_core::errors::{HbnbError, Result};
use hbnb_core::model::{Entity, EntityKind, Link, Relation};
use hbnb_core::storage::{BackendKind, Objects, Storage};

/// In-memory storage double that records calls and can be told to fail
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingStorage {
    pub objects: BTreeMap<String, Entity>,
    pub calls: Vec<String>,
    pub fail_save: Option<HbnbError>,
}

#[allow(dead_code)]
impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_with(err: HbnbError) -> Self {
        Self {
            fail_save: Some(err),
            ..Self::default()
        }
    }
}

impl Storage for RecordingStorage {
    fn backend(&self) -> BackendKind {
        BackendKind::File
    }

    fn all(&self, kind: Option<EntityKind>) -> Result<Objects> {
        Ok(self
            .objects
            .iter()
            .filter(|(_, e)| kind.map_or(true, |k| e.kind() == k))
            .map(|(k, e)| (k.clone(), e.clone()))
            .collect())
    }

    fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        Ok(self.objects.get(&kind.key(id)).cloned())
    }

    fn new(&mut self, entity: Entity) -> Result<()> {
        self.calls.push(format!("new {}", entity.key()));
        self.objects.insert(entity.key(), entity);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.calls.push("save".to_string());
        match self.fail_save.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn delete(&mut self, entity: Option<&Entity>) -> Result<()> {
        if let Some(entity) = entity {
            self.calls.push(format!("delete {}", entity.key()));
            self.objects.remove(&entity.key());
        }
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.calls.push("reload".to_string());
        Ok(())
    }

    fn related(&self, relation: Relation, parent_id: &str) -> Result<Vec<Entity>> {
        let children = self
            .objects
            .values()
            .filter(|e| e.kind() == relation.child())
            .filter(|e| match relation.link() {
                Link::ForeignKey(attr) => e.to_dict().get(attr).and_then(|v| v.as_str()) == Some(parent_id),
                Link::Association => match (e, relation) {
                    (Entity::Amenity(amenity), Relation::PlaceAmenities) => {
                        match self.objects.get(&EntityKind::Place.key(parent_id)) {
                            Some(Entity::Place(place)) => {
                                place.amenity_ids.iter().any(|id| id == amenity.base.id())
                            }
                            _ => false,
                        }
                    }
                    (Entity::Place(p), Relation::AmenityPlaces) => {
                        p.amenity_ids.iter().any(|id| id == parent_id)
                    }
                    _ => false,
                },
            })
            .cloned()
            .collect();
        Ok(children)
    }

    fn close(&mut self) -> Result<()> {
        self.calls.push("close".to_string());
        Ok(())
    }
}
