//! File backend
//!
//! Keeps every entity in an in-memory index and persists the whole index
//! as one JSON document on `save`. Foreign keys are checked by lookup at
//! `new`; deletes never cascade.

pub mod atomic;
pub mod document;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use hbnb_core::errors::HbnbError;
use hbnb_core::model::{Entity, EntityKind, Link, Relation};
use hbnb_core::schema::{
    OP_ALL, OP_CLOSE, OP_DELETE, OP_GET, OP_NEW, OP_RELATED, OP_RELOAD, OP_SAVE,
};
use hbnb_core::storage::{BackendKind, Objects, Storage};
use hbnb_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{io_error, Result};

const BACKEND: &str = "file";

/// Storage backed by a single JSON document
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    objects: Objects,
}

impl FileStorage {
    /// Empty index bound to the document at `path`. Nothing is read until
    /// `reload`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: Objects::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every set foreign key must name a live entity of its target type
    fn check_references(&self, entity: &Entity) -> Result<()> {
        for (attr, target, value) in entity.foreign_keys() {
            let Some(id) = value else { continue };
            if !self.objects.contains_key(&target.key(id)) {
                return Err(HbnbError::Integrity {
                    entity: entity.key(),
                    reason: format!("{attr} references missing {}", target.key(id)),
                });
            }
        }
        Ok(())
    }

    fn related_impl(&self, relation: Relation, parent_id: &str) -> Vec<Entity> {
        let child = relation.child();
        match (relation.link(), relation) {
            (Link::ForeignKey(attr), _) => self
                .objects
                .values()
                .filter(|e| e.kind() == child)
                .filter(|e| {
                    e.foreign_keys()
                        .iter()
                        .any(|(name, _, value)| *name == attr && *value == Some(parent_id))
                })
                .cloned()
                .collect(),
            (Link::Association, Relation::PlaceAmenities) => {
                let Some(Entity::Place(place)) =
                    self.objects.get(&EntityKind::Place.key(parent_id))
                else {
                    return Vec::new();
                };
                let mut amenities: Vec<Entity> = place
                    .amenity_ids
                    .iter()
                    .filter_map(|id| self.objects.get(&EntityKind::Amenity.key(id)))
                    .cloned()
                    .collect();
                amenities.sort_by(|a, b| a.id().cmp(b.id()));
                amenities
            }
            (Link::Association, _) => self
                .objects
                .values()
                .filter(|e| match e {
                    Entity::Place(place) => place.amenity_ids.iter().any(|id| id == parent_id),
                    _ => false,
                })
                .cloned()
                .collect(),
        }
    }

    fn reload_impl(&mut self) -> Result<usize> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no document yet");
                return Ok(self.objects.len());
            }
            Err(e) => return Err(io_error("read_document", e)),
        };
        // Decode fully before swapping so a bad document leaves the index intact
        self.objects = document::decode(&bytes)?;
        Ok(self.objects.len())
    }
}

impl Storage for FileStorage {
    fn backend(&self) -> BackendKind {
        BackendKind::File
    }

    fn all(&self, kind: Option<EntityKind>) -> Result<Objects> {
        log_op_start!(OP_ALL, backend = BACKEND, entity_kind = ?kind);
        let start = Instant::now();

        let result: Objects = self
            .objects
            .iter()
            .filter(|(_, e)| kind.map_or(true, |k| e.kind() == k))
            .map(|(key, e)| (key.clone(), e.clone()))
            .collect();

        log_op_end!(
            OP_ALL,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND,
            result_len = result.len()
        );
        Ok(result)
    }

    fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        let key = kind.key(id);
        log_op_start!(OP_GET, backend = BACKEND, entity_key = %key);
        let start = Instant::now();

        let found = self.objects.get(&key).cloned();

        log_op_end!(
            OP_GET,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND,
            found = found.is_some()
        );
        Ok(found)
    }

    fn new(&mut self, entity: Entity) -> Result<()> {
        let key = entity.key();
        log_op_start!(OP_NEW, backend = BACKEND, entity_key = %key);
        let start = Instant::now();

        self.check_references(&entity).map_err(|e| {
            log_op_error!(
                OP_NEW,
                e,
                duration_ms = start.elapsed().as_millis() as u64,
                entity_key = %key
            );
            e
        })?;
        self.objects.insert(key.clone(), entity);

        log_op_end!(
            OP_NEW,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND,
            entity_key = %key
        );
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        log_op_start!(OP_SAVE, backend = BACKEND, staged_len = self.objects.len());
        let start = Instant::now();

        document::encode(&self.objects)
            .and_then(|bytes| atomic::atomic_write(&self.path, &bytes))
            .map_err(|e| {
                log_op_error!(OP_SAVE, e, duration_ms = start.elapsed().as_millis() as u64);
                e
            })?;

        log_op_end!(
            OP_SAVE,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND,
            path = %self.path.display()
        );
        Ok(())
    }

    fn delete(&mut self, entity: Option<&Entity>) -> Result<()> {
        let Some(entity) = entity else {
            return Ok(());
        };
        let key = entity.key();
        log_op_start!(OP_DELETE, backend = BACKEND, entity_key = %key);
        let start = Instant::now();

        let removed = self.objects.remove(&key).is_some();

        log_op_end!(
            OP_DELETE,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND,
            entity_key = %key,
            removed = removed
        );
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        log_op_start!(OP_RELOAD, backend = BACKEND, path = %self.path.display());
        let start = Instant::now();

        let loaded = self.reload_impl().map_err(|e| {
            log_op_error!(OP_RELOAD, e, duration_ms = start.elapsed().as_millis() as u64);
            e
        })?;

        log_op_end!(
            OP_RELOAD,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND,
            result_len = loaded
        );
        Ok(())
    }

    fn related(&self, relation: Relation, parent_id: &str) -> Result<Vec<Entity>> {
        log_op_start!(OP_RELATED, backend = BACKEND, relation = relation.name());
        let start = Instant::now();

        let result = self.related_impl(relation, parent_id);

        log_op_end!(
            OP_RELATED,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND,
            result_len = result.len()
        );
        Ok(result)
    }

    fn close(&mut self) -> Result<()> {
        log_op_start!(OP_CLOSE, backend = BACKEND);
        log_op_end!(OP_CLOSE, duration_ms = 0u64, backend = BACKEND);
        Ok(())
    }
}
