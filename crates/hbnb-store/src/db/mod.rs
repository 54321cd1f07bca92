//! Relational backend
//!
//! One SQLite session per backend. `new` and `delete` stage changes in the
//! session; `save` applies the whole batch in a single transaction and the
//! schema's constraints decide whether it commits. Reads see committed rows
//! only.

pub mod connection;
pub mod mapping;
pub mod repo;

use std::collections::BTreeMap;
use std::time::Instant;

use hbnb_core::model::{Entity, EntityKind, Relation};
use hbnb_core::schema::{
    OP_ALL, OP_CLOSE, OP_DELETE, OP_GET, OP_NEW, OP_RELATED, OP_RELOAD, OP_SAVE,
};
use hbnb_core::storage::{BackendKind, Objects, Storage};
use hbnb_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Connection;

use crate::config::DbConfig;
use crate::errors::{from_rusqlite, no_session, Result};

const BACKEND: &str = "db";

/// A change waiting for the next `save`
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    Upsert(Entity),
    Delete(EntityKind, String),
}

impl Pending {
    fn kind(&self) -> EntityKind {
        match self {
            Pending::Upsert(entity) => entity.kind(),
            Pending::Delete(kind, _) => *kind,
        }
    }
}

/// Open connection plus the changes staged on it
struct Session {
    conn: Connection,
    pending: BTreeMap<String, Pending>,
}

impl Session {
    fn open(config: &DbConfig) -> Result<Self> {
        let conn = connection::open(&config.database)?;
        connection::create_schema(&conn)?;
        Ok(Self {
            conn,
            pending: BTreeMap::new(),
        })
    }

    /// Apply every staged change in one transaction
    ///
    /// Upserts run parents before children, then association rows, then
    /// deletes. The staged batch is consumed whether or not it commits.
    fn flush(&mut self) -> Result<usize> {
        let pending = std::mem::take(&mut self.pending);
        let applied = pending.len();

        let mut changes: Vec<&Pending> = pending.values().collect();
        changes.sort_by_key(|change| change.kind());

        let mut upserts: Vec<&Entity> = Vec::new();
        let mut deletes: Vec<(EntityKind, &str)> = Vec::new();
        for change in changes {
            match change {
                Pending::Upsert(entity) => upserts.push(entity),
                Pending::Delete(kind, id) => deletes.push((*kind, id.as_str())),
            }
        }
        // Children go before their parents
        deletes.reverse();

        // Dropping an uncommitted transaction rolls it back
        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        for entity in &upserts {
            repo::upsert(&tx, entity)?;
        }
        for entity in &upserts {
            if let Entity::Place(place) = entity {
                repo::link_amenities(&tx, place.base.id(), &place.amenity_ids)?;
            }
        }
        for (kind, id) in &deletes {
            repo::delete(&tx, *kind, id)?;
        }
        tx.commit().map_err(from_rusqlite)?;
        Ok(applied)
    }
}

/// Storage backed by SQLite tables
pub struct DbStorage {
    config: DbConfig,
    session: Option<Session>,
}

impl std::fmt::Debug for DbStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbStorage")
            .field("config", &self.config)
            .field("connected", &self.session.is_some())
            .field("staged", &self.staged_len())
            .finish()
    }
}

impl DbStorage {
    /// Bind to the configured database without opening a session
    ///
    /// When `reset_schema` is set every table is dropped here, once.
    ///
    /// # Errors
    ///
    /// `Connection` when the database cannot be opened for the reset.
    pub fn new(config: DbConfig) -> Result<Self> {
        if config.reset_schema {
            tracing::warn!(
                database = %config.database.display(),
                "dropping all tables for test environment"
            );
            let conn = connection::open(&config.database)?;
            connection::drop_schema(&conn)?;
        }
        tracing::debug!(
            host = %config.host,
            user = %config.user,
            password = ?config.password,
            database = %config.database.display(),
            "relational backend configured"
        );
        Ok(Self {
            config,
            session: None,
        })
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Whether a session is open
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Number of changes waiting for `save`
    pub fn staged_len(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.pending.len())
    }

    fn conn(&self) -> Result<&Connection> {
        self.session.as_ref().map(|s| &s.conn).ok_or_else(no_session)
    }

    fn session_mut(&mut self) -> Result<&mut Session> {
        self.session.as_mut().ok_or_else(no_session)
    }

    fn stage(&mut self, key: String, change: Pending) -> Result<()> {
        self.session_mut()?.pending.insert(key, change);
        Ok(())
    }

    fn all_impl(&self, kind: Option<EntityKind>) -> Result<Objects> {
        let conn = self.conn()?;
        let kinds: Vec<EntityKind> = match kind {
            Some(kind) => vec![kind],
            None => EntityKind::all().to_vec(),
        };
        let mut objects = Objects::new();
        for kind in kinds {
            for entity in repo::select_all(conn, kind)? {
                objects.insert(entity.key(), entity);
            }
        }
        Ok(objects)
    }

    fn reload_impl(&mut self) -> Result<()> {
        if let Some(err) = self.session.take().and_then(discard) {
            tracing::warn!(error = %err, "previous connection did not close cleanly");
        }
        self.session = Some(Session::open(&self.config)?);
        Ok(())
    }
}

/// Drop staged changes and close the connection
fn discard(session: Session) -> Option<rusqlite::Error> {
    if !session.pending.is_empty() {
        tracing::debug!(
            staged_len = session.pending.len(),
            "discarding staged changes"
        );
    }
    session.conn.close().err().map(|(_, e)| e)
}

impl Storage for DbStorage {
    fn backend(&self) -> BackendKind {
        BackendKind::Db
    }

    fn all(&self, kind: Option<EntityKind>) -> Result<Objects> {
        log_op_start!(OP_ALL, backend = BACKEND, entity_kind = ?kind);
        let start = Instant::now();

        let result = self.all_impl(kind).map_err(|e| {
            log_op_error!(OP_ALL, e, duration_ms = start.elapsed().as_millis() as u64);
            e
        })?;

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

        let found = self
            .conn()
            .and_then(|conn| repo::select_one(conn, kind, id))
            .map_err(|e| {
                log_op_error!(OP_GET, e, duration_ms = start.elapsed().as_millis() as u64);
                e
            })?;

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

        self.stage(key.clone(), Pending::Upsert(entity)).map_err(|e| {
            log_op_error!(OP_NEW, e, duration_ms = start.elapsed().as_millis() as u64);
            e
        })?;

        log_op_end!(
            OP_NEW,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND,
            entity_key = %key
        );
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let staged = self.staged_len();
        log_op_start!(OP_SAVE, backend = BACKEND, staged_len = staged);
        let start = Instant::now();

        let applied = self
            .session_mut()
            .and_then(Session::flush)
            .map_err(|e| {
                log_op_error!(
                    OP_SAVE,
                    e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    staged_len = staged
                );
                e
            })?;

        log_op_end!(
            OP_SAVE,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND,
            staged_len = applied
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

        let change = Pending::Delete(entity.kind(), entity.id().to_string());
        self.stage(key.clone(), change).map_err(|e| {
            log_op_error!(OP_DELETE, e, duration_ms = start.elapsed().as_millis() as u64);
            e
        })?;

        log_op_end!(
            OP_DELETE,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND,
            entity_key = %key
        );
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        log_op_start!(OP_RELOAD, backend = BACKEND, staged_len = self.staged_len());
        let start = Instant::now();

        self.reload_impl().map_err(|e| {
            log_op_error!(OP_RELOAD, e, duration_ms = start.elapsed().as_millis() as u64);
            e
        })?;

        log_op_end!(
            OP_RELOAD,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND
        );
        Ok(())
    }

    fn related(&self, relation: Relation, parent_id: &str) -> Result<Vec<Entity>> {
        log_op_start!(OP_RELATED, backend = BACKEND, relation = relation.name());
        let start = Instant::now();

        let result = self
            .conn()
            .and_then(|conn| repo::select_related(conn, relation, parent_id))
            .map_err(|e| {
                log_op_error!(OP_RELATED, e, duration_ms = start.elapsed().as_millis() as u64);
                e
            })?;

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
        let start = Instant::now();

        if let Some(session) = self.session.take() {
            if let Some(err) = discard(session) {
                let e = from_rusqlite(err);
                log_op_error!(OP_CLOSE, e, duration_ms = start.elapsed().as_millis() as u64);
                return Err(e);
            }
        }

        log_op_end!(
            OP_CLOSE,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = BACKEND
        );
        Ok(())
    }
}
